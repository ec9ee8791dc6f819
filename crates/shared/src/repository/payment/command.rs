use crate::{
    abstract_trait::payment::repository::command::PaymentCommandRepositoryTrait,
    config::ConnectionPool, errors::RepositoryError, model::payment::PaymentModel,
    repository::payment::row::payment_from_row,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct PaymentCommandRepository {
    db: ConnectionPool,
}

impl PaymentCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl PaymentCommandRepositoryTrait for PaymentCommandRepository {
    async fn create(&self, payment: &PaymentModel) -> Result<PaymentModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO payments (id, value, category, payment_type, date_occurred)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, value, category, payment_type, date_occurred
            "#,
        )
        .bind(payment.id)
        .bind(payment.value)
        .bind(payment.category.as_str())
        .bind(payment.payment_type.as_str())
        .bind(payment.date_occurred)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create payment {}: {e:?}", payment.id);
            RepositoryError::Sqlx(e)
        })?;

        payment_from_row(&row)
    }

    async fn upsert(&self, payment: &PaymentModel) -> Result<PaymentModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO payments (id, value, category, payment_type, date_occurred)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                value = EXCLUDED.value,
                category = EXCLUDED.category,
                payment_type = EXCLUDED.payment_type,
                date_occurred = EXCLUDED.date_occurred
            RETURNING id, value, category, payment_type, date_occurred
            "#,
        )
        .bind(payment.id)
        .bind(payment.value)
        .bind(payment.category.as_str())
        .bind(payment.payment_type.as_str())
        .bind(payment.date_occurred)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to upsert payment {}: {e:?}", payment.id);
            RepositoryError::Sqlx(e)
        })?;

        payment_from_row(&row)
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let result = sqlx::query("DELETE FROM payments")
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete payments: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        info!("🗑️ Deleted {} payments", result.rows_affected());

        Ok(result.rows_affected())
    }
}
