use crate::{
    abstract_trait::payment::repository::query::PaymentQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::payment::PaymentSliceQuery,
    errors::RepositoryError,
    model::payment::PaymentModel,
    repository::payment::row::payment_from_row,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};
use uuid::Uuid;

pub struct PaymentQueryRepository {
    db: ConnectionPool,
}

impl PaymentQueryRepository {
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

/// Keyset query for one page of the `(date_occurred, id)` scan.
fn slice_query(query: &PaymentSliceQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT id, value, category, payment_type, date_occurred FROM payments WHERE TRUE",
    );

    if let Some(after) = query.after {
        builder
            .push(" AND (date_occurred > ")
            .push_bind(after.date_occurred)
            .push(" OR (date_occurred = ")
            .push_bind(after.date_occurred)
            .push(" AND id > ")
            .push_bind(after.id)
            .push("))");
    }

    if let Some(before) = query.before {
        builder.push(" AND date_occurred < ").push_bind(before);
    }

    builder
        .push(" ORDER BY date_occurred ASC, id ASC LIMIT ")
        .push_bind(query.limit);

    builder
}

#[async_trait]
impl PaymentQueryRepositoryTrait for PaymentQueryRepository {
    async fn count(&self) -> Result<i64, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count payments: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(count)
    }

    async fn find_slice(
        &self,
        query: &PaymentSliceQuery,
    ) -> Result<Vec<PaymentModel>, RepositoryError> {
        info!(
            "🔍 Fetching payment slice | after: {:?}, limit: {}",
            query.after.map(|t| t.sort_key()),
            query.limit
        );

        let mut conn = self.get_conn().await?;
        let mut builder = slice_query(query);

        let rows = builder
            .build()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch payment slice: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("✅ Retrieved {} payments", rows.len());

        rows.iter().map(payment_from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<PaymentModel, RepositoryError> {
        info!("🔍 Finding payment by ID: {id}");

        let mut conn = self.get_conn().await?;

        let row = sqlx::query(
            r#"
            SELECT id, value, category, payment_type, date_occurred
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to query payment by ID: {e:?}");
            RepositoryError::from(e)
        })?;

        match row {
            Some(row) => payment_from_row(&row),
            None => {
                error!("❌ Payment with ID {id} not found");
                Err(RepositoryError::NotFound)
            }
        }
    }

    async fn find_in_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PaymentModel>, RepositoryError> {
        info!("📅 Fetching payments between {from} and {to}");

        let mut conn = self.get_conn().await?;

        let rows = sqlx::query(
            r#"
            SELECT id, value, category, payment_type, date_occurred
            FROM payments
            WHERE date_occurred >= $1 AND date_occurred < $2
            ORDER BY date_occurred ASC, id ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch payments for period: {e:?}");
            RepositoryError::from(e)
        })?;

        rows.iter().map(payment_from_row).collect()
    }
}
