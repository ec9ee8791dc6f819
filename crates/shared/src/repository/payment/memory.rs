use crate::{
    abstract_trait::payment::repository::{
        command::PaymentCommandRepositoryTrait, query::PaymentQueryRepositoryTrait,
    },
    domain::requests::payment::PaymentSliceQuery,
    errors::RepositoryError,
    model::payment::PaymentModel,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Payments kept in a map, for tests and local experiments. Answers the
/// same queries as the Postgres repositories.
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<Uuid, PaymentModel>>,
    unavailable: AtomicBool,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payments(payments: impl IntoIterator<Item = PaymentModel>) -> Self {
        let map = payments.into_iter().map(|p| (p.id, p)).collect();
        Self {
            payments: RwLock::new(map),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every call fail as if the pool could not hand out a connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }

    async fn sorted(&self) -> Vec<PaymentModel> {
        let mut payments: Vec<PaymentModel> = self.payments.read().await.values().cloned().collect();
        payments.sort_by_key(|p| (p.date_occurred, p.id));
        payments
    }
}

#[async_trait]
impl PaymentQueryRepositoryTrait for InMemoryPaymentRepository {
    async fn count(&self) -> Result<i64, RepositoryError> {
        self.check_available()?;
        Ok(self.payments.read().await.len() as i64)
    }

    async fn find_slice(
        &self,
        query: &PaymentSliceQuery,
    ) -> Result<Vec<PaymentModel>, RepositoryError> {
        self.check_available()?;

        let limit = usize::try_from(query.limit).unwrap_or(0);

        Ok(self
            .sorted()
            .await
            .into_iter()
            .filter(|p| query.after.is_none_or(|after| after.precedes(p)))
            .filter(|p| query.before.is_none_or(|before| p.date_occurred < before))
            .take(limit)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<PaymentModel, RepositoryError> {
        self.check_available()?;
        self.payments
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_in_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PaymentModel>, RepositoryError> {
        self.check_available()?;
        Ok(self
            .sorted()
            .await
            .into_iter()
            .filter(|p| p.date_occurred >= from && p.date_occurred < to)
            .collect())
    }
}

#[async_trait]
impl PaymentCommandRepositoryTrait for InMemoryPaymentRepository {
    async fn create(&self, payment: &PaymentModel) -> Result<PaymentModel, RepositoryError> {
        self.check_available()?;

        let mut payments = self.payments.write().await;
        if payments.contains_key(&payment.id) {
            return Err(RepositoryError::Custom(format!(
                "payment {} already exists",
                payment.id
            )));
        }
        payments.insert(payment.id, payment.clone());

        Ok(payment.clone())
    }

    async fn upsert(&self, payment: &PaymentModel) -> Result<PaymentModel, RepositoryError> {
        self.check_available()?;
        self.payments
            .write()
            .await
            .insert(payment.id, payment.clone());
        Ok(payment.clone())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        self.check_available()?;

        let mut payments = self.payments.write().await;
        let removed = payments.len() as u64;
        payments.clear();

        Ok(removed)
    }
}
