use crate::{
    domain::requests::payment::PaymentSliceQuery, errors::RepositoryError,
    model::payment::PaymentModel,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub type DynPaymentQueryRepository = Arc<dyn PaymentQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait PaymentQueryRepositoryTrait {
    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Payments ordered by `(date_occurred asc, id asc)`, strictly after
    /// `query.after` and strictly before `query.before` when those are set.
    async fn find_slice(
        &self,
        query: &PaymentSliceQuery,
    ) -> Result<Vec<PaymentModel>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<PaymentModel, RepositoryError>;

    /// Payments with `from <= date_occurred < to`.
    async fn find_in_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PaymentModel>, RepositoryError>;
}
