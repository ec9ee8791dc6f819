use crate::{errors::RepositoryError, model::payment::PaymentModel};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPaymentCommandRepository = Arc<dyn PaymentCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait PaymentCommandRepositoryTrait {
    async fn create(&self, payment: &PaymentModel) -> Result<PaymentModel, RepositoryError>;
    async fn upsert(&self, payment: &PaymentModel) -> Result<PaymentModel, RepositoryError>;
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}
