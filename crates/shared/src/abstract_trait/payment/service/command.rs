use crate::{
    domain::{
        requests::payment::CreatePaymentRequest,
        responses::{ApiResponse, PaymentResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynPaymentCommandService = Arc<dyn PaymentCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentCommandServiceTrait {
    async fn create(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError>;
    async fn upsert(
        &self,
        id: Uuid,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError>;
    async fn delete_all(&self) -> Result<ApiResponse<u64>, ServiceError>;
}
