use crate::{
    domain::{
        requests::payment::FindPaymentPage,
        responses::{ApiResponse, PaymentPageResponse, PaymentResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynPaymentQueryService = Arc<dyn PaymentQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentQueryServiceTrait {
    /// `request_uri` is the path and query of the incoming request; the next
    /// page URL is derived from it.
    async fn find_page(
        &self,
        req: &FindPaymentPage,
        request_uri: &str,
    ) -> Result<ApiResponse<PaymentPageResponse>, ServiceError>;
    async fn count(&self) -> Result<ApiResponse<i64>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<PaymentResponse>, ServiceError>;
}
