use crate::{
    domain::{
        requests::payment::FindPaymentStats,
        responses::{ApiResponse, PaymentStatsResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPaymentStatsService = Arc<dyn PaymentStatsServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentStatsServiceTrait {
    async fn get_stats(
        &self,
        req: &FindPaymentStats,
    ) -> Result<ApiResponse<PaymentStatsResponse>, ServiceError>;
}
