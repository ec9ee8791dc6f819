use crate::{
    abstract_trait::payment::{
        repository::query::DynPaymentQueryRepository, service::query::PaymentQueryServiceTrait,
    },
    domain::{
        requests::payment::{FindPaymentPage, PaymentSliceQuery},
        responses::{ApiResponse, PaymentPageResponse, PaymentResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{ContinuationToken, next_page_url},
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct PaymentQueryService {
    query: DynPaymentQueryRepository,
}

impl PaymentQueryService {
    pub async fn new(query: DynPaymentQueryRepository) -> Self {
        Self { query }
    }
}

fn parse_token(raw: Option<&str>) -> Option<ContinuationToken> {
    let raw = raw?;
    match raw.parse::<ContinuationToken>() {
        Ok(token) => Some(token),
        Err(e) => {
            warn!("⚠️ Ignoring unreadable continuation token ({e}), serving first page");
            None
        }
    }
}

#[async_trait]
impl PaymentQueryServiceTrait for PaymentQueryService {
    async fn find_page(
        &self,
        req: &FindPaymentPage,
        request_uri: &str,
    ) -> Result<ApiResponse<PaymentPageResponse>, ServiceError> {
        let page_size = req.page_size();
        let token = parse_token(req.raw_token());

        info!(
            "🔍 Fetching payment page | Size: {page_size}, After: {:?}",
            token.map(|t| t.sort_key())
        );

        let total_count = self.query.count().await.map_err(|e| {
            error!("❌ Failed to count payments: {e:?}");
            ServiceError::Repo(e)
        })?;

        // Resumed scans only see rows that occurred before this request.
        let slice = PaymentSliceQuery {
            after: token,
            before: token.map(|_| Utc::now()),
            limit: page_size,
        };

        let payments = self.query.find_slice(&slice).await.map_err(|e| {
            error!("❌ Failed to fetch payment page: {e:?}");
            ServiceError::Repo(e)
        })?;

        let has_next = payments.len() as i64 == page_size;

        let (continuation_token, next_url) = match payments.last().filter(|_| has_next) {
            Some(last) => {
                let token = ContinuationToken::from(last).to_string();
                let url = next_page_url(request_uri, &token).map_err(|e| {
                    error!("❌ Failed to build next page URL from '{request_uri}': {e}");
                    ServiceError::Internal(format!("invalid request URI: {e}"))
                })?;
                (Some(token), Some(url))
            }
            None => (None, None),
        };

        info!(
            "✅ Found {} payments of {total_count} | has_next: {has_next}",
            payments.len()
        );

        Ok(ApiResponse::success(
            "Payments retrieved successfully",
            PaymentPageResponse {
                total_count,
                payments: payments.into_iter().map(PaymentResponse::from).collect(),
                has_next,
                continuation_token,
                next_page_url: next_url,
            },
        ))
    }

    async fn count(&self) -> Result<ApiResponse<i64>, ServiceError> {
        let count = self.query.count().await.map_err(|e| {
            error!("❌ Failed to count payments: {e:?}");
            ServiceError::Repo(e)
        })?;

        Ok(ApiResponse::success("Payments counted successfully", count))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        info!("🔍 Finding payment by ID: {id}");

        let payment = self.query.find_by_id(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::NotFound(format!("Payment {id} not found")),
            other => {
                error!("❌ Database error while finding payment {id}: {other:?}");
                ServiceError::Repo(other)
            }
        })?;

        info!("✅ Found payment with ID: {id}");

        Ok(ApiResponse::success(
            "Payment retrieved successfully",
            PaymentResponse::from(payment),
        ))
    }
}
