use crate::{
    abstract_trait::payment::{
        repository::command::DynPaymentCommandRepository,
        service::command::PaymentCommandServiceTrait,
    },
    domain::{
        requests::payment::CreatePaymentRequest,
        responses::{ApiResponse, PaymentResponse},
    },
    errors::{ServiceError, format_validation_errors},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

pub struct PaymentCommandService {
    command: DynPaymentCommandRepository,
}

impl PaymentCommandService {
    pub async fn new(command: DynPaymentCommandRepository) -> Self {
        Self { command }
    }

    fn validate(req: &CreatePaymentRequest) -> Result<(), ServiceError> {
        req.validate().map_err(|validation_errors| {
            let errors = format_validation_errors(&validation_errors);
            error!("Validation failed: {errors:?}");
            ServiceError::Validation(errors)
        })
    }
}

#[async_trait]
impl PaymentCommandServiceTrait for PaymentCommandService {
    async fn create(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        Self::validate(req)?;

        let payment = req.to_model(Uuid::new_v4());
        info!(
            "🆕 Creating payment {} | {} {} {}",
            payment.id, payment.payment_type, payment.category, payment.value
        );

        let created = self.command.create(&payment).await.map_err(|e| {
            error!("❌ Failed to create payment: {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("✅ Payment created with ID: {}", created.id);

        Ok(ApiResponse::success(
            "Payment created successfully",
            PaymentResponse::from(created),
        ))
    }

    async fn upsert(
        &self,
        id: Uuid,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        Self::validate(req)?;

        info!("💾 Saving payment {id}");

        let saved = self.command.upsert(&req.to_model(id)).await.map_err(|e| {
            error!("❌ Failed to save payment {id}: {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("✅ Payment saved with ID: {id}");

        Ok(ApiResponse::success(
            "Payment saved successfully",
            PaymentResponse::from(saved),
        ))
    }

    async fn delete_all(&self) -> Result<ApiResponse<u64>, ServiceError> {
        info!("🗑️ Deleting all payments");

        let deleted = self.command.delete_all().await.map_err(|e| {
            error!("❌ Failed to delete payments: {e:?}");
            ServiceError::Repo(e)
        })?;

        Ok(ApiResponse::success(
            format!("{deleted} payments deleted"),
            deleted,
        ))
    }
}
