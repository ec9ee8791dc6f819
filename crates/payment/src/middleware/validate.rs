use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use shared::errors::{AppErrorHttp, ServiceError, format_validation_errors};
use validator::Validate;

/// JSON body that has been deserialized and passed its `validator` rules.
/// Either failure is answered with a 400.
#[derive(Debug, Clone)]
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppErrorHttp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                AppErrorHttp(ServiceError::Validation(vec![rejection.body_text()]))
            })?;

        value.validate().map_err(|errors| {
            AppErrorHttp(ServiceError::Validation(format_validation_errors(&errors)))
        })?;

        Ok(Self(value))
    }
}
