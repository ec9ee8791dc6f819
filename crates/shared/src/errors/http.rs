use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl From<ServiceError> for AppErrorHttp {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl AppErrorHttp {
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            ServiceError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                format!("Validation failed: {}", errors.join("; ")),
            ),

            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
                RepositoryError::Sqlx(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                ),
                RepositoryError::Decode(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
                RepositoryError::Custom(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            },

            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            error!("🚨 {}", self.0);
        } else {
            warn!("⚠️ {}", self.0);
        }
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        self.log(status);

        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message,
        });

        (status, body).into_response()
    }
}
