use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::{Extension, OriginalUri, Path, RawQuery},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::payment::service::{
        command::DynPaymentCommandService, query::DynPaymentQueryService,
        stats::DynPaymentStatsService,
    },
    domain::{
        requests::payment::{CreatePaymentRequest, FindPaymentPage, FindPaymentStats},
        responses::{ApiResponse, PaymentPageResponse, PaymentResponse, PaymentStatsResponse},
    },
    errors::{AppErrorHttp, ErrorResponse, ServiceError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

fn parse_id(raw: &str) -> Result<Uuid, AppErrorHttp> {
    Uuid::parse_str(raw).map_err(|_| {
        AppErrorHttp(ServiceError::Validation(vec![format!(
            "id: '{raw}' is not a valid UUID"
        )]))
    })
}

fn location(id: Uuid) -> [(header::HeaderName, String); 1] {
    [(header::LOCATION, format!("/api/payments/{id}"))]
}

#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payment",
    params(FindPaymentPage),
    responses(
        (status = 200, description = "One page of payments", body = ApiResponse<PaymentPageResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_payments(
    Extension(service): Extension<DynPaymentQueryService>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let params = FindPaymentPage::from_query(query.as_deref());
    let request_uri = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let response = service.find_page(&params, request_uri).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payment",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_payment(
    Extension(service): Extension<DynPaymentCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.create(&body).await?;
    Ok((
        StatusCode::CREATED,
        location(response.data.id),
        Json(response),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/payments",
    tag = "Payment",
    responses(
        (status = 200, description = "Every payment removed", body = ApiResponse<u64>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_all_payments(
    Extension(service): Extension<DynPaymentCommandService>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.delete_all().await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/payments/count",
    tag = "Payment",
    responses(
        (status = 200, description = "Number of stored payments", body = ApiResponse<i64>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn count_payments(
    Extension(service): Extension<DynPaymentQueryService>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.count().await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/payments/stats",
    tag = "Payment",
    params(FindPaymentStats),
    responses(
        (status = 200, description = "Debit spendings by category", body = ApiResponse<PaymentStatsResponse>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_payment_stats(
    Extension(service): Extension<DynPaymentStatsService>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let params = FindPaymentStats::from_query(query.as_deref());
    let response = service.get_stats(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "Payment",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    )
)]
pub async fn get_payment(
    Extension(service): Extension<DynPaymentQueryService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_id(parse_id(&id)?).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    tag = "Payment",
    params(("id" = Uuid, Path, description = "Payment ID")),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment stored under the given ID", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn put_payment(
    Extension(service): Extension<DynPaymentCommandService>,
    Path(id): Path<String>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let id = parse_id(&id)?;
    let response = service.upsert(id, &body).await?;
    Ok((StatusCode::CREATED, location(id), Json(response)))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/payments",
            get(get_payments)
                .post(create_payment)
                .delete(delete_all_payments),
        )
        .route("/api/payments/count", get(count_payments))
        .route("/api/payments/stats", get(get_payment_stats))
        .route("/api/payments/{id}", get(get_payment).put(put_payment))
        .layer(Extension(
            app_state.di_container.payment_query.service.clone(),
        ))
        .layer(Extension(
            app_state.di_container.payment_command.service.clone(),
        ))
        .layer(Extension(
            app_state.di_container.payment_stats.service.clone(),
        ))
}
