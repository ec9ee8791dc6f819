use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use payment::{handler::AppRouter, state::AppState};
use serde_json::{Value, json};
use shared::{
    abstract_trait::payment::repository::{
        command::DynPaymentCommandRepository,
        query::{DynPaymentQueryRepository, PaymentQueryRepositoryTrait},
    },
    repository::payment::memory::InMemoryPaymentRepository,
};
use std::sync::Arc;
use tower::ServiceExt;

async fn app() -> (Arc<InMemoryPaymentRepository>, Router) {
    let repo = Arc::new(InMemoryPaymentRepository::new());
    let state = AppState::from_repositories(
        repo.clone() as DynPaymentQueryRepository,
        repo.clone() as DynPaymentCommandRepository,
    )
    .await;
    (repo, AppRouter::build(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, location, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn payment_body(value: f64, category: &str, kind: &str, date: &str) -> Value {
    json!({
        "value": value,
        "category": category,
        "type": kind,
        "dateOccurred": date,
    })
}

async fn seed(app: &Router, count: usize) {
    for i in 0..count {
        let date = format!("2018-03-{:02}T10:00:00Z", 1 + i / 2);
        let body = payment_body(i as f64, "FOOD", "DEBT", &date);
        let (status, _, _) = send(app, with_json("POST", "/api/payments", &body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn health_check_is_ok() {
    let (_, app) = app().await;

    let (status, _, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn create_returns_location_of_new_payment() {
    let (_, app) = app().await;
    let body = payment_body(42.5, "TRANSPORT", "DEBT", "2018-05-01T08:00:00Z");

    let (status, location, created) = send(&app, with_json("POST", "/api/payments", &body)).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let location = location.unwrap();
    assert_eq!(location, format!("/api/payments/{id}"));

    let (status, _, fetched) = send(&app, get(&location)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["value"], 42.5);
    assert_eq!(fetched["data"]["category"], "TRANSPORT");
    assert_eq!(fetched["data"]["type"], "DEBT");
}

#[tokio::test]
async fn invalid_body_is_rejected_with_error_envelope() {
    let (repo, app) = app().await;
    let unknown_category = payment_body(1.0, "GAMBLING", "DEBT", "2018-05-01T08:00:00Z");
    let too_large = payment_body(5e13, "FOOD", "DEBT", "2018-05-01T08:00:00Z");

    for body in [unknown_category, too_large] {
        let (status, _, error) = send(&app, with_json("POST", "/api/payments", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["status"], "error");
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn put_stores_payment_under_given_id() {
    let (_, app) = app().await;
    let id = "7d3f0c4e-2b1a-4f7e-9a55-0c1d2e3f4a5b";
    let uri = format!("/api/payments/{id}");

    let first = payment_body(10.0, "HOUSING", "DEBT", "2018-01-05T00:00:00Z");
    let (status, location, _) = send(&app, with_json("PUT", &uri, &first)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some(uri.as_str()));

    let second = payment_body(20.0, "SALARY", "CREDIT", "2018-01-06T00:00:00Z");
    let (status, _, _) = send(&app, with_json("PUT", &uri, &second)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, _, fetched) = send(&app, get(&uri)).await;
    assert_eq!(fetched["data"]["value"], 20.0);
    assert_eq!(fetched["data"]["type"], "CREDIT");

    let (_, _, count) = send(&app, get("/api/payments/count")).await;
    assert_eq!(count["data"], 1);
}

#[tokio::test]
async fn malformed_and_unknown_ids() {
    let (_, app) = app().await;
    let body = payment_body(10.0, "FOOD", "DEBT", "2018-01-05T00:00:00Z");

    let (status, _, _) = send(&app, with_json("PUT", "/api/payments/not-a-uuid", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, get("/api/payments/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, error) = send(
        &app,
        get("/api/payments/00000000-0000-0000-0000-000000000001"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["status"], "error");
}

#[tokio::test]
async fn next_page_urls_walk_the_whole_collection() {
    let (_, app) = app().await;
    seed(&app, 25).await;

    let (status, _, first) = send(&app, get("/api/payments?pageSize=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["totalCount"], 25);
    assert_eq!(first["data"]["payments"].as_array().unwrap().len(), 10);
    assert_eq!(first["data"]["hasNext"], true);

    let token = first["data"]["continuationToken"].as_str().unwrap();
    assert_eq!(
        first["data"]["nextPageUrl"],
        format!("/api/payments?pageSize=10&continuationToken={token}")
    );

    let mut seen: Vec<String> = Vec::new();
    let mut page = first;
    loop {
        seen.extend(
            page["data"]["payments"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["id"].as_str().unwrap().to_string()),
        );

        let next = page["data"]["nextPageUrl"].as_str().map(str::to_string);
        match next {
            Some(next) => page = send(&app, get(&next)).await.2,
            None => break,
        }
    }

    assert_eq!(seen.len(), 25);
    let mut unique = seen.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 25);
}

#[tokio::test]
async fn last_page_has_no_token_or_url() {
    let (_, app) = app().await;
    seed(&app, 3).await;

    let (_, _, page) = send(&app, get("/api/payments?pageSize=garbage")).await;

    assert_eq!(page["data"]["payments"].as_array().unwrap().len(), 3);
    assert_eq!(page["data"]["hasNext"], false);
    assert!(page["data"].get("continuationToken").is_none());
    assert!(page["data"].get("nextPageUrl").is_none());
}

#[tokio::test]
async fn repeated_paging_params_keep_first_value() {
    let (_, app) = app().await;
    seed(&app, 12).await;

    let (_, _, expected) = send(&app, get("/api/payments?pageSize=5")).await;
    let (status, _, page) = send(
        &app,
        get("/api/payments?pageSize=5&pageSize=x&continuationToken=zz&continuationToken=yy"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"]["payments"].as_array().unwrap().len(), 5);
    assert_eq!(page["data"]["payments"], expected["data"]["payments"]);
    assert_eq!(page["data"]["hasNext"], true);
}

#[tokio::test]
async fn delete_all_empties_the_collection() {
    let (_, app) = app().await;
    seed(&app, 4).await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/payments")
        .body(Body::empty())
        .unwrap();
    let (status, _, deleted) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"], 4);

    let (_, _, count) = send(&app, get("/api/payments/count")).await;
    assert_eq!(count["data"], 0);
}

#[tokio::test]
async fn stats_report_debits_by_category() {
    let (_, app) = app().await;
    for body in [
        payment_body(30.0, "FOOD", "DEBT", "2018-02-01T00:00:00Z"),
        payment_body(70.0, "HOUSING", "DEBIT", "2018-06-01T00:00:00Z"),
        payment_body(1000.0, "SALARY", "CREDIT", "2018-06-01T00:00:00Z"),
        payment_body(500.0, "FOOD", "DEBT", "2019-02-01T00:00:00Z"),
    ] {
        send(&app, with_json("POST", "/api/payments", &body)).await;
    }

    let (status, _, stats) = send(
        &app,
        get("/api/payments/stats?from=2018-01-01&to=2019-01-01"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["spendingsSum"], 100.0);
    assert_eq!(
        stats["data"]["spendingsByCategorySum"],
        json!({ "FOOD": 30.0, "HOUSING": 70.0 })
    );
    assert_eq!(
        stats["data"]["spendingsByCategoryPercent"],
        json!({ "FOOD": 30.0, "HOUSING": 70.0 })
    );
}

#[tokio::test]
async fn stats_without_debits_are_zero() {
    let (_, app) = app().await;

    let (status, _, stats) = send(
        &app,
        get("/api/payments/stats?from=2018-01-01&to=2019-01-01"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["spendingsSum"], 0.0);
    assert_eq!(stats["data"]["spendingsByCategoryPercent"], json!({}));
}

#[tokio::test]
async fn repeated_stats_params_keep_first_value() {
    let (_, app) = app().await;
    for body in [
        payment_body(40.0, "FOOD", "DEBT", "2018-03-01T00:00:00Z"),
        payment_body(60.0, "FOOD", "DEBT", "2020-03-01T00:00:00Z"),
    ] {
        send(&app, with_json("POST", "/api/payments", &body)).await;
    }

    let (status, _, stats) = send(
        &app,
        get("/api/payments/stats?from=2018-01-01&from=2020-01-01&to=2019-01-01&to=2021-01-01"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["spendingsSum"], 40.0);
}

#[tokio::test]
async fn inverted_stats_period_is_bad_request() {
    let (_, app) = app().await;

    let (status, _, error) = send(
        &app,
        get("/api/payments/stats?from=2019-01-01&to=2018-01-01"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["status"], "error");
}
