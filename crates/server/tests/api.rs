use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["alice".into(), "password".into()],
    ))
    .await
    .unwrap();

    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

fn basic_auth() -> String {
    format!("Basic {}", STANDARD.encode("alice:password"))
}

fn dinner() -> Value {
    json!({
        "title": "Dinner",
        "amount": 40.0,
        "paid_by": "Alice",
        "participants": [
            { "participant": "Alice", "amount": 20.0 },
            { "participant": "Bob", "amount": 20.0 },
        ],
    })
}

fn request(method: &str, uri: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth())
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(body) => builder
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn requests_without_credentials_are_rejected() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/expenses")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = format!("Basic {}", STANDARD.encode("alice:nope"));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/expenses")
                .header(header::AUTHORIZATION, wrong_password)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_list_returns_the_expense() {
    let app = app().await;

    let (status, body) = send(&app, request("POST", "/expenses", Some(&dinner()))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());

    let (status, body) = send(&app, request("GET", "/expenses", None)).await;
    assert_eq!(status, StatusCode::OK);
    let expenses = body["expenses"].as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["title"], "Dinner");
    assert_eq!(expenses[0]["amount"], 40.0);
    assert_eq!(expenses[0]["participants"][0]["participant"], "Alice");
    assert_eq!(expenses[0]["participants"][1]["participant"], "Bob");
}

#[tokio::test]
async fn invalid_expense_is_unprocessable() {
    let app = app().await;

    let mut mismatch = dinner();
    mismatch["participants"][1]["amount"] = json!(10.0);
    let (status, body) = send(&app, request("POST", "/expenses", Some(&mismatch))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (_, body) = send(&app, request("GET", "/expenses", None)).await;
    assert!(body["expenses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let app = app().await;

    let (_, created) = send(&app, request("POST", "/expenses", Some(&dinner()))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut updated = dinner();
    updated["title"] = json!("Dinner out");
    let (status, _) = send(
        &app,
        request("PATCH", &format!("/expenses/{id}"), Some(&updated)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, request("GET", "/expenses", None)).await;
    assert_eq!(body["expenses"][0]["title"], "Dinner out");

    let (status, _) = send(&app, request("DELETE", &format!("/expenses/{id}"), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request("DELETE", &format!("/expenses/{id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, request("GET", "/expenses", None)).await;
    assert!(body["expenses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_never_moves_the_creation_timestamp() {
    let app = app().await;

    let mut expense = dinner();
    expense["created_at"] = json!("2026-01-02T03:04:05+00:00");
    let (_, created) = send(&app, request("POST", "/expenses", Some(&expense))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (_, body) = send(&app, request("GET", "/expenses", None)).await;
    let created_at = body["expenses"][0]["created_at"].clone();

    let mut updated = dinner();
    updated["title"] = json!("Dinner out");
    // A stray timestamp in the payload is not part of the update contract.
    updated["created_at"] = json!("2027-06-07T08:09:10+00:00");
    let (status, _) = send(
        &app,
        request("PATCH", &format!("/expenses/{id}"), Some(&updated)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, request("GET", "/expenses", None)).await;
    assert_eq!(body["expenses"][0]["title"], "Dinner out");
    assert_eq!(body["expenses"][0]["created_at"], created_at);
}

#[tokio::test]
async fn balances_report_gross_debts() {
    let app = app().await;

    send(&app, request("POST", "/expenses", Some(&dinner()))).await;
    let drinks = json!({
        "title": "Drinks",
        "amount": 30.0,
        "paid_by": "Bob",
        "participants": [
            { "participant": "Bob", "amount": 15.0 },
            { "participant": "Alice", "amount": 15.0 },
        ],
    });
    send(&app, request("POST", "/expenses", Some(&drinks))).await;

    let (status, body) = send(&app, request("GET", "/balances", None)).await;
    assert_eq!(status, StatusCode::OK);

    let debts = body["debts"].as_array().unwrap();
    // Both directions stay, nothing is netted.
    assert!(debts.contains(&json!({
        "debtor": "Bob", "creditor": "Alice", "amount": 20.0
    })));
    assert!(debts.contains(&json!({
        "debtor": "Alice", "creditor": "Bob", "amount": 15.0
    })));
}

#[tokio::test]
async fn stats_totals_the_collection() {
    let app = app().await;

    send(&app, request("POST", "/expenses", Some(&dinner()))).await;

    let (status, body) = send(&app, request("GET", "/stats", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], 40.0);
    assert_eq!(body["expense_count"], 1);
}

#[tokio::test]
async fn share_link_round_trip_without_credentials() {
    let app = app().await;

    send(&app, request("POST", "/expenses", Some(&dinner()))).await;

    let share = json!({ "person": "Bob", "owed_to": "Alice" });
    let (status, body) = send(&app, request("POST", "/share", Some(&share))).await;
    assert_eq!(status, StatusCode::CREATED);
    let data = body["data"].as_str().unwrap().to_string();

    // The view is public: no Authorization header.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/share?data={data}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["person"], "Bob");
    assert_eq!(body["owedTo"], "Alice");
    assert_eq!(body["totalOwed"], 20.0);
    assert_eq!(body["expenses"][0]["title"], "Dinner");
    assert_eq!(body["expenses"][0]["totalAmount"], 40.0);
    assert_eq!(body["expenses"][0]["paidBy"], "Alice");
}

#[tokio::test]
async fn share_view_rejects_garbage_data() {
    let app = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/share?data=%21%21%21")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
