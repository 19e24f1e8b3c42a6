//! Route-level tests that never reach the database: health-style
//! endpoints, the 404 fallback, and signup validation failures (which
//! reject before any store access — the state's pool is lazy, so a
//! query would fail loudly if one slipped through).

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use logview::auth::token::TokenService;
use logview::store::postgres::PgStore;
use logview::{api, config, AppState};

fn app_with_db(database_url: &str) -> Router {
    let state = Arc::new(AppState {
        db: PgStore::connect_lazy(database_url).unwrap(),
        tokens: TokenService::new("route-test-secret"),
        config: config::Config {
            port: 0,
            database_url: database_url.into(),
            jwt_secret: "route-test-secret".into(),
            dashboard_origin: "http://localhost:5173".into(),
        },
    });
    api::api_router().with_state(state)
}

/// Lazy pool that is never queried by the routes under test.
fn test_app() -> Router {
    app_with_db("postgres://localhost/logview_test_unused")
}

/// Lazy pool pointing at a closed port: any query fails with a
/// connection error.
fn unreachable_db_app() -> Router {
    app_with_db("postgres://127.0.0.1:59999/unreachable")
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_endpoint_responds() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "This is test endpoint.");
}

#[tokio::test]
async fn user_home_responds() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/user/home")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let resp = test_app()
        .oneshot(post_json(
            "/user/signup",
            serde_json::json!({
                "name": "Asha",
                "email": "asha@example.com",
                "password": "abc"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "password must be at least 4 characters");
}

#[tokio::test]
async fn signup_rejects_blank_name_and_email() {
    let resp = test_app()
        .oneshot(post_json(
            "/user/signup",
            serde_json::json!({ "name": " ", "email": "a@x.com", "password": "longenough" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test_app()
        .oneshot(post_json(
            "/user/signup",
            serde_json::json!({ "name": "Asha", "email": "", "password": "longenough" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_surfaces_as_generic_500() {
    // The lazy pool points at a closed port, so the first query fails
    // with a connection error; the handler must map it to a 500 with
    // the generic message, never the underlying cause.
    let resp = unreachable_db_app()
        .oneshot(
            Request::builder()
                .uri("/logged/data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "Something went wrong.");

    let resp = unreachable_db_app()
        .oneshot(
            Request::builder()
                .uri("/logged/all")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "Something went wrong.");
}

#[tokio::test]
async fn signup_rejects_missing_fields() {
    // Missing required fields fail at the JSON extractor.
    let resp = test_app()
        .oneshot(post_json(
            "/user/signup",
            serde_json::json!({ "email": "a@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
