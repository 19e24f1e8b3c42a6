use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::AppState;

pub mod handlers;

/// Build the API router. Route shapes mirror the dashboard's contract:
/// `/user/*` for registration and signin, `/logged/*` for log queries.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/test", get(test_endpoint))
        .route("/user/home", get(user_home))
        .route("/user/signup", post(handlers::signup))
        .route("/user/signin", post(handlers::signin))
        .route("/logged/data", get(handlers::logged_data))
        .route("/logged/all", get(handlers::logged_all))
        .fallback(fallback_404)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "message": "This is test endpoint." }))
}

async fn user_home() -> Json<serde_json::Value> {
    Json(json!({ "message": "This is home endpoint route." }))
}
