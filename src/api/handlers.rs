use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::password;
use crate::errors::AppError;
use crate::models::log::page_window;
use crate::models::user::{NewUser, Role, UserResponse};
use crate::AppState;

// ── Request / Response DTOs ──────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to Employee when omitted.
    pub role: Option<Role>,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SigninResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

#[derive(Deserialize)]
pub struct LogPageParams {
    pub skip: Option<i64>,
    pub load: Option<i64>,
}

// ── Handlers ─────────────────────────────────────────────────

/// POST /user/signup — register a new user.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".into()));
    }
    if payload.password.len() < 4 {
        return Err(AppError::Validation(
            "password must be at least 4 characters".into(),
        ));
    }

    // Early exit for the common case; the unique constraint on email
    // remains the authority if a concurrent signup slips past this.
    if state.db.find_user_by_email(&payload.email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let user = state
        .db
        .insert_user(&NewUser {
            name: payload.name,
            email: payload.email,
            password_hash: password::hash_password(&payload.password)?,
            role: payload.role.unwrap_or(Role::Employee),
        })
        .await?;

    tracing::info!(user_id = %user.id, "user signed up");

    Ok(Json(SignupResponse {
        message: "Signup successful!".into(),
        user: user.into(),
    }))
}

/// POST /user/signin — verify credentials and issue a bearer token.
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, AppError> {
    let user = state
        .db
        .find_user_by_email(&payload.email)
        .await?
        .ok_or(AppError::NoSuchUser)?;

    // Same response for unknown email and wrong password.
    if !password::verify_password(&user.password_hash, &payload.password)? {
        return Err(AppError::NoSuchUser);
    }

    let token = state.tokens.issue(user.id, user.role)?;

    tracing::info!(user_id = %user.id, "user signed in");

    Ok(Json(SigninResponse {
        message: "Signin successful! Welcome back.".into(),
        user: user.into(),
        token,
    }))
}

/// GET /logged/data?skip&load — most-recent-first page of log records.
/// An empty store is a distinct (still successful) response, not an error.
pub async fn logged_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogPageParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (skip, load) = page_window(params.skip, params.load);
    let data = state.db.page_logs(skip, load).await?;

    if data.is_empty() {
        return Ok(Json(json!({ "message": "log is empty" })));
    }
    Ok(Json(json!({ "message": "Logged data", "data": data })))
}

/// GET /logged/all — status-count summary for the dashboard cards.
/// Field names (`sucess_data` included) are the wire contract the
/// dashboard consumes; do not "fix" them without migrating it.
pub async fn logged_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let counts = state.db.count_logs_by_status().await?;

    Ok(Json(json!({
        "message": "Logged data",
        "all_data": counts.total,
        "sucess_data": counts.success,
        "failure_data": counts.failure,
    })))
}
