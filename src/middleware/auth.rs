//! Access guard: extracts and verifies the bearer token from incoming
//! requests, optionally restricts by role, and attaches the caller's
//! identity to the request extensions for downstream handlers.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::AppState;

/// Verified identity attached to the request after the guard passes.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Core guard. With `allowed` set, the request is rejected unless the
/// token's role is a member of the allow-list.
pub async fn guard(
    state: Arc<AppState>,
    allowed: Option<&'static [Role]>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req).ok_or(AppError::MissingToken)?;
    let claims = state.tokens.verify(token)?;

    if let Some(allowed) = allowed {
        if !allowed.contains(&claims.role) {
            tracing::warn!(
                role = claims.role.as_str(),
                "access denied: role not in route allow-list"
            );
            return Err(AppError::Forbidden(claims.role.as_str().to_string()));
        }
    }

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role: claims.role,
    });
    Ok(next.run(req).await)
}

/// Guard shape for `axum::middleware::from_fn_with_state` when no role
/// restriction applies.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(state, None, req, next).await
}

// ── Tests ───────────────────────────────────────────────────────
