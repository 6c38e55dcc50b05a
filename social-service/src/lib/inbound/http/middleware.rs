use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved user of an authenticated request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

/// Middleware that resolves the bearer access token into a user and adds it
/// to the request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Resolve the token to a user; the service checks signature, expiry, and
    // token kind before touching storage
    let user = state
        .user_service
        .resolve_current_user(token)
        .await
        .map_err(|e| {
            tracing::warn!("Bearer token rejected: {}", e);
            ApiError::Unauthorized(e.to_string()).into_response()
        })?;

    req.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
