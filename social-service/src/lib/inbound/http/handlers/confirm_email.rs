use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<ApiSuccess<ConfirmResponseData>, ApiError> {
    state
        .user_service
        .confirm_email(&token)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ConfirmResponseData {
            detail: "user confirmed".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmResponseData {
    pub detail: String,
}
