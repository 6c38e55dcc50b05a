use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let command = RegisterUserCommand::new(email, body.password);

    state
        .user_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|pending| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    detail: "user created, please confirm your email".to_string(),
                    confirmation_url: format!("/confirm/{}", pending.confirmation_token),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub detail: String,
    pub confirmation_url: String,
}
