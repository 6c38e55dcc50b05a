use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// OAuth2 password-flow login: form-encoded username (the email) and
/// password, answered with a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<LoginRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let user = state
        .user_service
        .authenticate(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?;

    let access_token = state
        .user_service
        .issue_access_token(user.email.as_str())
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            access_token,
            token_type: "bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}
