use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<CreatePostRequestBody>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = CreatePostCommand { body: body.body };

    state
        .post_service
        .create_post(current_user.user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequestBody {
    body: String,
}
