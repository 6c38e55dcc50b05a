use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CommentData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<CreateCommentRequestBody>,
) -> Result<ApiSuccess<CommentData>, ApiError> {
    let command = CreateCommentCommand {
        post_id: body.post_id,
        body: body.body,
    };

    state
        .post_service
        .create_comment(current_user.user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| ApiSuccess::new(StatusCode::CREATED, comment.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequestBody {
    body: String,
    post_id: i64,
}
