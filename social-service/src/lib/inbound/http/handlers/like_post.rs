use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::post::models::LikePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostLikeData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn like_post(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<LikePostRequestBody>,
) -> Result<ApiSuccess<PostLikeData>, ApiError> {
    let command = LikePostCommand {
        post_id: body.post_id,
    };

    state
        .post_service
        .like_post(current_user.user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref like| ApiSuccess::new(StatusCode::CREATED, like.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LikePostRequestBody {
    post_id: i64,
}
