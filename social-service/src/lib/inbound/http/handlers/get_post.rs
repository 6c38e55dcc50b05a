use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::post::models::PostWithComments;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CommentData;
use crate::inbound::http::handlers::PostWithLikesData;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<PostWithCommentsData>, ApiError> {
    state
        .post_service
        .get_post_with_comments(post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref result| ApiSuccess::new(StatusCode::OK, result.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithCommentsData {
    pub post: PostWithLikesData,
    pub comments: Vec<CommentData>,
}

impl From<&PostWithComments> for PostWithCommentsData {
    fn from(result: &PostWithComments) -> Self {
        Self {
            post: (&result.post).into(),
            comments: result.comments.iter().map(|c| c.into()).collect(),
        }
    }
}
