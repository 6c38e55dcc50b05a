use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CommentData;
use crate::inbound::http::router::AppState;

pub async fn get_post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    state
        .post_service
        .get_comments(post_id)
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            let comment_data: Vec<CommentData> = comments.iter().map(|c| c.into()).collect();
            ApiSuccess::new(StatusCode::OK, comment_data)
        })
}
