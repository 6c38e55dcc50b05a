use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::post::models::PostSorting;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostWithLikesData;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<ApiSuccess<Vec<PostWithLikesData>>, ApiError> {
    state
        .post_service
        .get_posts(params.sorting.into())
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            let post_data: Vec<PostWithLikesData> = posts.iter().map(|p| p.into()).collect();
            ApiSuccess::new(StatusCode::OK, post_data)
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListPostsParams {
    #[serde(default)]
    sorting: PostSortingParam,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSortingParam {
    #[default]
    New,
    Old,
    MostLikes,
}

impl From<PostSortingParam> for PostSorting {
    fn from(param: PostSortingParam) -> Self {
        match param {
            PostSortingParam::New => PostSorting::New,
            PostSortingParam::Old => PostSorting::Old,
            PostSortingParam::MostLikes => PostSorting::MostLikes,
        }
    }
}
