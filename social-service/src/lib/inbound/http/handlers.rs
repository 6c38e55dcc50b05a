use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostLike;
use crate::domain::post::models::PostWithLikes;
use crate::domain::user::errors::UserError;

pub mod confirm_email;
pub mod create_comment;
pub mod create_post;
pub mod get_post;
pub mod get_post_comments;
pub mod like_post;
pub mod list_posts;
pub mod login;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();

        // Bearer challenge on every auth failure
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyRegistered(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials
            | UserError::UserNotConfirmed
            | UserError::NoSuchUser
            | UserError::Token(_) => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidEmail(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(_) => ApiError::NotFound(err.to_string()),
            PostError::DatabaseError(_) | PostError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            body: post.body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithLikesData {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
    pub likes: i64,
}

impl From<&PostWithLikes> for PostWithLikesData {
    fn from(post: &PostWithLikes) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            body: post.body.clone(),
            likes: post.likes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub body: String,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            body: comment.body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLikeData {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
}

impl From<&PostLike> for PostLikeData {
    fn from(like: &PostLike) -> Self {
        Self {
            id: like.id,
            post_id: like.post_id,
            user_id: like.user_id,
        }
    }
}
