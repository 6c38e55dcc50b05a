use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::confirm_email::confirm_email;
use super::handlers::create_comment::create_comment;
use super::handlers::create_post::create_post;
use super::handlers::get_post::get_post;
use super::handlers::get_post_comments::get_post_comments;
use super::handlers::like_post::like_post;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::service::PostService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresPostRepository;
use crate::outbound::repositories::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub post_service: Arc<PostService<PostgresPostRepository>>,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    post_service: Arc<PostService<PostgresPostRepository>>,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
    };

    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/token", post(login))
        .route("/confirm/:token", get(confirm_email))
        .route("/post", get(list_posts))
        .route("/post/:post_id", get(get_post))
        .route("/post/:post_id/comment", get(get_post_comments));

    let protected_routes = Router::new()
        .route("/post", post(create_post))
        .route("/comment", post(create_comment))
        .route("/like", post(like_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
