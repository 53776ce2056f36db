// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, comments, site},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route(
            "/api/articles",
            get(articles::search_articles)
                .post(articles::create_article)
                .delete(articles::delete_articles),
        )
        .route("/api/articles/stats", get(articles::article_stats))
        .route(
            "/api/articles/{id}",
            get(articles::get_article).put(articles::update_article),
        )
        .route(
            "/api/articles/{id}/digg",
            post(articles::digg_article).delete(articles::undigg_article),
        )
        .route(
            "/api/articles/{id}/collect",
            post(articles::collect_article).delete(articles::uncollect_article),
        )
        .route(
            "/api/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/comments/{id}", delete(comments::delete_comment))
        .route("/api/users/me/comments", get(comments::my_comments))
        .route(
            "/api/categories",
            get(site::list_categories).post(site::create_category),
        )
        .route("/api/categories/{id}", delete(site::delete_category))
        .route(
            "/api/friend-links",
            get(site::list_friend_links).post(site::create_friend_link),
        )
        .route("/api/friend-links/{id}", delete(site::delete_friend_link))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

/// Any origin when none are configured; otherwise only the listed ones.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse::ok())
}
