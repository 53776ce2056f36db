// src/presentation/http/openapi.rs
use crate::application::dto::{
    ArticleDto, ArticleStatsDto, CategoryDto, CommentDto, FriendLinkDto, Page,
};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use super::response::ApiResponse;

pub const DEFAULT_SNAPSHOT_PATH: &str = "openapi/openapi.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: u64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::articles::search_articles,
        crate::presentation::http::controllers::articles::article_stats,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::delete_articles,
        crate::presentation::http::controllers::articles::digg_article,
        crate::presentation::http::controllers::articles::undigg_article,
        crate::presentation::http::controllers::articles::collect_article,
        crate::presentation::http::controllers::articles::uncollect_article,
        crate::presentation::http::controllers::comments::create_comment,
        crate::presentation::http::controllers::comments::list_comments,
        crate::presentation::http::controllers::comments::delete_comment,
        crate::presentation::http::controllers::comments::my_comments,
        crate::presentation::http::controllers::site::create_category,
        crate::presentation::http::controllers::site::list_categories,
        crate::presentation::http::controllers::site::delete_category,
        crate::presentation::http::controllers::site::create_friend_link,
        crate::presentation::http::controllers::site::list_friend_links,
        crate::presentation::http::controllers::site::delete_friend_link,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            DeletedResponse,
            ArticleDto,
            ArticleStatsDto,
            CommentDto,
            CategoryDto,
            FriendLinkDto,
            Page<ArticleDto>,
            Page<CommentDto>,
            Page<CategoryDto>,
            Page<FriendLinkDto>,
            ApiResponse<ArticleDto>,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::UpdateArticleRequest,
            crate::presentation::http::controllers::articles::DeleteArticlesRequest,
            crate::presentation::http::controllers::comments::CreateCommentRequest,
            crate::presentation::http::controllers::site::CreateCategoryRequest,
            crate::presentation::http::controllers::site::CreateFriendLinkRequest
        )
    ),
    tags(
        (name = "Articles", description = "Article content, search and reactions"),
        (name = "Comments", description = "Threaded comments"),
        (name = "Site", description = "Categories and friend links"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Inkpost API",
        description = "Blog backend: articles, search, threaded comments and site links",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// Swagger UI at `/docs`, the JSON document at `/openapi.json`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Write the document to `OPENAPI_SNAPSHOT_PATH` and return the path used.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let doc = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(output_path)
}
