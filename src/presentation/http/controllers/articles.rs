// src/presentation/http/controllers/articles.rs
use crate::application::{
    articles::{CreateArticleCommand, SearchArticlesQuery, UpdateArticleCommand},
    dto::{ArticleDto, ArticleStatsDto, Page},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AdminUser, Authenticated};
use crate::presentation::http::openapi::{DeletedResponse, StatusResponse};
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{
        Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ArticleSearchParams {
    /// Free-text query over title, abstract and content.
    pub key: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_field: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cover_id: u64,
    #[serde(default)]
    pub cover_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub cover_id: Option<u64>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteArticlesRequest {
    pub id_list: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleSearchParams),
    responses((status = 200, description = "Matching articles.", body = ApiResponse<Page<ArticleDto>>)),
    tag = "Articles"
)]
pub async fn search_articles(
    Extension(state): Extension<HttpState>,
    params: Result<Query<ArticleSearchParams>, QueryRejection>,
) -> HttpResult<ApiResponse<Page<ArticleDto>>> {
    let Query(params) = params?;
    state
        .services
        .articles
        .search_articles(SearchArticlesQuery {
            key: params.key,
            category: params.category,
            page: params.page,
            page_size: params.page_size,
            sort_field: params.sort_field,
            sort_order: params.sort_order,
        })
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/articles/stats",
    responses((status = 200, description = "Counter totals over all articles.", body = ApiResponse<ArticleStatsDto>)),
    tag = "Articles"
)]
pub async fn article_stats(
    Extension(state): Extension<HttpState>,
) -> HttpResult<ApiResponse<ArticleStatsDto>> {
    state
        .services
        .articles
        .article_stats()
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(("id" = String, Path, description = "Article id")),
    responses((status = 200, description = "The article; counts a view.", body = ApiResponse<ArticleDto>)),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    id: Result<Path<String>, PathRejection>,
) -> HttpResult<ApiResponse<ArticleDto>> {
    let Path(id) = id?;
    state
        .services
        .articles
        .get_article(&id)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = CreateArticleRequest,
    responses((status = 200, description = "Created article.", body = ApiResponse<ArticleDto>)),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    AdminUser(user): AdminUser,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> HttpResult<ApiResponse<ArticleDto>> {
    let Json(payload) = payload?;
    let command = CreateArticleCommand {
        id: state.services.next_article_id(),
        title: payload.title,
        summary: payload.summary,
        content: payload.content,
        category: payload.category,
        cover_id: payload.cover_id,
        cover_url: payload.cover_url,
        author_id: user.id.into(),
        author_name: user.name,
    };

    state
        .services
        .articles
        .create_article(command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(("id" = String, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses((status = 200, description = "Updated article.", body = ApiResponse<ArticleDto>)),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    _admin: AdminUser,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> HttpResult<ApiResponse<ArticleDto>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let command = UpdateArticleCommand {
        title: payload.title,
        summary: payload.summary,
        content: payload.content,
        category: payload.category,
        cover_id: payload.cover_id,
        cover_url: payload.cover_url,
    };

    state
        .services
        .articles
        .update_article(&id, command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    delete,
    path = "/api/articles",
    request_body = DeleteArticlesRequest,
    responses((status = 200, description = "Number of ids deleted.", body = ApiResponse<DeletedResponse>)),
    tag = "Articles"
)]
pub async fn delete_articles(
    Extension(state): Extension<HttpState>,
    _admin: AdminUser,
    payload: Result<Json<DeleteArticlesRequest>, JsonRejection>,
) -> HttpResult<ApiResponse<DeletedResponse>> {
    let Json(payload) = payload?;
    let deleted = state
        .services
        .articles
        .delete_articles(payload.id_list)
        .await
        .into_http()?;
    Ok(ApiResponse::ok(DeletedResponse {
        deleted: u64::try_from(deleted).unwrap_or(u64::MAX),
    }))
}

/// Which counter a reaction endpoint moves, and in which direction.
#[derive(Debug, Clone, Copy)]
enum Reaction {
    Digg,
    Undigg,
    Collect,
    Uncollect,
}

async fn react(
    state: &HttpState,
    id: Result<Path<String>, PathRejection>,
    reaction: Reaction,
) -> HttpResult<ApiResponse<StatusResponse>> {
    let Path(id) = id?;
    let articles = &state.services.articles;
    let outcome = match reaction {
        Reaction::Digg => articles.increment_digg(&id).await,
        Reaction::Undigg => articles.decrement_digg(&id).await,
        Reaction::Collect => articles.increment_collects(&id).await,
        Reaction::Uncollect => articles.decrement_collects(&id).await,
    };
    outcome.into_http()?;
    Ok(ApiResponse::ok(StatusResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/articles/{id}/digg",
    params(("id" = String, Path, description = "Article id")),
    responses((status = 200, description = "Like recorded.", body = ApiResponse<StatusResponse>)),
    tag = "Articles"
)]
pub async fn digg_article(
    Extension(state): Extension<HttpState>,
    _user: Authenticated,
    id: Result<Path<String>, PathRejection>,
) -> HttpResult<ApiResponse<StatusResponse>> {
    react(&state, id, Reaction::Digg).await
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}/digg",
    params(("id" = String, Path, description = "Article id")),
    responses((status = 200, description = "Like withdrawn.", body = ApiResponse<StatusResponse>)),
    tag = "Articles"
)]
pub async fn undigg_article(
    Extension(state): Extension<HttpState>,
    _user: Authenticated,
    id: Result<Path<String>, PathRejection>,
) -> HttpResult<ApiResponse<StatusResponse>> {
    react(&state, id, Reaction::Undigg).await
}

#[utoipa::path(
    post,
    path = "/api/articles/{id}/collect",
    params(("id" = String, Path, description = "Article id")),
    responses((status = 200, description = "Collect recorded.", body = ApiResponse<StatusResponse>)),
    tag = "Articles"
)]
pub async fn collect_article(
    Extension(state): Extension<HttpState>,
    _user: Authenticated,
    id: Result<Path<String>, PathRejection>,
) -> HttpResult<ApiResponse<StatusResponse>> {
    react(&state, id, Reaction::Collect).await
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}/collect",
    params(("id" = String, Path, description = "Article id")),
    responses((status = 200, description = "Collect withdrawn.", body = ApiResponse<StatusResponse>)),
    tag = "Articles"
)]
pub async fn uncollect_article(
    Extension(state): Extension<HttpState>,
    _user: Authenticated,
    id: Result<Path<String>, PathRejection>,
) -> HttpResult<ApiResponse<StatusResponse>> {
    react(&state, id, Reaction::Uncollect).await
}
