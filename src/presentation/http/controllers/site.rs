use crate::application::{
    dto::{CategoryDto, FriendLinkDto, Page},
    site::{CreateFriendLinkCommand, SiteListQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminUser;
use crate::presentation::http::openapi::DeletedResponse;
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

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFriendLinkRequest {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SiteListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Case-insensitive fragment of the name.
    pub key: Option<String>,
}

impl From<SiteListParams> for SiteListQuery {
    fn from(params: SiteListParams) -> Self {
        Self {
            page: params.page,
            page_size: params.page_size,
            key: params.key,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses((status = 200, description = "Created category.", body = ApiResponse<CategoryDto>)),
    tag = "Site"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    _admin: AdminUser,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> HttpResult<ApiResponse<CategoryDto>> {
    let Json(payload) = payload?;
    state
        .services
        .categories
        .create_category(payload.name)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(SiteListParams),
    responses((status = 200, description = "A page of categories.", body = ApiResponse<Page<CategoryDto>>)),
    tag = "Site"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
    params: Result<Query<SiteListParams>, QueryRejection>,
) -> HttpResult<ApiResponse<Page<CategoryDto>>> {
    let Query(params) = params?;
    state
        .services
        .categories
        .list_categories(params.into())
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    responses((status = 200, description = "Rows deleted, 0 when already gone.", body = ApiResponse<DeletedResponse>)),
    tag = "Site"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    _admin: AdminUser,
    id: Result<Path<i64>, PathRejection>,
) -> HttpResult<ApiResponse<DeletedResponse>> {
    let Path(id) = id?;
    let deleted = state
        .services
        .categories
        .delete_category(id)
        .await
        .into_http()?;
    Ok(ApiResponse::ok(DeletedResponse { deleted }))
}

#[utoipa::path(
    post,
    path = "/api/friend-links",
    request_body = CreateFriendLinkRequest,
    responses((status = 200, description = "Created friend link.", body = ApiResponse<FriendLinkDto>)),
    tag = "Site"
)]
pub async fn create_friend_link(
    Extension(state): Extension<HttpState>,
    _admin: AdminUser,
    payload: Result<Json<CreateFriendLinkRequest>, JsonRejection>,
) -> HttpResult<ApiResponse<FriendLinkDto>> {
    let Json(payload) = payload?;
    state
        .services
        .friend_links
        .create_friend_link(CreateFriendLinkCommand {
            name: payload.name,
            link: payload.link,
        })
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/friend-links",
    params(SiteListParams),
    responses((status = 200, description = "A page of friend links.", body = ApiResponse<Page<FriendLinkDto>>)),
    tag = "Site"
)]
pub async fn list_friend_links(
    Extension(state): Extension<HttpState>,
    params: Result<Query<SiteListParams>, QueryRejection>,
) -> HttpResult<ApiResponse<Page<FriendLinkDto>>> {
    let Query(params) = params?;
    state
        .services
        .friend_links
        .list_friend_links(params.into())
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    delete,
    path = "/api/friend-links/{id}",
    params(("id" = i64, Path, description = "Friend link id")),
    responses((status = 200, description = "Rows deleted, 0 when already gone.", body = ApiResponse<DeletedResponse>)),
    tag = "Site"
)]
pub async fn delete_friend_link(
    Extension(state): Extension<HttpState>,
    _admin: AdminUser,
    id: Result<Path<i64>, PathRejection>,
) -> HttpResult<ApiResponse<DeletedResponse>> {
    let Path(id) = id?;
    let deleted = state
        .services
        .friend_links
        .delete_friend_link(id)
        .await
        .into_http()?;
    Ok(ApiResponse::ok(DeletedResponse { deleted }))
}
