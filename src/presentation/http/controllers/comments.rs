// src/presentation/http/controllers/comments.rs
use crate::application::{
    comments::{CreateCommentCommand, UserCommentsQuery},
    dto::{CommentDto, Page},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AdminUser, Authenticated};
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
pub struct CreateCommentRequest {
    pub article_id: String,
    pub parent_comment_id: Option<i64>,
    pub content: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentListParams {
    pub article_id: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserCommentsParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// `created_at`, `digg_count` or `comment_count`.
    pub sort_by: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentRequest,
    responses((status = 200, description = "Created comment.", body = ApiResponse<CommentDto>)),
    tag = "Comments"
)]
pub async fn create_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> HttpResult<ApiResponse<CommentDto>> {
    let Json(payload) = payload?;
    state
        .services
        .comments
        .create_comment(
            &user,
            CreateCommentCommand {
                article_id: payload.article_id,
                parent_id: payload.parent_comment_id,
                content: payload.content,
            },
        )
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/comments",
    params(CommentListParams),
    responses((status = 200, description = "Comment tree of the article.", body = ApiResponse<Vec<CommentDto>>)),
    tag = "Comments"
)]
pub async fn list_comments(
    Extension(state): Extension<HttpState>,
    params: Result<Query<CommentListParams>, QueryRejection>,
) -> HttpResult<ApiResponse<Vec<CommentDto>>> {
    let Query(params) = params?;
    state
        .services
        .comments
        .list_article_comments(&params.article_id)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Rows soft-deleted, replies included.", body = ApiResponse<DeletedResponse>)),
    tag = "Comments"
)]
pub async fn delete_comment(
    Extension(state): Extension<HttpState>,
    _admin: AdminUser,
    id: Result<Path<i64>, PathRejection>,
) -> HttpResult<ApiResponse<DeletedResponse>> {
    let Path(id) = id?;
    let deleted = state
        .services
        .comments
        .delete_comment(id)
        .await
        .into_http()?;
    Ok(ApiResponse::ok(DeletedResponse { deleted }))
}

#[utoipa::path(
    get,
    path = "/api/users/me/comments",
    params(UserCommentsParams),
    responses((status = 200, description = "The caller's comments.", body = ApiResponse<Page<CommentDto>>)),
    tag = "Comments"
)]
pub async fn my_comments(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    params: Result<Query<UserCommentsParams>, QueryRejection>,
) -> HttpResult<ApiResponse<Page<CommentDto>>> {
    let Query(params) = params?;
    state
        .services
        .comments
        .list_user_comments(
            user.id,
            UserCommentsQuery {
                page: params.page,
                page_size: params.page_size,
                sort_by: params.sort_by,
            },
        )
        .await
        .into_http()
        .map(ApiResponse::ok)
}
