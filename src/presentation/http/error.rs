// src/presentation/http/error.rs
use crate::application::{ApplicationResult, error::ApplicationError};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};

use super::response::{ApiResponse, ResponseCode};

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug)]
pub struct HttpError {
    code: ResponseCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(msg) => Self::new(ResponseCode::Validation, msg),
            ApplicationError::ParentNotFound(id) => Self::new(
                ResponseCode::Validation,
                format!("parent comment {id} not found"),
            ),
            ApplicationError::NotFound(msg) => Self::new(ResponseCode::NotFound, msg),
            ApplicationError::AlreadyExists(msg) => Self::new(ResponseCode::AlreadyExists, msg),
            ApplicationError::RateLimited(msg) => Self::new(ResponseCode::RateLimited, msg),
            ApplicationError::Unauthorized(msg) => Self::new(ResponseCode::Unauthorized, msg),
            ApplicationError::Forbidden(msg) => Self::new(ResponseCode::Forbidden, msg),
            err @ (ApplicationError::Store(_)
            | ApplicationError::Index(_)
            | ApplicationError::Cache(_)
            | ApplicationError::Infrastructure(_)) => {
                tracing::error!(error = %err, "request failed");
                Self::new(ResponseCode::Internal, INTERNAL_MESSAGE.into())
            }
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ResponseCode::BadRequest, message.into())
    }

    pub fn code(&self) -> ResponseCode {
        self.code
    }

    fn new(code: ResponseCode, message: String) -> Self {
        Self { code, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        let body = ApiResponse::<()>::failure(self.code, self.message);
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
