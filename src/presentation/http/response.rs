// src/presentation/http/response.rs
//! The `{code, data, msg}` envelope every endpoint answers with.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    AlreadyExists,
    RateLimited,
    Validation,
    Internal,
}

impl ResponseCode {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Success => 2000,
            Self::BadRequest => 4000,
            Self::Unauthorized => 4001,
            Self::Forbidden => 4003,
            Self::NotFound => 4004,
            Self::AlreadyExists => 4009,
            Self::RateLimited => 4029,
            Self::Validation => 4422,
            Self::Internal => 5000,
        }
    }

    /// Only authentication failures leave the 200 status line.
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::OK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub data: Option<T>,
    pub msg: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: ResponseCode::Success.as_u16(),
            data: Some(data),
            msg: "success".into(),
        }
    }

    pub fn failure(code: ResponseCode, msg: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            data: None,
            msg: msg.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = [ResponseCode::Unauthorized, ResponseCode::Forbidden]
            .into_iter()
            .find(|code| code.as_u16() == self.code)
            .map_or(StatusCode::OK, ResponseCode::http_status);
        (status, Json(self)).into_response()
    }
}
