// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("parent comment {0} not found")]
    ParentNotFound(i64),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("store failure: {0}")]
    Store(String),

    #[error("document index failure: {0}")]
    Index(String),

    #[error("cache failure: {0}")]
    Cache(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Downstream failures that may succeed when retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::Index(_) | Self::Cache(_) | Self::Infrastructure(_)
        )
    }

    /// Prefix downstream failures with the operation that hit them.
    /// Business errors pass through untouched.
    #[must_use]
    pub fn with_context(self, operation: &str) -> Self {
        match self {
            Self::Store(msg) => Self::Store(format!("{operation}: {msg}")),
            Self::Index(msg) => Self::Index(format!("{operation}: {msg}")),
            Self::Cache(msg) => Self::Cache(format!("{operation}: {msg}")),
            Self::Infrastructure(msg) => Self::Infrastructure(format!("{operation}: {msg}")),
            other => other,
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::Conflict(msg) => Self::AlreadyExists(msg),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::Persistence(msg) => Self::Store(msg),
            DomainError::Index(msg) => Self::Index(msg),
        }
    }
}
