// src/domain/comment/entity.rs
use crate::domain::article::ArticleId;
use crate::domain::comment::value_objects::{CommentContent, CommentId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::RecordMeta;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub meta: RecordMeta<CommentId>,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub digg_count: u64,
    pub comment_count: u64,
    pub article_id: ArticleId,
    pub user_id: UserId,
}

impl Comment {
    pub fn id(&self) -> CommentId {
        self.meta.id
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A sanitized comment ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: CommentContent,
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    #[default]
    CreatedAt,
    DiggCount,
    CommentCount,
}

impl CommentSort {
    pub fn column(&self) -> &'static str {
        match self {
            CommentSort::CreatedAt => "created_at",
            CommentSort::DiggCount => "digg_count",
            CommentSort::CommentCount => "comment_count",
        }
    }
}

impl FromStr for CommentSort {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        match value {
            "created_at" => Ok(CommentSort::CreatedAt),
            "digg_count" => Ok(CommentSort::DiggCount),
            "comment_count" => Ok(CommentSort::CommentCount),
            other => Err(DomainError::Validation(format!(
                "cannot sort comments by {other}"
            ))),
        }
    }
}
