use crate::domain::comment::{Comment, CommentNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

/// A comment together with its replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: i64,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    pub parent_comment_id: Option<i64>,
    pub content: String,
    pub digg_count: u64,
    pub comment_count: u64,
    pub article_id: String,
    pub user_id: i64,
    #[serde(default)]
    #[schema(no_recursion)]
    pub sub_comments: Vec<CommentDto>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.meta.id.into(),
            created_at: comment.meta.timestamps.created_at,
            updated_at: comment.meta.timestamps.updated_at,
            parent_comment_id: comment.parent_id.map(Into::into),
            content: comment.content,
            digg_count: comment.digg_count,
            comment_count: comment.comment_count,
            article_id: comment.article_id.into_inner(),
            user_id: comment.user_id.into(),
            sub_comments: Vec::new(),
        }
    }
}

impl From<CommentNode> for CommentDto {
    fn from(node: CommentNode) -> Self {
        let mut dto = Self::from(node.comment);
        dto.sub_comments = node.children.into_iter().map(Self::from).collect();
        dto
    }
}
