use crate::domain::article::ArticleId;
use crate::domain::comment::entity::{Comment, CommentSort, NewComment};
use crate::domain::comment::value_objects::CommentId;
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Relational storage for comments. Soft-deleted rows are never returned.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>>;

    /// Inserts the comment and, when it has a parent, bumps the parent's
    /// `comment_count` in the same transaction. A parent that vanished in the
    /// meantime yields `DomainError::NotFound`.
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment>;

    /// Live comments of an article, newest first.
    async fn list_by_article(&self, article_id: &ArticleId) -> DomainResult<Vec<Comment>>;

    /// One page of a user's live comments (descending by `sort`) plus the total.
    async fn list_by_user(
        &self,
        user_id: UserId,
        sort: CommentSort,
        offset: u64,
        limit: u32,
    ) -> DomainResult<(Vec<Comment>, u64)>;

    /// Marks the comment and its direct children deleted in one transaction and
    /// returns the number of rows affected. Grandchildren are left untouched.
    async fn soft_delete_with_children(
        &self,
        id: CommentId,
        deleted_at: DateTime<Utc>,
    ) -> DomainResult<u64>;

    /// Recomputes `comment_count` from live children and returns the new value.
    async fn recount_children(&self, id: CommentId) -> DomainResult<u64>;
}
