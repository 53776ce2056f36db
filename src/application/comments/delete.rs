// src/application/comments/delete.rs
use super::{CommentService, comment_tree_key};
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        resilience::with_deadline,
    },
    domain::comment::CommentId,
};

impl CommentService {
    /// Soft-delete a comment together with its direct replies.
    pub async fn delete_comment(&self, id: i64) -> ApplicationResult<u64> {
        let id = CommentId::new(id)?;
        let timeout = self.settings.store_timeout;

        let comment = with_deadline(timeout, "load comment", self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("comment {id} not found")))?;

        let affected = with_deadline(
            timeout,
            "delete comment",
            self.repo.soft_delete_with_children(id, self.clock.now()),
        )
        .await?;

        if let Err(err) = self.cache.delete(&comment_tree_key(&comment.article_id)).await {
            tracing::warn!(article_id = %comment.article_id, error = %err, "failed to invalidate comment tree");
        }

        tracing::info!(comment_id = %id, affected, "comment deleted");
        Ok(affected)
    }
}
