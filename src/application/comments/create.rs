// src/application/comments/create.rs
use std::sync::Arc;

use super::{CommentService, comment_tree_key};
use crate::{
    application::{
        dto::{AuthenticatedUser, CommentDto},
        error::{ApplicationError, ApplicationResult},
        resilience::{spawn_best_effort, with_deadline},
    },
    domain::{
        article::{ArticleCounter, ArticleId},
        comment::{CommentContent, CommentId, NewComment},
    },
};

#[derive(Debug, Clone)]
pub struct CreateCommentCommand {
    pub article_id: String,
    pub parent_id: Option<i64>,
    pub content: String,
}

impl CommentService {
    /// Validate, check the parent, sanitize, rate-limit, then persist.
    pub async fn create_comment(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let article_id = ArticleId::new(command.article_id)?;
        let raw = CommentContent::new(command.content)?;
        let parent_id = command.parent_id.map(CommentId::new).transpose()?;

        if let Some(parent_id) = parent_id {
            self.ensure_parent(parent_id, &article_id).await?;
        }

        let content = CommentContent::from_sanitized(self.sanitizer.sanitize(raw.as_str()))?;
        self.rate_limiter.check(actor.id).await?;

        let comment = with_deadline(
            self.settings.store_timeout,
            "create comment",
            self.repo.insert(NewComment {
                content,
                article_id: article_id.clone(),
                user_id: actor.id,
                parent_id,
                created_at: self.clock.now(),
            }),
        )
        .await
        .map_err(|err| match (err, parent_id) {
            (ApplicationError::NotFound(_), Some(parent)) => {
                ApplicationError::ParentNotFound(parent.into())
            }
            (err, _) => err,
        })?;

        tracing::info!(comment_id = %comment.id(), article_id = %article_id, user_id = %actor.id, "comment created");

        let cache = Arc::clone(&self.cache);
        let key = comment_tree_key(&article_id);
        spawn_best_effort("invalidate comment tree", async move {
            cache.delete(&key).await
        });

        let articles = Arc::clone(&self.articles);
        let counted = article_id.to_string();
        spawn_best_effort("count article comment", async move {
            articles
                .increment_count(&counted, ArticleCounter::Comment, 1)
                .await
        });

        Ok(comment.into())
    }

    async fn ensure_parent(
        &self,
        parent_id: CommentId,
        article_id: &ArticleId,
    ) -> ApplicationResult<()> {
        let parent = with_deadline(
            self.settings.store_timeout,
            "load parent comment",
            self.repo.find_by_id(parent_id),
        )
        .await?;

        match parent {
            Some(parent) if parent.article_id == *article_id => Ok(()),
            _ => Err(ApplicationError::ParentNotFound(parent_id.into())),
        }
    }
}
