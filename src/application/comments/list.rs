// src/application/comments/list.rs
use super::CommentService;
use crate::{
    application::{
        dto::{CommentDto, Page, PageRequest},
        error::{ApplicationError, ApplicationResult},
        resilience::{spawn_best_effort, with_deadline},
    },
    domain::{
        article::ArticleId,
        comment::{CommentId, CommentSort, build_comment_tree},
        user::UserId,
    },
};

pub fn comment_tree_key(article_id: &ArticleId) -> String {
    format!("comment::article:{article_id}")
}

#[derive(Debug, Clone, Default)]
pub struct UserCommentsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
}

impl CommentService {
    /// Threaded comments of an article, newest first on every level.
    pub async fn list_article_comments(
        &self,
        article_id: &str,
    ) -> ApplicationResult<Vec<CommentDto>> {
        let article_id = ArticleId::new(article_id)?;
        let key = comment_tree_key(&article_id);

        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<CommentDto>>(&bytes) {
                Ok(tree) => return Ok(tree),
                Err(err) => {
                    tracing::warn!(article_id = %article_id, error = %err, "corrupt comment tree entry");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(article_id = %article_id, error = %err, "comment tree cache read failed");
            }
        }

        let rows = with_deadline(
            self.settings.store_timeout,
            "list comments",
            self.repo.list_by_article(&article_id),
        )
        .await?;

        let tree: Vec<CommentDto> = build_comment_tree(rows, self.settings.orphan_policy)
            .into_iter()
            .map(CommentDto::from)
            .collect();

        let payload = serde_json::to_vec(&tree)
            .map_err(|err| ApplicationError::cache(err.to_string()))?;
        let cache = self.cache.clone();
        let ttl = self.settings.tree_ttl;
        spawn_best_effort("cache comment tree", async move {
            cache.set(&key, payload, ttl).await
        });

        Ok(tree)
    }

    /// A page of one user's comments, flat.
    pub async fn list_user_comments(
        &self,
        user_id: UserId,
        query: UserCommentsQuery,
    ) -> ApplicationResult<Page<CommentDto>> {
        let sort = match query.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<CommentSort>()?,
            None => CommentSort::default(),
        };
        let request = PageRequest::new(query.page, query.page_size);

        let (comments, total) = with_deadline(
            self.settings.store_timeout,
            "list user comments",
            self.repo
                .list_by_user(user_id, sort, request.offset(), request.page_size),
        )
        .await?;

        Ok(request.page_of(comments.into_iter().map(CommentDto::from).collect(), total))
    }

    /// Recompute a comment's child counter from its live replies.
    pub async fn recount_children(&self, id: i64) -> ApplicationResult<u64> {
        let id = CommentId::new(id)?;
        with_deadline(
            self.settings.store_timeout,
            "recount replies",
            self.repo.recount_children(id),
        )
        .await
    }
}
