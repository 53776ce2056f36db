// tests/support/mocks/comment_repo.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkpost_core::domain::article::ArticleId;
use inkpost_core::domain::comment::{Comment, CommentId, CommentRepository, CommentSort, NewComment};
use inkpost_core::domain::errors::{DomainError, DomainResult};
use inkpost_core::domain::record::{RecordMeta, Timestamps};
use inkpost_core::domain::user::UserId;
use std::cmp::Reverse;
use std::sync::Mutex;

/// Comment table kept in memory. Deleted rows stay in place with
/// `deleted_at` set, like the relational store.
#[derive(Default)]
pub struct InMemoryCommentRepo {
    rows: Mutex<Vec<Comment>>,
}

impl InMemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row as stored, including soft-deleted ones.
    pub fn row(&self, id: i64) -> Option<Comment> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.meta.id.0 == id)
            .cloned()
    }

    pub fn live_count(&self) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !c.meta.is_deleted())
            .count()
    }
}

fn live_mut(rows: &mut [Comment], id: CommentId) -> Option<&mut Comment> {
    rows.iter_mut()
        .find(|c| c.meta.id == id && !c.meta.is_deleted())
}

fn newest_first(comments: &mut [Comment]) {
    comments.sort_by_key(|c| Reverse((c.meta.created_at(), c.meta.id)));
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepo {
    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(live_mut(&mut rows, id).map(|c| c.clone()))
    }

    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(parent_id) = comment.parent_id {
            let parent = live_mut(&mut rows, parent_id)
                .ok_or_else(|| DomainError::NotFound(format!("comment {parent_id}")))?;
            parent.comment_count += 1;
        }

        let id = i64::try_from(rows.len()).unwrap_or(i64::MAX) + 1;
        let created = Comment {
            meta: RecordMeta {
                id: CommentId::new(id)?,
                timestamps: Timestamps::at(comment.created_at),
                deleted_at: None,
            },
            parent_id: comment.parent_id,
            content: comment.content.into_inner(),
            digg_count: 0,
            comment_count: 0,
            article_id: comment.article_id,
            user_id: comment.user_id,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn list_by_article(&self, article_id: &ArticleId) -> DomainResult<Vec<Comment>> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<Comment> = rows
            .iter()
            .filter(|c| !c.meta.is_deleted() && c.article_id == *article_id)
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        sort: CommentSort,
        offset: u64,
        limit: u32,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<Comment> = rows
            .iter()
            .filter(|c| !c.meta.is_deleted() && c.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut found);
        match sort {
            CommentSort::CreatedAt => {}
            CommentSort::DiggCount => found.sort_by_key(|c| Reverse(c.digg_count)),
            CommentSort::CommentCount => found.sort_by_key(|c| Reverse(c.comment_count)),
        }

        let total = found.len() as u64;
        let page = found
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn soft_delete_with_children(
        &self,
        id: CommentId,
        deleted_at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let Some(target) = live_mut(&mut rows, id) else {
            return Ok(0);
        };
        let parent_id = target.parent_id;

        let mut affected = 0;
        for row in rows.iter_mut() {
            let hit = row.meta.id == id || row.parent_id == Some(id);
            if hit && !row.meta.is_deleted() {
                row.meta.deleted_at = Some(deleted_at);
                affected += 1;
            }
        }
        if let Some(parent) = parent_id.and_then(|p| live_mut(&mut rows, p)) {
            parent.comment_count = parent.comment_count.saturating_sub(1);
        }
        Ok(affected)
    }

    async fn recount_children(&self, id: CommentId) -> DomainResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let live = rows
            .iter()
            .filter(|c| c.parent_id == Some(id) && !c.meta.is_deleted())
            .count() as u64;
        let target = live_mut(&mut rows, id)
            .ok_or_else(|| DomainError::NotFound(format!("comment {id}")))?;
        target.comment_count = live;
        Ok(live)
    }
}
