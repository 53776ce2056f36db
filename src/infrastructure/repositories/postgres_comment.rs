// src/infrastructure/repositories/postgres_comment.rs
use super::map_sqlx;
use crate::domain::article::ArticleId;
use crate::domain::comment::{Comment, CommentId, CommentRepository, CommentSort, NewComment};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{RecordMeta, Timestamps};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COMMENT_COLUMNS: &str = "id, created_at, updated_at, deleted_at, parent_comment_id, content, \
     digg_count, comment_count, article_id, user_id";

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    parent_comment_id: Option<i64>,
    content: String,
    digg_count: i64,
    comment_count: i64,
    article_id: String,
    user_id: i64,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            meta: RecordMeta {
                id: CommentId::new(row.id)?,
                timestamps: Timestamps {
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                deleted_at: row.deleted_at,
            },
            parent_id: row.parent_comment_id.map(CommentId::new).transpose()?,
            content: row.content,
            digg_count: non_negative(row.digg_count),
            comment_count: non_negative(row.comment_count),
            article_id: ArticleId::new(row.article_id)?,
            user_id: UserId::new(row.user_id)?,
        })
    }
}

// Counters carry a CHECK (>= 0) constraint.
fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

fn into_comments(rows: Vec<CommentRow>) -> DomainResult<Vec<Comment>> {
    rows.into_iter().map(Comment::try_from).collect()
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Comment::try_from).transpose()
    }

    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let NewComment {
            content,
            article_id,
            user_id,
            parent_id,
            created_at,
        } = comment;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        if let Some(parent_id) = parent_id {
            // Lock the parent so a concurrent delete cannot slip in between.
            let parent = sqlx::query_scalar::<_, i64>(
                "SELECT id FROM comments WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
            )
            .bind(i64::from(parent_id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;

            if parent.is_none() {
                return Err(DomainError::NotFound(format!(
                    "parent comment {parent_id} not found"
                )));
            }

            sqlx::query(
                "UPDATE comments SET comment_count = comment_count + 1 WHERE id = $1",
            )
            .bind(i64::from(parent_id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "INSERT INTO comments (created_at, updated_at, parent_comment_id, content, article_id, user_id)
             VALUES ($1, $1, $2, $3, $4, $5)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(created_at)
        .bind(parent_id.map(i64::from))
        .bind(content.as_str())
        .bind(article_id.as_str())
        .bind(i64::from(user_id))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Comment::try_from(row)
    }

    async fn list_by_article(&self, article_id: &ArticleId) -> DomainResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE article_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(article_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_comments(rows)
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        sort: CommentSort,
        offset: u64,
        limit: u32,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        let offset = i64::try_from(offset)
            .map_err(|_| DomainError::Validation("page offset out of range".into()))?;

        // `column()` only yields fixed column names.
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY {} DESC, id DESC
             LIMIT $2 OFFSET $3",
            sort.column()
        ))
        .bind(i64::from(user_id))
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(user_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok((into_comments(rows)?, non_negative(total)))
    }

    async fn soft_delete_with_children(
        &self,
        id: CommentId,
        deleted_at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let parent = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT parent_comment_id FROM comments WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(i64::from(id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("comment {id} not found")))?;

        let affected = sqlx::query(
            "UPDATE comments SET deleted_at = $2, updated_at = $2
             WHERE (id = $1 OR parent_comment_id = $1) AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(deleted_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .rows_affected();

        if let Some(parent) = parent {
            sqlx::query(
                "UPDATE comments SET comment_count = GREATEST(comment_count - 1, 0) WHERE id = $1",
            )
            .bind(parent)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(affected)
    }

    async fn recount_children(&self, id: CommentId) -> DomainResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "UPDATE comments SET comment_count = (
                 SELECT COUNT(*) FROM comments child
                 WHERE child.parent_comment_id = $1 AND child.deleted_at IS NULL
             )
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING comment_count",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("comment {id} not found")))?;

        Ok(non_negative(count))
    }
}
