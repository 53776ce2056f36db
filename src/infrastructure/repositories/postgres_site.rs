// src/infrastructure/repositories/postgres_site.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{RecordMeta, Timestamps};
use crate::domain::site::{
    Category, CategoryId, CategoryRepository, FriendLink, FriendLinkId, FriendLinkRepository,
    ListWindow, NewCategory, NewFriendLink,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const CATEGORY_COLUMNS: &str = "id, created_at, updated_at, deleted_at, name";
const FRIEND_LINK_COLUMNS: &str = "id, created_at, updated_at, deleted_at, name, link";

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    name: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            meta: RecordMeta {
                id: CategoryId::new(row.id)?,
                timestamps: Timestamps {
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                deleted_at: row.deleted_at,
            },
            name: row.name,
        })
    }
}

#[derive(Debug, FromRow)]
struct FriendLinkRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    name: String,
    link: String,
}

impl TryFrom<FriendLinkRow> for FriendLink {
    type Error = DomainError;

    fn try_from(row: FriendLinkRow) -> Result<Self, Self::Error> {
        Ok(FriendLink {
            meta: RecordMeta {
                id: FriendLinkId::new(row.id)?,
                timestamps: Timestamps {
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                deleted_at: row.deleted_at,
            },
            name: row.name,
            link: row.link,
        })
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards in it escaped.
fn contains_pattern(needle: Option<&str>) -> Option<String> {
    needle.map(|needle| {
        let escaped = needle
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

fn page_offset(window: &ListWindow) -> DomainResult<i64> {
    i64::try_from(window.offset)
        .map_err(|_| DomainError::Validation("page offset out of range".into()))
}

fn row_count(total: i64) -> u64 {
    u64::try_from(total).unwrap_or_default()
}

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "INSERT INTO categories (created_at, updated_at, name)
             VALUES ($1, $1, $2)
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category.created_at)
        .bind(category.name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Category::try_from(row)
    }

    async fn list(&self, window: &ListWindow) -> DomainResult<(Vec<Category>, u64)> {
        let pattern = contains_pattern(window.name_contains.as_deref());

        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories
             WHERE deleted_at IS NULL AND ($1::TEXT IS NULL OR name ILIKE $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(pattern.as_deref())
        .bind(i64::from(window.limit))
        .bind(page_offset(window)?)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories
             WHERE deleted_at IS NULL AND ($1::TEXT IS NULL OR name ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let categories = rows
            .into_iter()
            .map(Category::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((categories, row_count(total)))
    }

    async fn soft_delete(&self, id: CategoryId, deleted_at: DateTime<Utc>) -> DomainResult<bool> {
        let affected = sqlx::query(
            "UPDATE categories SET deleted_at = $2, updated_at = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?
        .rows_affected();

        Ok(affected > 0)
    }
}

#[derive(Clone)]
pub struct PostgresFriendLinkRepository {
    pool: PgPool,
}

impl PostgresFriendLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendLinkRepository for PostgresFriendLinkRepository {
    async fn insert(&self, link: NewFriendLink) -> DomainResult<FriendLink> {
        let row = sqlx::query_as::<_, FriendLinkRow>(&format!(
            "INSERT INTO friend_links (created_at, updated_at, name, link)
             VALUES ($1, $1, $2, $3)
             RETURNING {FRIEND_LINK_COLUMNS}"
        ))
        .bind(link.created_at)
        .bind(link.name.as_str())
        .bind(link.link.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        FriendLink::try_from(row)
    }

    async fn list(&self, window: &ListWindow) -> DomainResult<(Vec<FriendLink>, u64)> {
        let pattern = contains_pattern(window.name_contains.as_deref());

        let rows = sqlx::query_as::<_, FriendLinkRow>(&format!(
            "SELECT {FRIEND_LINK_COLUMNS} FROM friend_links
             WHERE deleted_at IS NULL AND ($1::TEXT IS NULL OR name ILIKE $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(pattern.as_deref())
        .bind(i64::from(window.limit))
        .bind(page_offset(window)?)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM friend_links
             WHERE deleted_at IS NULL AND ($1::TEXT IS NULL OR name ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let links = rows
            .into_iter()
            .map(FriendLink::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((links, row_count(total)))
    }

    async fn soft_delete(
        &self,
        id: FriendLinkId,
        deleted_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let affected = sqlx::query(
            "UPDATE friend_links SET deleted_at = $2, updated_at = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?
        .rows_affected();

        Ok(affected > 0)
    }
}
