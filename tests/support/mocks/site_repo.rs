// tests/support/mocks/site_repo.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkpost_core::domain::errors::{DomainError, DomainResult};
use inkpost_core::domain::record::{RecordMeta, Timestamps};
use inkpost_core::domain::site::{
    Category, CategoryId, CategoryRepository, FriendLink, FriendLinkId, FriendLinkRepository,
    ListWindow, NewCategory, NewFriendLink,
};
use std::cmp::Reverse;
use std::sync::Mutex;

fn name_matches(name: &str, window: &ListWindow) -> bool {
    window
        .name_contains
        .as_deref()
        .is_none_or(|key| name.to_lowercase().contains(&key.to_lowercase()))
}

fn page<T: Clone, Id: Copy + Ord>(
    rows: &[T],
    meta: impl Fn(&T) -> &RecordMeta<Id>,
    name: impl Fn(&T) -> &str,
    window: &ListWindow,
) -> (Vec<T>, u64) {
    let mut live: Vec<T> = rows
        .iter()
        .filter(|&row| !meta(row).is_deleted() && name_matches(name(row), window))
        .cloned()
        .collect();
    live.sort_by_key(|row| Reverse((meta(row).created_at(), meta(row).id)));
    let total = live.len() as u64;
    let list = live
        .into_iter()
        .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
        .take(window.limit as usize)
        .collect();
    (list, total)
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX) + 1
}

/// Category table kept in memory; live names are unique like the real index.
#[derive(Default)]
pub struct InMemoryCategoryRepo {
    rows: Mutex<Vec<Category>>,
}

impl InMemoryCategoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, id: i64) -> Option<Category> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.meta.id.0 == id)
            .cloned()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepo {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut rows = self.rows.lock().unwrap();
        let taken = rows
            .iter()
            .any(|c| !c.meta.is_deleted() && c.name == category.name.as_str());
        if taken {
            return Err(DomainError::Conflict("category name already exists".into()));
        }
        let created = Category {
            meta: RecordMeta {
                id: CategoryId::new(next_id(rows.len()))?,
                timestamps: Timestamps::at(category.created_at),
                deleted_at: None,
            },
            name: category.name.as_str().to_string(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn list(&self, window: &ListWindow) -> DomainResult<(Vec<Category>, u64)> {
        let rows = self.rows.lock().unwrap();
        Ok(page(&rows, |c| &c.meta, |c| &c.name, window))
    }

    async fn soft_delete(&self, id: CategoryId, deleted_at: DateTime<Utc>) -> DomainResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|c| c.meta.id == id && !c.meta.is_deleted())
        {
            Some(row) => {
                row.meta.deleted_at = Some(deleted_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryFriendLinkRepo {
    rows: Mutex<Vec<FriendLink>>,
}

impl InMemoryFriendLinkRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| !l.meta.is_deleted())
            .count()
    }
}

#[async_trait]
impl FriendLinkRepository for InMemoryFriendLinkRepo {
    async fn insert(&self, link: NewFriendLink) -> DomainResult<FriendLink> {
        let mut rows = self.rows.lock().unwrap();
        let created = FriendLink {
            meta: RecordMeta {
                id: FriendLinkId::new(next_id(rows.len()))?,
                timestamps: Timestamps::at(link.created_at),
                deleted_at: None,
            },
            name: link.name.as_str().to_string(),
            link: link.link.as_str().to_string(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn list(&self, window: &ListWindow) -> DomainResult<(Vec<FriendLink>, u64)> {
        let rows = self.rows.lock().unwrap();
        Ok(page(&rows, |l| &l.meta, |l| &l.name, window))
    }

    async fn soft_delete(
        &self,
        id: FriendLinkId,
        deleted_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|l| l.meta.id == id && !l.meta.is_deleted())
        {
            Some(row) => {
                row.meta.deleted_at = Some(deleted_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
