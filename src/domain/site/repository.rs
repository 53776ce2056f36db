use crate::domain::errors::DomainResult;
use crate::domain::site::category::{Category, CategoryId, NewCategory};
use crate::domain::site::friend_link::{FriendLink, FriendLinkId, NewFriendLink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Offset, limit and an optional case-insensitive name filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListWindow {
    pub offset: u64,
    pub limit: u32,
    pub name_contains: Option<String>,
}

/// Relational storage for categories. Soft-deleted rows are never returned.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Live names are unique; a duplicate yields `DomainError::Conflict`.
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;

    /// One page of live categories, newest first, plus the total.
    async fn list(&self, window: &ListWindow) -> DomainResult<(Vec<Category>, u64)>;

    /// Returns whether a live row was marked deleted.
    async fn soft_delete(&self, id: CategoryId, deleted_at: DateTime<Utc>) -> DomainResult<bool>;
}

#[async_trait]
pub trait FriendLinkRepository: Send + Sync {
    async fn insert(&self, link: NewFriendLink) -> DomainResult<FriendLink>;

    async fn list(&self, window: &ListWindow) -> DomainResult<(Vec<FriendLink>, u64)>;

    async fn soft_delete(
        &self,
        id: FriendLinkId,
        deleted_at: DateTime<Utc>,
    ) -> DomainResult<bool>;
}
