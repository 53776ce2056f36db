use crate::domain::article::entity::{Article, ArticleCounter, ArticleStats};
use crate::domain::article::search::{ArticleSearch, SearchPage};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Document index holding the authoritative copy of every article.
///
/// Every write is made visible to subsequent reads before it returns.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn index_exists(&self) -> DomainResult<bool>;
    async fn create_index(&self) -> DomainResult<()>;
    async fn delete_index(&self) -> DomainResult<()>;

    async fn exists(&self, id: &ArticleId) -> DomainResult<bool>;
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>>;
    /// Fails with `DomainError::Conflict` when the id is already taken.
    async fn insert(&self, article: &Article) -> DomainResult<()>;
    /// Writes the editable fields, version and `updated_at`; counters are left alone.
    async fn update(&self, article: &Article) -> DomainResult<()>;
    async fn bulk_delete(&self, ids: &[ArticleId]) -> DomainResult<()>;
    /// Server-side `field += delta`, clamped at zero.
    async fn increment(
        &self,
        id: &ArticleId,
        counter: ArticleCounter,
        delta: i64,
    ) -> DomainResult<()>;

    async fn search(&self, search: &ArticleSearch) -> DomainResult<SearchPage>;
    async fn stats(&self) -> DomainResult<ArticleStats>;
}
