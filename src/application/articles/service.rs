// src/application/articles/service.rs
use std::{sync::Arc, time::Duration};

use super::ArticleCache;
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{cache::Cache, text::MarkdownNormalizer, time::Clock},
        resilience::{RetryPolicy, with_deadline, with_retry},
    },
    domain::article::{Article, ArticleId, ArticleStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleServiceSettings {
    /// Upper bound for every single store call.
    pub store_timeout: Duration,
    pub retry: RetryPolicy,
    pub cache_ttl: Duration,
    pub stats_ttl: Duration,
    pub delete_batch_size: usize,
}

impl Default for ArticleServiceSettings {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
            cache_ttl: Duration::from_secs(2 * 60 * 60),
            stats_ttl: Duration::from_secs(5 * 60),
            delete_batch_size: 1000,
        }
    }
}

/// Coordinates the document store (authoritative) with the article cache.
#[derive(Clone)]
pub struct ArticleService {
    pub(super) store: Arc<dyn ArticleStore>,
    pub(super) cache: Arc<ArticleCache>,
    pub(super) markdown: Arc<dyn MarkdownNormalizer>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) settings: ArticleServiceSettings,
}

impl ArticleService {
    pub fn new(
        store: Arc<dyn ArticleStore>,
        cache: Arc<dyn Cache>,
        markdown: Arc<dyn MarkdownNormalizer>,
        clock: Arc<dyn Clock>,
        settings: ArticleServiceSettings,
    ) -> Self {
        let cache = Arc::new(ArticleCache::new(
            cache,
            settings.cache_ttl,
            settings.stats_ttl,
        ));
        Self {
            store,
            cache,
            markdown,
            clock,
            settings,
        }
    }

    /// Make sure the article index exists, dropping it first when `recreate`
    /// is set.
    pub async fn ensure_index(&self, recreate: bool) -> ApplicationResult<()> {
        let timeout = self.settings.store_timeout;
        let exists =
            with_deadline(timeout, "check article index", self.store.index_exists()).await?;

        if exists && recreate {
            with_deadline(timeout, "delete article index", self.store.delete_index()).await?;
            tracing::info!("article index deleted for recreation");
        }
        if !exists || recreate {
            with_deadline(timeout, "create article index", self.store.create_index()).await?;
            tracing::info!("article index created");
        }
        Ok(())
    }

    /// Read straight from the store with retries. Does not count a view.
    pub(super) async fn fetch_from_store(&self, id: &ArticleId) -> ApplicationResult<Article> {
        let timeout = self.settings.store_timeout;
        let found = with_retry(self.settings.retry, "load article", || {
            with_deadline(timeout, "load article", self.store.find_by_id(id))
        })
        .await?;

        found.ok_or_else(|| ApplicationError::not_found(format!("article {id} not found")))
    }
}
