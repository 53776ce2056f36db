// src/application/articles/cache.rs
use std::{sync::Arc, time::Duration};

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::{
    application::{
        dto::{ArticleDto, ArticleStatsDto},
        error::{ApplicationError, ApplicationResult},
        ports::cache::Cache,
    },
    domain::article::{Article, ArticleId},
};

pub const ARTICLE_STATS_KEY: &str = "article:stats";

pub fn article_key(id: &ArticleId) -> String {
    format!("article:{id}")
}

/// Typed view over the shared cache for article entries.
///
/// Access from this process is serialized through a read/write lock; there
/// is no atomicity with the document store.
pub struct ArticleCache {
    cache: Arc<dyn Cache>,
    lock: RwLock<()>,
    refresh: Mutex<()>,
    ttl: Duration,
    stats_ttl: Duration,
}

impl ArticleCache {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration, stats_ttl: Duration) -> Self {
        Self {
            cache,
            lock: RwLock::new(()),
            refresh: Mutex::new(()),
            ttl,
            stats_ttl,
        }
    }

    pub async fn get(&self, id: &ArticleId) -> ApplicationResult<Option<Article>> {
        let bytes = {
            let _guard = self.lock.read().await;
            self.cache.get(&article_key(id)).await?
        };
        let Some(bytes) = bytes else {
            return Ok(None);
        };
        let dto: ArticleDto = serde_json::from_slice(&bytes)
            .map_err(|err| ApplicationError::cache(format!("corrupt article entry: {err}")))?;
        let article = Article::try_from(dto)
            .map_err(|err| ApplicationError::cache(format!("corrupt article entry: {err}")))?;
        Ok(Some(article))
    }

    pub async fn put(&self, article: &Article) -> ApplicationResult<()> {
        let payload = serde_json::to_vec(&ArticleDto::from(article.clone()))
            .map_err(|err| ApplicationError::cache(err.to_string()))?;
        let _guard = self.lock.write().await;
        self.cache
            .set(&article_key(&article.id), payload, self.ttl)
            .await
    }

    /// Held across a reload-and-put, so the refresh that finishes last wrote
    /// the newest copy.
    pub async fn refresh_guard(&self) -> MutexGuard<'_, ()> {
        self.refresh.lock().await
    }

    pub async fn evict(&self, id: &ArticleId) -> ApplicationResult<()> {
        let _guard = self.lock.write().await;
        self.cache.delete(&article_key(id)).await
    }

    pub async fn get_stats(&self) -> ApplicationResult<Option<ArticleStatsDto>> {
        let bytes = {
            let _guard = self.lock.read().await;
            self.cache.get(ARTICLE_STATS_KEY).await?
        };
        bytes
            .map(|bytes| {
                serde_json::from_slice(&bytes)
                    .map_err(|err| ApplicationError::cache(format!("corrupt stats entry: {err}")))
            })
            .transpose()
    }

    pub async fn put_stats(&self, stats: &ArticleStatsDto) -> ApplicationResult<()> {
        let payload =
            serde_json::to_vec(stats).map_err(|err| ApplicationError::cache(err.to_string()))?;
        let _guard = self.lock.write().await;
        self.cache
            .set(ARTICLE_STATS_KEY, payload, self.stats_ttl)
            .await
    }
}
