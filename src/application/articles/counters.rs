// src/application/articles/counters.rs
use super::ArticleService;
use crate::{
    application::{
        error::ApplicationResult,
        resilience::{with_deadline, with_retry},
    },
    domain::article::{ArticleCounter, ArticleId, should_cache},
};

impl ArticleService {
    /// Apply `delta` to one counter in the store, then refresh the cache.
    pub async fn increment_count(
        &self,
        id: &str,
        counter: ArticleCounter,
        delta: i64,
    ) -> ApplicationResult<()> {
        let id = ArticleId::new(id)?;
        self.increment(&id, counter, delta).await
    }

    pub async fn increment_look(&self, id: &str) -> ApplicationResult<()> {
        self.increment_count(id, ArticleCounter::Look, 1).await
    }

    pub async fn increment_comment(&self, id: &str) -> ApplicationResult<()> {
        self.increment_count(id, ArticleCounter::Comment, 1).await
    }

    pub async fn increment_digg(&self, id: &str) -> ApplicationResult<()> {
        self.increment_count(id, ArticleCounter::Digg, 1).await
    }

    pub async fn increment_collects(&self, id: &str) -> ApplicationResult<()> {
        self.increment_count(id, ArticleCounter::Collects, 1).await
    }

    pub async fn decrement_digg(&self, id: &str) -> ApplicationResult<()> {
        self.increment_count(id, ArticleCounter::Digg, -1).await
    }

    pub async fn decrement_collects(&self, id: &str) -> ApplicationResult<()> {
        self.increment_count(id, ArticleCounter::Collects, -1).await
    }

    pub(super) async fn increment(
        &self,
        id: &ArticleId,
        counter: ArticleCounter,
        delta: i64,
    ) -> ApplicationResult<()> {
        if delta == 0 {
            return Ok(());
        }
        let timeout = self.settings.store_timeout;
        with_retry(self.settings.retry, "increment counter", || {
            with_deadline(
                timeout,
                "increment counter",
                self.store.increment(id, counter, delta),
            )
        })
        .await?;

        self.refresh_after_increment(id).await;
        Ok(())
    }

    /// Re-read from the store and refresh the entry if it is already cached
    /// or the article is now popular enough to be.
    async fn refresh_after_increment(&self, id: &ArticleId) {
        let _refresh = self.cache.refresh_guard().await;
        let article = match with_deadline(
            self.settings.store_timeout,
            "reload article",
            self.store.find_by_id(id),
        )
        .await
        {
            Ok(Some(article)) => article,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(article_id = %id, error = %err, "could not reload article after increment");
                return;
            }
        };

        let cached = match self.cache.get(id).await {
            Ok(entry) => entry.is_some(),
            Err(err) => {
                tracing::warn!(article_id = %id, error = %err, "cache read failed");
                false
            }
        };

        if cached || should_cache(article.counters.look, self.clock.local_hour()) {
            if let Err(err) = self.cache.put(&article).await {
                tracing::warn!(article_id = %id, error = %err, "failed to refresh cached article");
            }
        }
    }
}
