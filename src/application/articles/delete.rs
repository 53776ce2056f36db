// src/application/articles/delete.rs
use futures::future::try_join_all;

use super::ArticleService;
use crate::{
    application::{
        error::ApplicationResult,
        resilience::with_deadline,
    },
    domain::article::ArticleId,
};

impl ArticleService {
    /// Delete in fixed-size batches, all in flight at once. The first failing
    /// batch aborts the call; batches already applied stay deleted. An empty
    /// list deletes nothing.
    pub async fn delete_articles(&self, ids: Vec<String>) -> ApplicationResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids = ids
            .into_iter()
            .map(ArticleId::new)
            .collect::<Result<Vec<_>, _>>()?;

        let batch_size = self.settings.delete_batch_size.max(1);
        try_join_all(ids.chunks(batch_size).map(|batch| self.delete_batch(batch))).await?;

        tracing::info!(count = ids.len(), "articles deleted");
        Ok(ids.len())
    }

    async fn delete_batch(&self, batch: &[ArticleId]) -> ApplicationResult<()> {
        with_deadline(
            self.settings.store_timeout,
            "delete articles",
            self.store.bulk_delete(batch),
        )
        .await?;

        for id in batch {
            if let Err(err) = self.cache.evict(id).await {
                tracing::warn!(article_id = %id, error = %err, "failed to evict deleted article");
            }
        }
        Ok(())
    }
}
