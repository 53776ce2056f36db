// src/application/articles/stats.rs
use super::ArticleService;
use crate::application::{
    dto::ArticleStatsDto,
    error::ApplicationResult,
    resilience::{spawn_best_effort, with_deadline},
};

impl ArticleService {
    pub async fn article_stats(&self) -> ApplicationResult<ArticleStatsDto> {
        match self.cache.get_stats().await {
            Ok(Some(stats)) => return Ok(stats),
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "stats cache read failed"),
        }

        let stats = ArticleStatsDto::from(
            with_deadline(
                self.settings.store_timeout,
                "aggregate article stats",
                self.store.stats(),
            )
            .await?,
        );

        let cache = self.cache.clone();
        spawn_best_effort("cache article stats", async move {
            cache.put_stats(&stats).await
        });
        Ok(stats)
    }
}
