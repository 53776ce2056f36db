// src/application/articles/get.rs
use super::ArticleService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult, resilience::spawn_best_effort},
    domain::article::{Article, ArticleCounter, ArticleId, should_cache},
};

impl ArticleService {
    /// Read an article and count the view in the background.
    pub async fn get_article(&self, id: &str) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(id)?;

        match self.cache.get(&id).await {
            Ok(Some(article)) => {
                self.count_view(article.clone(), false);
                return Ok(article.into());
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(article_id = %id, error = %err, "cache read failed, falling back to store");
            }
        }

        let article = self.fetch_from_store(&id).await?;
        let populate = should_cache(article.counters.look, self.clock.local_hour());
        self.count_view(article.clone(), populate);
        Ok(article.into())
    }

    /// The increment refreshes the cache itself; `populate` only matters when
    /// the increment fails and the popular article would otherwise stay uncached.
    fn count_view(&self, article: Article, populate: bool) {
        let service = self.clone();
        spawn_best_effort("count article view", async move {
            let counted = service.increment(&article.id, ArticleCounter::Look, 1).await;
            if counted.is_err() && populate {
                service.cache.put(&article).await?;
            }
            counted
        });
    }
}
