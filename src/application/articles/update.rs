// src/application/articles/update.rs
use super::ArticleService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult, resilience::with_deadline},
    domain::article::{ArticleEdit, ArticleId, ArticleTitle, Cover},
};

/// Editable fields; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub cover_id: Option<u64>,
    pub cover_url: Option<String>,
}

impl ArticleService {
    /// Last writer wins. The version only records how many edits happened.
    pub async fn update_article(
        &self,
        id: &str,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(id)?;
        let UpdateArticleCommand {
            title,
            summary,
            content,
            category,
            cover_id,
            cover_url,
        } = command;

        let title = title.map(ArticleTitle::new).transpose()?;
        let content = content
            .map(|raw| self.markdown.normalize(&raw))
            .transpose()?;

        let mut article = self.fetch_from_store(&id).await?;
        let cover = match (cover_id, cover_url) {
            (None, None) => None,
            (cover_id, cover_url) => Some(Cover {
                id: cover_id.unwrap_or(article.cover.id),
                url: cover_url.unwrap_or_else(|| article.cover.url.clone()),
            }),
        };

        article.apply_edit(
            ArticleEdit {
                title,
                summary,
                content,
                category: category.map(|c| c.trim().to_string()),
                cover,
            },
            self.clock.now(),
        );

        with_deadline(
            self.settings.store_timeout,
            "update article",
            self.store.update(&article),
        )
        .await?;

        if let Err(err) = self.cache.put(&article).await {
            tracing::warn!(article_id = %article.id, error = %err, "failed to refresh cached article");
        }

        tracing::info!(article_id = %article.id, version = article.version, "article updated");
        Ok(article.into())
    }
}
