// src/application/articles/create.rs
use super::ArticleService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
        resilience::with_deadline,
    },
    domain::{
        article::{Article, ArticleDraft, ArticleId, ArticleTitle, Author, Cover},
        user::UserId,
    },
};

/// A new article; the id is generated by the caller.
#[derive(Debug, Clone)]
pub struct CreateArticleCommand {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub cover_id: u64,
    pub cover_url: String,
    pub author_id: i64,
    pub author_name: String,
}

impl ArticleService {
    pub async fn create_article(
        &self,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let title = ArticleTitle::new(command.title)?;
        let author = Author {
            id: UserId::new(command.author_id)?,
            name: command.author_name,
        };

        if self.article_exists(&id).await? {
            return Err(ApplicationError::already_exists(format!(
                "article {id} already exists"
            )));
        }

        let content = self.markdown.normalize(&command.content)?;
        let article = Article::create(
            ArticleDraft {
                id,
                title,
                summary: command.summary,
                content,
                category: command.category.trim().to_string(),
                cover: Cover {
                    id: command.cover_id,
                    url: command.cover_url,
                },
                author,
            },
            self.clock.now(),
        );

        with_deadline(
            self.settings.store_timeout,
            "create article",
            self.store.insert(&article),
        )
        .await?;

        if let Err(err) = self.cache.put(&article).await {
            tracing::warn!(article_id = %article.id, error = %err, "failed to cache new article");
        }

        tracing::info!(article_id = %article.id, "article created");
        Ok(article.into())
    }

    /// Cache first, then the store. A cache failure only costs the shortcut.
    async fn article_exists(&self, id: &ArticleId) -> ApplicationResult<bool> {
        match self.cache.get(id).await {
            Ok(Some(_)) => return Ok(true),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(article_id = %id, error = %err, "cache lookup failed");
            }
        }
        with_deadline(
            self.settings.store_timeout,
            "check article",
            self.store.exists(id),
        )
        .await
    }
}
