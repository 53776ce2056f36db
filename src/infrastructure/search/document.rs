use crate::domain::article::{
    Article, ArticleCounters, ArticleId, ArticleTitle, Author, Cover,
};
use crate::domain::errors::DomainError;
use crate::domain::record::Timestamps;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `_source` of an article in the document index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDocument {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub look_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub digg_count: u64,
    #[serde(default)]
    pub collects_count: u64,
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cover_id: u64,
    #[serde(default)]
    pub cover_url: String,
    pub version: i64,
}

impl From<&Article> for ArticleDocument {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.as_str().to_string(),
            created_at: article.timestamps.created_at,
            updated_at: article.timestamps.updated_at,
            title: article.title.as_str().to_string(),
            summary: article.summary.clone(),
            content: article.content.clone(),
            look_count: article.counters.look,
            comment_count: article.counters.comment,
            digg_count: article.counters.digg,
            collects_count: article.counters.collects,
            user_id: article.author.id.into(),
            user_name: article.author.name.clone(),
            category: article.category.clone(),
            cover_id: article.cover.id,
            cover_url: article.cover.url.clone(),
            version: article.version,
        }
    }
}

impl TryFrom<ArticleDocument> for Article {
    type Error = DomainError;

    fn try_from(doc: ArticleDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ArticleId::new(doc.id)?,
            title: ArticleTitle::new(doc.title)?,
            summary: doc.summary,
            content: doc.content,
            category: doc.category,
            cover: Cover {
                id: doc.cover_id,
                url: doc.cover_url,
            },
            author: Author {
                id: UserId::new(doc.user_id)?,
                name: doc.user_name,
            },
            counters: ArticleCounters {
                look: doc.look_count,
                comment: doc.comment_count,
                digg: doc.digg_count,
                collects: doc.collects_count,
            },
            version: doc.version,
            timestamps: Timestamps {
                created_at: doc.created_at,
                updated_at: doc.updated_at,
            },
        })
    }
}
