use crate::domain::article::{
    Article, ArticleCounters, ArticleId, ArticleStats, ArticleTitle, Author, Cover,
};
use crate::domain::errors::DomainError;
use crate::domain::record::Timestamps;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

/// Wire and cache representation of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub content: String,
    pub look_count: u64,
    pub comment_count: u64,
    pub digg_count: u64,
    pub collects_count: u64,
    pub user_id: i64,
    pub user_name: String,
    pub category: String,
    pub cover_id: u64,
    pub cover_url: String,
    pub version: i64,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into_inner(),
            created_at: article.timestamps.created_at,
            updated_at: article.timestamps.updated_at,
            title: article.title.into_inner(),
            summary: article.summary,
            content: article.content,
            look_count: article.counters.look,
            comment_count: article.counters.comment,
            digg_count: article.counters.digg,
            collects_count: article.counters.collects,
            user_id: article.author.id.into(),
            user_name: article.author.name,
            category: article.category,
            cover_id: article.cover.id,
            cover_url: article.cover.url,
            version: article.version,
        }
    }
}

impl TryFrom<ArticleDto> for Article {
    type Error = DomainError;

    fn try_from(dto: ArticleDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ArticleId::new(dto.id)?,
            title: ArticleTitle::new(dto.title)?,
            summary: dto.summary,
            content: dto.content,
            category: dto.category,
            cover: Cover {
                id: dto.cover_id,
                url: dto.cover_url,
            },
            author: Author {
                id: UserId::new(dto.user_id)?,
                name: dto.user_name,
            },
            counters: ArticleCounters {
                look: dto.look_count,
                comment: dto.comment_count,
                digg: dto.digg_count,
                collects: dto.collects_count,
            },
            version: dto.version,
            timestamps: Timestamps {
                created_at: dto.created_at,
                updated_at: dto.updated_at,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleStatsDto {
    pub total_articles: u64,
    pub total_comments: u64,
    pub total_views: u64,
    pub total_diggs: u64,
    pub total_collects: u64,
}

impl From<ArticleStats> for ArticleStatsDto {
    fn from(stats: ArticleStats) -> Self {
        Self {
            total_articles: stats.total_articles,
            total_comments: stats.total_comments,
            total_views: stats.total_views,
            total_diggs: stats.total_diggs,
            total_collects: stats.total_collects,
        }
    }
}
