// src/application/articles/mod.rs
mod cache;
mod counters;
mod create;
mod delete;
mod get;
mod search;
mod service;
mod stats;
mod update;

pub use cache::{ARTICLE_STATS_KEY, ArticleCache, article_key};
pub use create::CreateArticleCommand;
pub use search::SearchArticlesQuery;
pub use service::{ArticleService, ArticleServiceSettings};
pub use update::UpdateArticleCommand;
