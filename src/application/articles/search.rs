// src/application/articles/search.rs
use super::ArticleService;
use crate::{
    application::{
        dto::{ArticleDto, Page},
        error::ApplicationResult,
        resilience::with_deadline,
    },
    domain::article::{ArticleSearch, DEFAULT_PAGE_SIZE, parse_sort},
};

#[derive(Debug, Clone, Default)]
pub struct SearchArticlesQuery {
    pub key: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl ArticleService {
    /// Full-text search; results are never cached.
    pub async fn search_articles(
        &self,
        query: SearchArticlesQuery,
    ) -> ApplicationResult<Page<ArticleDto>> {
        let (field, order) = parse_sort(query.sort_field.as_deref(), query.sort_order.as_deref())?;
        let search = ArticleSearch::new(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .with_key(query.key)
        .with_category(query.category)
        .sorted_by(field, order);

        let found = with_deadline(
            self.settings.store_timeout,
            "search articles",
            self.store.search(&search),
        )
        .await?;

        Ok(Page::new(
            found.articles.into_iter().map(ArticleDto::from).collect(),
            found.total,
            search.page,
            search.page_size,
        ))
    }
}
