// src/domain/article/search.rs
use crate::domain::article::entity::Article;
use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::Validation(format!(
                "sort order must be asc or desc, got {other}"
            ))),
        }
    }
}

/// Fields an article listing can be sorted by. Full-text fields are not sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    LookCount,
    CommentCount,
    DiggCount,
    CollectsCount,
    Version,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::LookCount => "look_count",
            SortField::CommentCount => "comment_count",
            SortField::DiggCount => "digg_count",
            SortField::CollectsCount => "collects_count",
            SortField::Version => "version",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created_at" => Ok(SortField::CreatedAt),
            "updated_at" => Ok(SortField::UpdatedAt),
            "look_count" => Ok(SortField::LookCount),
            "comment_count" => Ok(SortField::CommentCount),
            "digg_count" => Ok(SortField::DiggCount),
            "collects_count" => Ok(SortField::CollectsCount),
            "version" => Ok(SortField::Version),
            other => Err(DomainError::Validation(format!(
                "cannot sort articles by {other}"
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSearch {
    pub key: Option<String>,
    pub category: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl ArticleSearch {
    /// Normalise paging: a page below 1 becomes 1, a zero page size becomes
    /// the default and oversized pages are capped.
    pub fn new(page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let page_size = match page_size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };
        Self {
            key: None,
            category: None,
            page,
            page_size,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }

    pub fn with_key(mut self, key: Option<String>) -> Self {
        self.key = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    pub fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_field = field;
        self.sort_order = order;
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for ArticleSearch {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub articles: Vec<Article>,
    pub total: u64,
}

pub fn parse_sort(
    field: Option<&str>,
    order: Option<&str>,
) -> DomainResult<(SortField, SortOrder)> {
    let field = match field.map(str::trim).filter(|f| !f.is_empty()) {
        Some(raw) => raw.parse()?,
        None => SortField::default(),
    };
    let order = match order.map(str::trim).filter(|o| !o.is_empty()) {
        Some(raw) => raw.parse()?,
        None => SortOrder::default(),
    };
    Ok((field, order))
}
