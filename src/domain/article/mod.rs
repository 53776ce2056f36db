pub mod entity;
pub mod popularity;
pub mod repository;
pub mod search;
pub mod value_objects;

pub use entity::{
    Article, ArticleCounter, ArticleCounters, ArticleDraft, ArticleEdit, ArticleStats, Author,
    Cover,
};
pub use popularity::should_cache;
pub use repository::ArticleStore;
pub use search::{
    ArticleSearch, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SearchPage, SortField, SortOrder, parse_sort,
};
pub use value_objects::{ArticleId, ArticleTitle};
