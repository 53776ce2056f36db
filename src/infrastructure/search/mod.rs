mod document;
mod elasticsearch;
pub mod query;

pub use document::ArticleDocument;
pub use elasticsearch::ElasticsearchArticleStore;
