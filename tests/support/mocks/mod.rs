// tests/support/mocks/mod.rs
pub mod article_store;
pub mod cache;
pub mod comment_repo;
pub mod site_repo;
pub mod text;
pub mod time;
pub mod util;

pub use article_store::InMemoryArticleStore;
pub use cache::InMemoryCache;
pub use comment_repo::InMemoryCommentRepo;
pub use site_repo::{InMemoryCategoryRepo, InMemoryFriendLinkRepo};
pub use text::PassthroughMarkdown;
pub use time::StepClock;
pub use util::SequentialIds;
