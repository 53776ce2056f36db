pub mod articles;
pub mod auth;
pub mod comments;
pub mod pagination;
pub mod serde_time;
pub mod site;

pub use articles::{ArticleDto, ArticleStatsDto};
pub use auth::AuthenticatedUser;
pub use comments::CommentDto;
pub use pagination::{Page, PageRequest};
pub use site::{CategoryDto, FriendLinkDto};
