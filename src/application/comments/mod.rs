// src/application/comments/mod.rs
mod create;
mod delete;
mod list;
mod rate_limit;
mod service;

pub use create::CreateCommentCommand;
pub use list::{UserCommentsQuery, comment_tree_key};
pub use rate_limit::FixedWindowRateLimiter;
pub use service::{CommentService, CommentServiceSettings};
