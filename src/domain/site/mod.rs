//! Site navigation data kept in the relational store: article categories
//! and links to friendly sites.
pub mod category;
pub mod friend_link;
pub mod repository;

pub use category::{CATEGORY_NAME_MAX_CHARS, Category, CategoryId, CategoryName, NewCategory};
pub use friend_link::{
    FRIEND_LINK_NAME_MAX_CHARS, FRIEND_LINK_URL_MAX_CHARS, FriendLink, FriendLinkId,
    FriendLinkName, FriendLinkUrl, NewFriendLink,
};
pub use repository::{CategoryRepository, FriendLinkRepository, ListWindow};
