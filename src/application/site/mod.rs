// src/application/site/mod.rs
mod categories;
mod friend_links;

pub use categories::CategoryService;
pub use friend_links::{CreateFriendLinkCommand, FriendLinkService};

use crate::application::dto::PageRequest;
use crate::domain::site::ListWindow;

/// Paging plus an optional name filter, shared by the site list endpoints.
#[derive(Debug, Clone, Default)]
pub struct SiteListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub key: Option<String>,
}

impl SiteListQuery {
    fn window(&self) -> (PageRequest, ListWindow) {
        let request = PageRequest::new(self.page, self.page_size);
        let window = ListWindow {
            offset: request.offset(),
            limit: request.page_size,
            name_contains: self
                .key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
        };
        (request, window)
    }
}
