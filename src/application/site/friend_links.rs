use std::{sync::Arc, time::Duration};

use super::SiteListQuery;
use crate::{
    application::{
        dto::{FriendLinkDto, Page},
        error::ApplicationResult,
        ports::time::Clock,
        resilience::with_deadline,
    },
    domain::site::{
        FriendLinkId, FriendLinkName, FriendLinkRepository, FriendLinkUrl, NewFriendLink,
    },
};

#[derive(Debug, Clone)]
pub struct CreateFriendLinkCommand {
    pub name: String,
    pub link: String,
}

pub struct FriendLinkService {
    repo: Arc<dyn FriendLinkRepository>,
    clock: Arc<dyn Clock>,
    store_timeout: Duration,
}

impl FriendLinkService {
    pub fn new(
        repo: Arc<dyn FriendLinkRepository>,
        clock: Arc<dyn Clock>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            clock,
            store_timeout,
        }
    }

    pub async fn create_friend_link(
        &self,
        command: CreateFriendLinkCommand,
    ) -> ApplicationResult<FriendLinkDto> {
        let new_link = NewFriendLink {
            name: FriendLinkName::new(command.name)?,
            link: FriendLinkUrl::new(command.link)?,
            created_at: self.clock.now(),
        };
        let link = with_deadline(
            self.store_timeout,
            "create friend link",
            self.repo.insert(new_link),
        )
        .await?;

        tracing::info!(friend_link_id = %link.meta.id, link = %link.link, "friend link created");
        Ok(link.into())
    }

    pub async fn list_friend_links(
        &self,
        query: SiteListQuery,
    ) -> ApplicationResult<Page<FriendLinkDto>> {
        let (request, window) = query.window();
        let (links, total) = with_deadline(
            self.store_timeout,
            "list friend links",
            self.repo.list(&window),
        )
        .await?;
        Ok(request.page_of(links.into_iter().map(FriendLinkDto::from).collect(), total))
    }

    pub async fn delete_friend_link(&self, id: i64) -> ApplicationResult<u64> {
        let id = FriendLinkId::new(id)?;
        let deleted = with_deadline(
            self.store_timeout,
            "delete friend link",
            self.repo.soft_delete(id, self.clock.now()),
        )
        .await?;

        if deleted {
            tracing::info!(friend_link_id = %id, "friend link deleted");
        }
        Ok(u64::from(deleted))
    }
}
