// src/application/services/mod.rs
use std::{sync::Arc, time::Duration};

use crate::{
    application::{
        ApplicationResult,
        articles::{ArticleService, ArticleServiceSettings},
        comments::{CommentService, CommentServiceSettings, FixedWindowRateLimiter},
        dto::AuthenticatedUser,
        error::ApplicationError,
        resilience::BoundedCache,
        site::{CategoryService, FriendLinkService},
        ports::{
            cache::Cache,
            security::TokenVerifier,
            text::{ContentSanitizer, MarkdownNormalizer},
            time::Clock,
            util::IdGenerator,
        },
    },
    domain::{
        article::ArticleStore,
        comment::CommentRepository,
        site::{CategoryRepository, FriendLinkRepository},
    },
};

/// Tunables for every service, grouped so bootstrap can fill them from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub articles: ArticleServiceSettings,
    pub comments: CommentServiceSettings,
    pub comment_rate_limit: u32,
    pub comment_rate_window: Duration,
    /// Deadline for a single cache call.
    pub cache_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            articles: ArticleServiceSettings::default(),
            comments: CommentServiceSettings::default(),
            comment_rate_limit: 3,
            comment_rate_window: Duration::from_secs(10),
            cache_timeout: Duration::from_millis(500),
        }
    }
}

pub struct ApplicationServices {
    pub articles: Arc<ArticleService>,
    pub comments: Arc<CommentService>,
    pub categories: Arc<CategoryService>,
    pub friend_links: Arc<FriendLinkService>,
    token_verifier: Arc<dyn TokenVerifier>,
    id_generator: Arc<dyn IdGenerator>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        article_store: Arc<dyn ArticleStore>,
        comment_repo: Arc<dyn CommentRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        friend_link_repo: Arc<dyn FriendLinkRepository>,
        cache: Arc<dyn Cache>,
        markdown: Arc<dyn MarkdownNormalizer>,
        sanitizer: Arc<dyn ContentSanitizer>,
        token_verifier: Arc<dyn TokenVerifier>,
        clock: Arc<dyn Clock>,
        id_generator: Arc<dyn IdGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(BoundedCache::new(cache, settings.cache_timeout));

        let articles = Arc::new(ArticleService::new(
            article_store,
            Arc::clone(&cache),
            markdown,
            Arc::clone(&clock),
            settings.articles,
        ));

        let rate_limiter = Arc::new(FixedWindowRateLimiter::new(
            Arc::clone(&cache),
            settings.comment_rate_limit,
            settings.comment_rate_window,
        ));

        let comments = Arc::new(CommentService::new(
            comment_repo,
            cache,
            sanitizer,
            rate_limiter,
            Arc::clone(&articles),
            Arc::clone(&clock),
            settings.comments,
        ));

        // Site data shares the relational store and its deadline with comments.
        let store_timeout = settings.comments.store_timeout;
        let categories = Arc::new(CategoryService::new(
            category_repo,
            Arc::clone(&clock),
            store_timeout,
        ));
        let friend_links = Arc::new(FriendLinkService::new(
            friend_link_repo,
            clock,
            store_timeout,
        ));

        Self {
            articles,
            comments,
            categories,
            friend_links,
            token_verifier,
            id_generator,
        }
    }

    pub fn next_article_id(&self) -> String {
        self.id_generator.next_id()
    }

    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_verifier.authenticate(token).await
    }

    /// Authenticate and require the admin role.
    pub async fn authenticate_admin(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let user = self.authenticate(token).await?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(ApplicationError::forbidden("administrator role required"))
        }
    }
}
