// src/application/comments/service.rs
use std::{sync::Arc, time::Duration};

use super::FixedWindowRateLimiter;
use crate::{
    application::{
        articles::ArticleService,
        ports::{cache::Cache, text::ContentSanitizer, time::Clock},
    },
    domain::comment::{CommentRepository, OrphanPolicy},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentServiceSettings {
    pub store_timeout: Duration,
    pub tree_ttl: Duration,
    pub orphan_policy: OrphanPolicy,
}

impl Default for CommentServiceSettings {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            tree_ttl: Duration::from_secs(5 * 60),
            orphan_policy: OrphanPolicy::default(),
        }
    }
}

#[derive(Clone)]
pub struct CommentService {
    pub(super) repo: Arc<dyn CommentRepository>,
    pub(super) cache: Arc<dyn Cache>,
    pub(super) sanitizer: Arc<dyn ContentSanitizer>,
    pub(super) rate_limiter: Arc<FixedWindowRateLimiter>,
    pub(super) articles: Arc<ArticleService>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) settings: CommentServiceSettings,
}

impl CommentService {
    pub fn new(
        repo: Arc<dyn CommentRepository>,
        cache: Arc<dyn Cache>,
        sanitizer: Arc<dyn ContentSanitizer>,
        rate_limiter: Arc<FixedWindowRateLimiter>,
        articles: Arc<ArticleService>,
        clock: Arc<dyn Clock>,
        settings: CommentServiceSettings,
    ) -> Self {
        Self {
            repo,
            cache,
            sanitizer,
            rate_limiter,
            articles,
            clock,
            settings,
        }
    }
}
