// src/application/comments/rate_limit.rs
use std::{sync::Arc, time::Duration};

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::cache::Cache,
    },
    domain::user::UserId,
};

/// Per-user fixed-window counter kept in the shared cache.
///
/// The first request of a window starts the counter with an expiry; the
/// window resets when the key expires. Cache outages let requests through.
pub struct FixedWindowRateLimiter {
    cache: Arc<dyn Cache>,
    limit: u32,
    window: Duration,
}

impl FixedWindowRateLimiter {
    pub fn new(cache: Arc<dyn Cache>, limit: u32, window: Duration) -> Self {
        Self {
            cache,
            limit,
            window,
        }
    }

    pub fn key(user_id: UserId) -> String {
        format!("comment_limit:{user_id}")
    }

    pub async fn check(&self, user_id: UserId) -> ApplicationResult<()> {
        match self
            .cache
            .incr_with_expiry(&Self::key(user_id), self.window)
            .await
        {
            Ok(count) if count > i64::from(self.limit) => {
                tracing::info!(user_id = %user_id, count, "comment rate limit hit");
                Err(ApplicationError::rate_limited(format!(
                    "at most {} comments per {} seconds",
                    self.limit,
                    self.window.as_secs()
                )))
            }
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "rate limiter unavailable, allowing request");
                Ok(())
            }
        }
    }
}
