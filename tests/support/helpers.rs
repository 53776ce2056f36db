// tests/support/helpers.rs
use super::mocks::{
    InMemoryArticleStore, InMemoryCache, InMemoryCategoryRepo, InMemoryCommentRepo,
    InMemoryFriendLinkRepo, PassthroughMarkdown, SequentialIds, StepClock,
};
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, Response, StatusCode, header};
use chrono::Duration;
use inkpost_core::application::services::{ApplicationServices, ServiceSettings};
use inkpost_core::domain::user::Role;
use inkpost_core::infrastructure::security::{HmacTokenVerifier, TokenClaims};
use inkpost_core::infrastructure::text::{SensitiveWordFilter, UgcSanitizer};
use inkpost_core::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";
pub const BLOCKED_WORD: &str = "darn";

/// Services wired to in-memory adapters, with handles on every adapter.
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub store: Arc<InMemoryArticleStore>,
    pub cache: Arc<InMemoryCache>,
    pub comments: Arc<InMemoryCommentRepo>,
    pub categories: Arc<InMemoryCategoryRepo>,
    pub friend_links: Arc<InMemoryFriendLinkRepo>,
    pub clock: Arc<StepClock>,
    pub verifier: Arc<HmacTokenVerifier>,
}

pub fn test_app() -> TestApp {
    test_app_with(ServiceSettings::default())
}

pub fn test_app_with(settings: ServiceSettings) -> TestApp {
    let store = Arc::new(InMemoryArticleStore::new());
    let cache = Arc::new(InMemoryCache::new());
    let comments = Arc::new(InMemoryCommentRepo::new());
    let categories = Arc::new(InMemoryCategoryRepo::new());
    let friend_links = Arc::new(InMemoryFriendLinkRepo::new());
    let clock = Arc::new(StepClock::new());
    let verifier = Arc::new(
        HmacTokenVerifier::new(TEST_SECRET, clock.clone()).expect("test secret is long enough"),
    );
    let words = SensitiveWordFilter::from_words([BLOCKED_WORD]).expect("word list builds");
    let sanitizer = UgcSanitizer::new(words);

    let services = Arc::new(ApplicationServices::new(
        store.clone(),
        comments.clone(),
        categories.clone(),
        friend_links.clone(),
        cache.clone(),
        Arc::new(PassthroughMarkdown),
        Arc::new(sanitizer),
        verifier.clone(),
        clock.clone(),
        Arc::new(SequentialIds::default()),
        settings,
    ));

    TestApp {
        services,
        store,
        cache,
        comments,
        categories,
        friend_links,
        clock,
        verifier,
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(
            HttpState {
                services: self.services.clone(),
            },
            &[],
        )
    }

    pub fn token(&self, user_id: i64, role: Role) -> String {
        self.verifier
            .sign(&TokenClaims {
                sub: user_id,
                name: format!("user{user_id}"),
                role,
                exp: (self.clock.base() + Duration::days(1)).timestamp(),
            })
            .expect("sign token")
    }

    pub fn admin_token(&self) -> String {
        self.token(1, Role::Admin)
    }

    pub fn user_token(&self, user_id: i64) -> String {
        self.token(user_id, Role::User)
    }
}

/// Let detached background tasks run to completion.
pub async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Status line plus the decoded `{code, data, msg}` envelope.
pub async fn read_envelope(resp: Response<Body>) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
