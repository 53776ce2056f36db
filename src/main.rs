use inkpost_core::application::{
    ports::{
        cache::Cache,
        security::TokenVerifier,
        text::{ContentSanitizer, MarkdownNormalizer},
        time::Clock,
        util::IdGenerator,
    },
    services::ApplicationServices,
};
use inkpost_core::config::AppConfig;
use inkpost_core::domain::{
    article::ArticleStore,
    comment::CommentRepository,
    site::{CategoryRepository, FriendLinkRepository},
};
use inkpost_core::infrastructure::{
    cache::RedisCache,
    database,
    id::UuidV7Generator,
    repositories::{
        PostgresCategoryRepository, PostgresCommentRepository, PostgresFriendLinkRepository,
    },
    search::ElasticsearchArticleStore,
    security::HmacTokenVerifier,
    text::{ComrakNormalizer, SensitiveWordFilter, UgcSanitizer},
    time::SystemClock,
};
use inkpost_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let settings = config.service_settings();

    let pool = database::init_pool(config.database_url(), config.store_timeout()).await?;
    database::run_migrations(&pool).await?;

    let comment_repo: Arc<dyn CommentRepository> =
        Arc::new(PostgresCommentRepository::new(pool.clone()));
    let category_repo: Arc<dyn CategoryRepository> =
        Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let friend_link_repo: Arc<dyn FriendLinkRepository> =
        Arc::new(PostgresFriendLinkRepository::new(pool));
    let article_store: Arc<dyn ArticleStore> = Arc::new(ElasticsearchArticleStore::new(
        config.search_url(),
        config.article_index(),
        config.store_timeout(),
    )?);
    let cache: Arc<dyn Cache> = Arc::new(RedisCache::from_url(
        config.redis_url(),
        config.cache_timeout(),
    )?);

    let words = match config.sensitive_words_file() {
        Some(path) => SensitiveWordFilter::from_file(path)
            .with_context(|| format!("reading sensitive words from {}", path.display()))?,
        None => SensitiveWordFilter::default(),
    };
    tracing::info!(words = words.len(), "sensitive word filter loaded");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let markdown: Arc<dyn MarkdownNormalizer> = Arc::new(ComrakNormalizer::new());
    let sanitizer: Arc<dyn ContentSanitizer> = Arc::new(UgcSanitizer::new(words));
    let token_verifier: Arc<dyn TokenVerifier> = Arc::new(HmacTokenVerifier::new(
        config.auth_token_secret().as_bytes(),
        Arc::clone(&clock),
    )?);
    let id_generator: Arc<dyn IdGenerator> = Arc::new(UuidV7Generator);

    let services = Arc::new(ApplicationServices::new(
        article_store,
        comment_repo,
        category_repo,
        friend_link_repo,
        cache,
        markdown,
        sanitizer,
        token_verifier,
        clock,
        id_generator,
        settings,
    ));

    services
        .articles
        .ensure_index(config.recreate_article_index())
        .await?;

    let state = HttpState {
        services: Arc::clone(&services),
    };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
