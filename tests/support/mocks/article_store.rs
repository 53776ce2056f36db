// tests/support/mocks/article_store.rs
use async_trait::async_trait;
use inkpost_core::domain::article::{
    Article, ArticleCounter, ArticleId, ArticleSearch, ArticleStats, ArticleStore, SearchPage,
    SortField, SortOrder,
};
use inkpost_core::domain::errors::{DomainError, DomainResult};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Document store kept in memory, with switches for injecting failures.
#[derive(Default)]
pub struct InMemoryArticleStore {
    docs: Mutex<BTreeMap<String, Article>>,
    index: AtomicBool,
    index_creations: AtomicU32,
    index_deletions: AtomicU32,
    fail_updates: AtomicBool,
    failing_increments: AtomicU32,
    increment_calls: AtomicU32,
    poisoned: Mutex<HashSet<String>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a document in place without going through the service.
    pub fn seed(&self, article: Article) {
        self.docs
            .lock()
            .unwrap()
            .insert(article.id.as_str().to_string(), article);
    }

    pub fn get(&self, id: &str) -> Option<Article> {
        self.docs.lock().unwrap().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docs.lock().unwrap().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// The next `n` increments fail with a transient index error.
    pub fn fail_next_increments(&self, n: u32) {
        self.failing_increments.store(n, Ordering::SeqCst);
    }

    pub fn increment_calls(&self) -> u32 {
        self.increment_calls.load(Ordering::SeqCst)
    }

    /// Any bulk delete containing `id` fails without removing anything.
    pub fn poison(&self, id: &str) {
        self.poisoned.lock().unwrap().insert(id.to_string());
    }

    pub fn set_index_exists(&self, exists: bool) {
        self.index.store(exists, Ordering::SeqCst);
    }

    pub fn index_creations(&self) -> u32 {
        self.index_creations.load(Ordering::SeqCst)
    }

    pub fn index_deletions(&self) -> u32 {
        self.index_deletions.load(Ordering::SeqCst)
    }
}

fn matches_key(article: &Article, key: &str) -> bool {
    let key = key.to_lowercase();
    [
        article.title.as_str(),
        article.summary.as_str(),
        article.content.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&key))
}

fn sort_value(article: &Article, field: SortField) -> i64 {
    let count = |value: u64| i64::try_from(value).unwrap_or(i64::MAX);
    match field {
        SortField::CreatedAt => article.timestamps.created_at.timestamp_millis(),
        SortField::UpdatedAt => article.timestamps.updated_at.timestamp_millis(),
        SortField::LookCount => count(article.counters.look),
        SortField::CommentCount => count(article.counters.comment),
        SortField::DiggCount => count(article.counters.digg),
        SortField::CollectsCount => count(article.counters.collects),
        SortField::Version => article.version,
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn index_exists(&self) -> DomainResult<bool> {
        Ok(self.index.load(Ordering::SeqCst))
    }

    async fn create_index(&self) -> DomainResult<()> {
        self.index.store(true, Ordering::SeqCst);
        self.index_creations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_index(&self) -> DomainResult<()> {
        self.index.store(false, Ordering::SeqCst);
        self.index_deletions.fetch_add(1, Ordering::SeqCst);
        self.docs.lock().unwrap().clear();
        Ok(())
    }

    async fn exists(&self, id: &ArticleId) -> DomainResult<bool> {
        Ok(self.contains(id.as_str()))
    }

    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.get(id.as_str()))
    }

    async fn insert(&self, article: &Article) -> DomainResult<()> {
        let mut docs = self.docs.lock().unwrap();
        if docs.contains_key(article.id.as_str()) {
            return Err(DomainError::Conflict(format!("article {} exists", article.id)));
        }
        docs.insert(article.id.as_str().to_string(), article.clone());
        Ok(())
    }

    async fn update(&self, article: &Article) -> DomainResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Index("update rejected".into()));
        }
        let mut docs = self.docs.lock().unwrap();
        let stored = docs
            .get_mut(article.id.as_str())
            .ok_or_else(|| DomainError::NotFound(format!("article {}", article.id)))?;
        stored.title = article.title.clone();
        stored.summary = article.summary.clone();
        stored.content = article.content.clone();
        stored.category = article.category.clone();
        stored.cover = article.cover.clone();
        stored.version = article.version;
        stored.timestamps.updated_at = article.timestamps.updated_at;
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[ArticleId]) -> DomainResult<()> {
        {
            let poisoned = self.poisoned.lock().unwrap();
            if let Some(bad) = ids.iter().find(|id| poisoned.contains(id.as_str())) {
                return Err(DomainError::Index(format!("bulk delete failed at {bad}")));
            }
        }
        let mut docs = self.docs.lock().unwrap();
        for id in ids {
            docs.remove(id.as_str());
        }
        Ok(())
    }

    async fn increment(
        &self,
        id: &ArticleId,
        counter: ArticleCounter,
        delta: i64,
    ) -> DomainResult<()> {
        self.increment_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self.failing_increments.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_increments.store(failing - 1, Ordering::SeqCst);
            return Err(DomainError::Index("index unavailable".into()));
        }
        let mut docs = self.docs.lock().unwrap();
        let stored = docs
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::NotFound(format!("article {id}")))?;
        stored.counters.apply(counter, delta);
        Ok(())
    }

    async fn search(&self, search: &ArticleSearch) -> DomainResult<SearchPage> {
        let docs = self.docs.lock().unwrap();
        let mut hits: Vec<Article> = docs
            .values()
            .filter(|a| search.key.as_deref().is_none_or(|key| matches_key(a, key)))
            .filter(|a| search.category.as_deref().is_none_or(|c| a.category == c))
            .cloned()
            .collect();
        hits.sort_by_key(|a| sort_value(a, search.sort_field));
        if search.sort_order == SortOrder::Desc {
            hits.reverse();
        }

        let total = hits.len() as u64;
        let offset = usize::try_from(search.offset()).unwrap_or(usize::MAX);
        let articles = hits
            .into_iter()
            .skip(offset)
            .take(search.page_size as usize)
            .collect();
        Ok(SearchPage { articles, total })
    }

    async fn stats(&self) -> DomainResult<ArticleStats> {
        let docs = self.docs.lock().unwrap();
        Ok(docs.values().fold(
            ArticleStats {
                total_articles: docs.len() as u64,
                ..ArticleStats::default()
            },
            |mut acc, a| {
                acc.total_comments += a.counters.comment;
                acc.total_views += a.counters.look;
                acc.total_diggs += a.counters.digg;
                acc.total_collects += a.counters.collects;
                acc
            },
        ))
    }
}
