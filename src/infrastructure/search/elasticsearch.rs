// src/infrastructure/search/elasticsearch.rs
use super::{ArticleDocument, query};
use crate::domain::article::{
    Article, ArticleCounter, ArticleId, ArticleSearch, ArticleStats, ArticleStore, SearchPage,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header::CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

/// Article store backed by an Elasticsearch-compatible REST API.
///
/// Every write passes `refresh=true` so the change is searchable before the
/// call returns.
#[derive(Clone)]
pub struct ElasticsearchArticleStore {
    client: Client,
    base_url: String,
    index: String,
}

impl ElasticsearchArticleStore {
    pub fn new(base_url: &str, index: &str, timeout: Duration) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DomainError::Index(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
        })
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{path}", self.base_url, self.index)
    }
}

#[derive(Deserialize)]
struct GetResponse {
    #[serde(rename = "_source")]
    source: ArticleDocument,
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
    total: TotalHits,
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: ArticleDocument,
}

#[derive(Deserialize)]
struct StatsResponse {
    hits: Hits,
    aggregations: StatsAggregations,
}

#[derive(Deserialize)]
struct StatsAggregations {
    total_comments: SumAggregation,
    total_views: SumAggregation,
    total_diggs: SumAggregation,
    total_collects: SumAggregation,
}

#[derive(Deserialize)]
struct SumAggregation {
    value: f64,
}

impl SumAggregation {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn as_count(&self) -> u64 {
        self.value.max(0.0).round() as u64
    }
}

#[derive(Deserialize)]
struct BulkResponse {
    errors: bool,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

fn transport(err: reqwest::Error) -> DomainError {
    DomainError::Index(err.to_string())
}

/// Pass successful responses through; turn everything else into an index error.
async fn ensure_success(response: Response, operation: &str) -> DomainResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DomainError::Index(format!("{operation}: {status}: {body}")))
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> DomainResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| DomainError::Index(format!("malformed index response: {err}")))
}

#[async_trait]
impl ArticleStore for ElasticsearchArticleStore {
    async fn index_exists(&self) -> DomainResult<bool> {
        let response = self
            .client
            .head(self.index_url())
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            _ => ensure_success(response, "check index").await.map(|_| true),
        }
    }

    async fn create_index(&self) -> DomainResult<()> {
        let response = self
            .client
            .put(self.index_url())
            .json(&query::index_mapping())
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response, "create index").await?;
        Ok(())
    }

    async fn delete_index(&self) -> DomainResult<()> {
        let response = self
            .client
            .delete(self.index_url())
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        ensure_success(response, "delete index").await?;
        Ok(())
    }

    async fn exists(&self, id: &ArticleId) -> DomainResult<bool> {
        let response = self
            .client
            .head(self.url(&format!("_doc/{id}")))
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            _ => ensure_success(response, "check article").await.map(|_| true),
        }
    }

    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>> {
        let response = self
            .client
            .get(self.url(&format!("_doc/{id}")))
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let found: GetResponse = decode(ensure_success(response, "get article").await?).await?;
        Article::try_from(found.source).map(Some)
    }

    async fn insert(&self, article: &Article) -> DomainResult<()> {
        let response = self
            .client
            .put(self.url(&format!("_create/{}?refresh=true", article.id)))
            .json(&ArticleDocument::from(article))
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::CONFLICT {
            return Err(DomainError::Conflict(format!(
                "article {} already exists",
                article.id
            )));
        }
        ensure_success(response, "create article").await?;
        Ok(())
    }

    async fn update(&self, article: &Article) -> DomainResult<()> {
        let response = self
            .client
            .post(self.url(&format!("_update/{}?refresh=true", article.id)))
            .json(&query::editable_fields(article))
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::NotFound(format!("article {} not found", article.id)));
        }
        ensure_success(response, "update article").await?;
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[ArticleId]) -> DomainResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let response = self
            .client
            .post(format!("{}/_bulk?refresh=true", self.base_url))
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(query::bulk_delete_body(&self.index, ids))
            .send()
            .await
            .map_err(transport)?;
        let outcome: BulkResponse = decode(ensure_success(response, "bulk delete").await?).await?;

        if outcome.errors {
            let first = outcome
                .items
                .iter()
                .find_map(|item| item.get("delete")?.get("error").cloned())
                .unwrap_or_default();
            return Err(DomainError::Index(format!("bulk delete failed: {first}")));
        }
        Ok(())
    }

    async fn increment(
        &self,
        id: &ArticleId,
        counter: ArticleCounter,
        delta: i64,
    ) -> DomainResult<()> {
        let response = self
            .client
            .post(self.url(&format!("_update/{id}?refresh=true&retry_on_conflict=3")))
            .json(&query::increment_script(counter, delta))
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::NotFound(format!("article {id} not found")));
        }
        ensure_success(response, "increment counter").await?;
        Ok(())
    }

    async fn search(&self, search: &ArticleSearch) -> DomainResult<SearchPage> {
        let response = self
            .client
            .post(self.url("_search"))
            .json(&query::search_body(search))
            .send()
            .await
            .map_err(transport)?;
        let found: SearchResponse = decode(ensure_success(response, "search").await?).await?;

        let articles = found
            .hits
            .hits
            .into_iter()
            .map(|hit| Article::try_from(hit.source))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(SearchPage {
            articles,
            total: found.hits.total.value,
        })
    }

    async fn stats(&self) -> DomainResult<ArticleStats> {
        let response = self
            .client
            .post(self.url("_search"))
            .json(&query::stats_body())
            .send()
            .await
            .map_err(transport)?;
        let found: StatsResponse = decode(ensure_success(response, "aggregate").await?).await?;
        let aggs = found.aggregations;

        Ok(ArticleStats {
            total_articles: found.hits.total.value,
            total_comments: aggs.total_comments.as_count(),
            total_views: aggs.total_views.as_count(),
            total_diggs: aggs.total_diggs.as_count(),
            total_collects: aggs.total_collects.as_count(),
        })
    }
}
