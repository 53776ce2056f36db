//! Request bodies for the document index.
use crate::domain::article::{Article, ArticleCounter, ArticleId, ArticleSearch};
use serde_json::{Value, json};

/// Weighted full-text fields.
pub const SEARCH_FIELDS: [&str; 3] = ["title^3", "abstract^2", "content"];

pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "created_at": { "type": "date" },
                "updated_at": { "type": "date" },
                "title": { "type": "text" },
                "abstract": { "type": "text" },
                "content": { "type": "text" },
                "look_count": { "type": "integer" },
                "comment_count": { "type": "integer" },
                "digg_count": { "type": "integer" },
                "collects_count": { "type": "integer" },
                "user_id": { "type": "integer" },
                "user_name": { "type": "keyword" },
                "category": { "type": "keyword" },
                "cover_id": { "type": "integer" },
                "cover_url": { "type": "keyword" },
                "version": { "type": "long" }
            }
        }
    })
}

pub fn search_body(search: &ArticleSearch) -> Value {
    let mut must = Vec::new();
    if let Some(key) = &search.key {
        must.push(json!({
            "multi_match": {
                "query": key,
                "fields": SEARCH_FIELDS,
            }
        }));
    }

    let mut filter = Vec::new();
    if let Some(category) = &search.category {
        filter.push(json!({ "term": { "category": category } }));
    }

    json!({
        "query": { "bool": { "must": must, "filter": filter } },
        "from": search.offset(),
        "size": search.page_size,
        "sort": [ { search.sort_field.as_str(): { "order": search.sort_order.as_str() } } ],
        "track_total_hits": true,
    })
}

/// Only the fields an edit may touch; counters are never part of it.
pub fn editable_fields(article: &Article) -> Value {
    json!({
        "doc": {
            "title": article.title.as_str(),
            "abstract": article.summary,
            "content": article.content,
            "category": article.category,
            "cover_id": article.cover.id,
            "cover_url": article.cover.url,
            "version": article.version,
            "updated_at": article.timestamps.updated_at,
        }
    })
}

pub fn increment_script(counter: ArticleCounter, delta: i64) -> Value {
    json!({
        "script": {
            "lang": "painless",
            "source": "def current = ctx._source[params.field] == null ? 0 : ctx._source[params.field]; \
                       ctx._source[params.field] = Math.max(0, current + params.delta);",
            "params": { "field": counter.field_name(), "delta": delta },
        }
    })
}

pub fn stats_body() -> Value {
    json!({
        "size": 0,
        "track_total_hits": true,
        "aggs": {
            "total_comments": { "sum": { "field": "comment_count" } },
            "total_views": { "sum": { "field": "look_count" } },
            "total_diggs": { "sum": { "field": "digg_count" } },
            "total_collects": { "sum": { "field": "collects_count" } },
        }
    })
}

/// NDJSON payload for `_bulk`: one delete action per line.
pub fn bulk_delete_body(index: &str, ids: &[ArticleId]) -> String {
    ids.iter()
        .map(|id| {
            let mut line = json!({ "delete": { "_index": index, "_id": id.as_str() } }).to_string();
            line.push('\n');
            line
        })
        .collect()
}
