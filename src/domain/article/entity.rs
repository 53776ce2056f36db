// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleId, ArticleTitle};
use crate::domain::record::Timestamps;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    pub id: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleCounters {
    pub look: u64,
    pub comment: u64,
    pub digg: u64,
    pub collects: u64,
}

/// The counters that may only move through increments and decrements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleCounter {
    Look,
    Comment,
    Digg,
    Collects,
}

impl ArticleCounter {
    /// Field name inside the indexed document.
    pub fn field_name(&self) -> &'static str {
        match self {
            ArticleCounter::Look => "look_count",
            ArticleCounter::Comment => "comment_count",
            ArticleCounter::Digg => "digg_count",
            ArticleCounter::Collects => "collects_count",
        }
    }

    pub fn read(&self, counters: &ArticleCounters) -> u64 {
        match self {
            ArticleCounter::Look => counters.look,
            ArticleCounter::Comment => counters.comment,
            ArticleCounter::Digg => counters.digg,
            ArticleCounter::Collects => counters.collects,
        }
    }

    fn slot<'a>(&self, counters: &'a mut ArticleCounters) -> &'a mut u64 {
        match self {
            ArticleCounter::Look => &mut counters.look,
            ArticleCounter::Comment => &mut counters.comment,
            ArticleCounter::Digg => &mut counters.digg,
            ArticleCounter::Collects => &mut counters.collects,
        }
    }
}

impl ArticleCounters {
    /// Apply `delta`, saturating at zero.
    pub fn apply(&mut self, counter: ArticleCounter, delta: i64) {
        let slot = counter.slot(self);
        *slot = if delta.is_negative() {
            slot.saturating_sub(delta.unsigned_abs())
        } else {
            slot.saturating_add(delta.unsigned_abs())
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub cover: Cover,
    pub author: Author,
    pub counters: ArticleCounters,
    pub version: i64,
    pub timestamps: Timestamps,
}

/// Everything the caller supplies when creating an article.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub cover: Cover,
    pub author: Author,
}

/// Editable fields of an article; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ArticleEdit {
    pub title: Option<ArticleTitle>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub cover: Option<Cover>,
}

impl Article {
    pub fn create(draft: ArticleDraft, now: DateTime<Utc>) -> Self {
        let ArticleDraft {
            id,
            title,
            summary,
            content,
            category,
            cover,
            author,
        } = draft;

        Self {
            id,
            title,
            summary,
            content,
            category,
            cover,
            author,
            counters: ArticleCounters::default(),
            version: 1,
            timestamps: Timestamps::at(now),
        }
    }

    /// Apply an edit, bumping the version by exactly one.
    pub fn apply_edit(&mut self, edit: ArticleEdit, now: DateTime<Utc>) {
        let ArticleEdit {
            title,
            summary,
            content,
            category,
            cover,
        } = edit;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(summary) = summary {
            self.summary = summary;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(cover) = cover {
            self.cover = cover;
        }

        self.version += 1;
        self.timestamps.touch(now);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleStats {
    pub total_articles: u64,
    pub total_comments: u64,
    pub total_views: u64,
    pub total_diggs: u64,
    pub total_collects: u64,
}
