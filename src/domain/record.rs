// src/domain/record.rs
//! Bookkeeping fields shared by every stored entity.
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Identity, timestamps and the soft-deletion marker of a relational row.
///
/// A row with `deleted_at` set is invisible to every read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMeta<Id> {
    pub id: Id,
    pub timestamps: Timestamps,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<Id> RecordMeta<Id> {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn touch_only_moves_updated_at() {
        let now = Utc::now();
        let mut stamps = Timestamps::at(now);
        let later = now + Duration::seconds(30);
        stamps.touch(later);
        assert_eq!(stamps.created_at, now);
        assert_eq!(stamps.updated_at, later);
    }

    #[test]
    fn deleted_marker_is_reported() {
        let now = Utc::now();
        let mut meta = RecordMeta {
            id: 7_i64,
            timestamps: Timestamps::at(now),
            deleted_at: None,
        };
        assert!(!meta.is_deleted());
        meta.deleted_at = Some(now);
        assert!(meta.is_deleted());
    }
}
