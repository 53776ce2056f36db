use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::RecordMeta;
use chrono::{DateTime, Utc};
use std::fmt;

pub const FRIEND_LINK_NAME_MAX_CHARS: usize = 64;
pub const FRIEND_LINK_URL_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FriendLinkId(pub i64);

impl FriendLinkId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("friend link id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<FriendLinkId> for i64 {
    fn from(value: FriendLinkId) -> Self {
        value.0
    }
}

impl fmt::Display for FriendLinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendLinkName(String);

impl FriendLinkName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "friend link name cannot be empty".into(),
            ));
        }
        if trimmed.chars().count() > FRIEND_LINK_NAME_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "friend link name cannot exceed {FRIEND_LINK_NAME_MAX_CHARS} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An absolute `http` or `https` address without whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendLinkUrl(String);

impl FriendLinkUrl {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| {
                DomainError::Validation("friend link must start with http:// or https://".into())
            })?;
        if rest.is_empty() || rest.starts_with('/') {
            return Err(DomainError::Validation("friend link has no host".into()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(
                "friend link cannot contain whitespace".into(),
            ));
        }
        if trimmed.chars().count() > FRIEND_LINK_URL_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "friend link cannot exceed {FRIEND_LINK_URL_MAX_CHARS} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendLink {
    pub meta: RecordMeta<FriendLinkId>,
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct NewFriendLink {
    pub name: FriendLinkName,
    pub link: FriendLinkUrl,
    pub created_at: DateTime<Utc>,
}
