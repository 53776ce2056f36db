use crate::domain::site::{Category, FriendLink};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.meta.id.into(),
            created_at: category.meta.timestamps.created_at,
            updated_at: category.meta.timestamps.updated_at,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FriendLinkDto {
    pub id: i64,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub link: String,
}

impl From<FriendLink> for FriendLinkDto {
    fn from(link: FriendLink) -> Self {
        Self {
            id: link.meta.id.into(),
            created_at: link.meta.timestamps.created_at,
            updated_at: link.meta.timestamps.updated_at,
            name: link.name,
            link: link.link,
        }
    }
}
