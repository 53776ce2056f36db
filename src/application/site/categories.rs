use std::{sync::Arc, time::Duration};

use super::SiteListQuery;
use crate::{
    application::{
        dto::{CategoryDto, Page},
        error::ApplicationResult,
        ports::time::Clock,
        resilience::with_deadline,
    },
    domain::site::{CategoryId, CategoryName, CategoryRepository, NewCategory},
};

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
    clock: Arc<dyn Clock>,
    store_timeout: Duration,
}

impl CategoryService {
    pub fn new(
        repo: Arc<dyn CategoryRepository>,
        clock: Arc<dyn Clock>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            clock,
            store_timeout,
        }
    }

    pub async fn create_category(&self, name: String) -> ApplicationResult<CategoryDto> {
        let name = CategoryName::new(name)?;
        let category = with_deadline(
            self.store_timeout,
            "create category",
            self.repo.insert(NewCategory {
                name,
                created_at: self.clock.now(),
            }),
        )
        .await?;

        tracing::info!(category_id = %category.meta.id, name = %category.name, "category created");
        Ok(category.into())
    }

    pub async fn list_categories(
        &self,
        query: SiteListQuery,
    ) -> ApplicationResult<Page<CategoryDto>> {
        let (request, window) = query.window();
        let (categories, total) =
            with_deadline(self.store_timeout, "list categories", self.repo.list(&window))
                .await?;
        Ok(request.page_of(categories.into_iter().map(CategoryDto::from).collect(), total))
    }

    /// Deleting a category that is already gone is not an error.
    pub async fn delete_category(&self, id: i64) -> ApplicationResult<u64> {
        let id = CategoryId::new(id)?;
        let deleted = with_deadline(
            self.store_timeout,
            "delete category",
            self.repo.soft_delete(id, self.clock.now()),
        )
        .await?;

        if deleted {
            tracing::info!(category_id = %id, "category deleted");
        }
        Ok(u64::from(deleted))
    }
}
