//! In-memory category store used by the server binary and tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{PageRequest, PageResult};

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryId};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<CategoryId, Category>,
}

/// Category repository backed by a process-local map.
///
/// Identifiers are assigned sequentially from 1. Rows are stored exactly
/// as received, audit fields included.
#[derive(Debug, Default)]
pub struct FixtureCategoryRepository {
    table: Mutex<Table>,
}

impl FixtureCategoryRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored categories.
    pub fn len(&self) -> Result<usize, CategoryRepositoryError> {
        Ok(self.lock()?.rows.len())
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> Result<bool, CategoryRepositoryError> {
        Ok(self.lock()?.rows.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, CategoryRepositoryError> {
        self.table
            .lock()
            .map_err(|_| CategoryRepositoryError::connection("category table lock poisoned"))
    }
}

#[async_trait]
impl CategoryRepository for FixtureCategoryRepository {
    async fn insert(&self, mut category: Category) -> Result<Category, CategoryRepositoryError> {
        let mut table = self.lock()?;
        table.next_id += 1;
        let id = CategoryId::new(table.next_id);
        category.id = Some(id);
        table.rows.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryRepositoryError> {
        let id = category
            .id
            .ok_or_else(|| CategoryRepositoryError::query("update requires an identifier"))?;
        let mut table = self.lock()?;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| CategoryRepositoryError::missing(id.get()))?;
        *row = category.clone();
        Ok(category)
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn page(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<Category>, CategoryRepositoryError> {
        let table = self.lock()?;
        let mut rows: Vec<&Category> = table.rows.values().collect();
        rows.sort_by_key(|category| (category.sort, category.id));

        let total = u64::try_from(rows.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.page_size()).unwrap_or(usize::MAX);
        let records = rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(PageResult::new(total, records))
    }
}
