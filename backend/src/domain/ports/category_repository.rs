//! Port abstraction for category persistence adapters and their errors.
//!
//! Adapters receive entities whose audit fields are already stamped; they
//! store them as given and never compute audit metadata themselves.

use async_trait::async_trait;
use pagination::{PageRequest, PageResult};

use crate::domain::macros::define_error;
use crate::domain::{Category, CategoryId};

define_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
        /// The record to update does not exist.
        Missing { id: i64 } => "category {id} does not exist",
    }
}

/// Port for storing and reading menu categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Store a new category and return it with its assigned identifier.
    async fn insert(&self, category: Category) -> Result<Category, CategoryRepositoryError>;

    /// Overwrite an existing category, matched by identifier.
    async fn update(&self, category: Category) -> Result<Category, CategoryRepositoryError>;

    /// Fetch a category by identifier.
    async fn find_by_id(&self, id: CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;

    /// List categories ordered by `sort`, then identifier.
    async fn page(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<Category>, CategoryRepositoryError>;
}
