//! Driving port for category writes and listings.

use async_trait::async_trait;
use pagination::{PageRequest, PageResult};

use crate::domain::{Category, CategoryDraft, CategoryId, Error};

/// Use-case port consumed by inbound adapters.
#[async_trait]
pub trait CategoryCommand: Send + Sync {
    /// Create a category attributed to the current actor.
    async fn create(&self, draft: CategoryDraft) -> Result<Category, Error>;

    /// Replace a category's content, attributed to the current actor.
    async fn update(&self, id: CategoryId, draft: CategoryDraft) -> Result<Category, Error>;

    /// List one page of categories.
    async fn page(&self, request: PageRequest) -> Result<PageResult<Category>, Error>;
}
