//! Category domain service.
//!
//! Implements [`CategoryCommand`] on top of a [`CategoryRepository`] whose
//! writes are routed through the stamping interceptor.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageResult};

use crate::domain::ports::{CategoryCommand, CategoryRepository, CategoryRepositoryError};
use crate::domain::stamping::{InterceptError, StampError, StampingInterceptor};
use crate::domain::{AuditedCategoryRepository, Category, CategoryDraft, CategoryId, Error};

fn map_repository_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::Missing { id } => {
            Error::not_found(format!("category {id} not found"))
        }
    }
}

fn map_stamp_error(error: StampError) -> Error {
    match error {
        StampError::MissingActor { .. } => Error::unauthorized(error.to_string()),
        StampError::MissingSetter { .. } => Error::internal(error.to_string()),
    }
}

fn map_intercept_error(error: InterceptError<CategoryRepositoryError>) -> Error {
    match error {
        InterceptError::Stamp(err) => map_stamp_error(err),
        InterceptError::Operation(err) => map_repository_error(err),
    }
}

fn validate(draft: &CategoryDraft) -> Result<(), Error> {
    if draft.name.trim().is_empty() {
        return Err(Error::invalid_request("category name must not be empty"));
    }
    Ok(())
}

/// Category service implementing the command driving port.
pub struct CategoryService<R> {
    categories: AuditedCategoryRepository<R>,
}

impl<R> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            categories: self.categories.clone(),
        }
    }
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    /// Create a service whose writes are stamped by `interceptor`.
    pub fn new(category_repo: Arc<R>, interceptor: StampingInterceptor) -> Self {
        Self {
            categories: AuditedCategoryRepository::new(category_repo, interceptor),
        }
    }
}

#[async_trait]
impl<R> CategoryCommand for CategoryService<R>
where
    R: CategoryRepository + 'static,
{
    async fn create(&self, draft: CategoryDraft) -> Result<Category, Error> {
        validate(&draft)?;
        self.categories
            .insert(Category::from_draft(draft))
            .await
            .map_err(map_intercept_error)
    }

    async fn update(&self, id: CategoryId, draft: CategoryDraft) -> Result<Category, Error> {
        validate(&draft)?;
        let mut category = self
            .categories
            .find_by_id(id)
            .await
            .map_err(map_intercept_error)?
            .ok_or_else(|| Error::not_found(format!("category {id} not found")))?;

        category.apply(draft);
        self.categories
            .update(category)
            .await
            .map_err(map_intercept_error)
    }

    async fn page(&self, request: PageRequest) -> Result<PageResult<Category>, Error> {
        self.categories
            .page(request)
            .await
            .map_err(map_intercept_error)
    }
}

#[cfg(test)]
#[path = "category_service_tests.rs"]
mod tests;
