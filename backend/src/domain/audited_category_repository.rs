//! Category repository decorator routing writes through the stamping
//! interceptor.

use std::sync::Arc;

use pagination::{PageRequest, PageResult};

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::stamping::{
    InterceptError, IntentRegistryBuilder, OperationId, StampingInterceptor,
};
use crate::domain::{Category, CategoryId};

/// Operation creating a category.
pub const INSERT_CATEGORY: OperationId = OperationId::new("category.insert");
/// Operation overwriting a category.
pub const UPDATE_CATEGORY: OperationId = OperationId::new("category.update");
/// Operation reading one category.
pub const FIND_CATEGORY: OperationId = OperationId::new("category.find_by_id");
/// Operation listing categories.
pub const PAGE_CATEGORIES: OperationId = OperationId::new("category.page");

/// Declare the category write operations on a registry builder.
pub fn declare_category_operations(builder: IntentRegistryBuilder) -> IntentRegistryBuilder {
    builder.insert(INSERT_CATEGORY).update(UPDATE_CATEGORY)
}

/// Result of a category call made through the interceptor.
pub type AuditedResult<T> = Result<T, InterceptError<CategoryRepositoryError>>;

/// Wraps a [`CategoryRepository`] so declared writes are stamped first.
pub struct AuditedCategoryRepository<R> {
    inner: Arc<R>,
    interceptor: StampingInterceptor,
}

impl<R> Clone for AuditedCategoryRepository<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            interceptor: self.interceptor.clone(),
        }
    }
}

impl<R> AuditedCategoryRepository<R>
where
    R: CategoryRepository,
{
    /// Decorate `inner` with `interceptor`.
    pub fn new(inner: Arc<R>, interceptor: StampingInterceptor) -> Self {
        Self { inner, interceptor }
    }

    /// Stamp and insert a category.
    pub async fn insert(&self, category: Category) -> AuditedResult<Category> {
        let inner = Arc::clone(&self.inner);
        self.interceptor
            .intercept_async(INSERT_CATEGORY, vec![category], |args| async move {
                inner.insert(single(args)?).await
            })
            .await
    }

    /// Stamp and update a category.
    pub async fn update(&self, category: Category) -> AuditedResult<Category> {
        let inner = Arc::clone(&self.inner);
        self.interceptor
            .intercept_async(UPDATE_CATEGORY, vec![category], |args| async move {
                inner.update(single(args)?).await
            })
            .await
    }

    /// Fetch a category; reads carry no entity and are never stamped.
    pub async fn find_by_id(&self, id: CategoryId) -> AuditedResult<Option<Category>> {
        let inner = Arc::clone(&self.inner);
        self.interceptor
            .intercept_async(FIND_CATEGORY, Vec::<Category>::new(), |_| async move {
                inner.find_by_id(id).await
            })
            .await
    }

    /// List one page of categories.
    pub async fn page(&self, request: PageRequest) -> AuditedResult<PageResult<Category>> {
        let inner = Arc::clone(&self.inner);
        self.interceptor
            .intercept_async(PAGE_CATEGORIES, Vec::<Category>::new(), |_| async move {
                inner.page(request).await
            })
            .await
    }
}

fn single(args: Vec<Category>) -> Result<Category, CategoryRepositoryError> {
    args.into_iter()
        .next()
        .ok_or_else(|| CategoryRepositoryError::query("write called without a category"))
}
