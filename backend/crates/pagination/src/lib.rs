//! Page request and page result envelopes shared by list endpoints.
//!
//! [`PageRequest`] is the validated, one-based page selector accepted by
//! list queries. [`PageResult`] is the envelope returned to callers: the
//! total row count of the whole result set plus the records of a single
//! page. `total` is not required to be at least `records.len()`; it reflects
//! the full result set while `records` only holds the current page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size applied when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Validation errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one record.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The requested page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    PageSizeTooLarge {
        /// Configured upper bound.
        max: u32,
    },
}

/// One-based page selector.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 20).expect("valid page request");
/// assert_eq!(request.offset(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` or `page_size` is zero, or
    /// when `page_size` exceeds [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    /// First page with the default page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of records on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records preceding this page in the full result set.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageRequest {
    page: Option<u32>,
    page_size: Option<u32>,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(
            value.page.unwrap_or(1),
            value.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Total row count plus one page of records.
///
/// # Examples
/// ```
/// use pagination::PageResult;
///
/// let page = PageResult::new(42, vec!["tea", "coffee"]);
/// assert_eq!(page.total(), 42);
/// assert_eq!(page.records(), &["tea", "coffee"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    total: u64,
    records: Vec<T>,
}

impl<T> PageResult<T> {
    /// Build a page from the full result count and the page's records.
    #[must_use]
    pub const fn new(total: u64, records: Vec<T>) -> Self {
        Self { total, records }
    }

    /// Empty result set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total: 0,
            records: Vec::new(),
        }
    }

    /// Row count of the whole result set.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Records on this page, in query order.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}
