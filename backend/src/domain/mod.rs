//! Domain primitives, aggregates and services.
//!
//! Purpose: define the audit-stamping core and the category aggregate it
//! protects, independent of HTTP or storage concerns.
//!
//! Public surface:
//! - [`ActorId`], [`ActorContext`], [`RequestContext`]: who is acting on
//!   behalf of the current request, carried task-locally or explicitly.
//! - [`stamping`]: intent registry, `Auditable` capability, stamper and
//!   interceptor.
//! - [`Category`] and friends: the menu category entity.
//! - [`CategoryService`]: use cases behind [`ports::CategoryCommand`].
//! - [`Error`] / [`ErrorCode`]: transport-agnostic error payload.

pub(crate) mod macros;

pub mod actor;
pub mod actor_context;
pub mod audited_category_repository;
pub mod category;
pub mod category_service;
pub mod error;
pub mod ports;
pub mod stamping;

pub use self::actor::{ActorId, ActorIdError};
pub use self::actor_context::{ActorContext, ActorContextError, RequestContext};
pub use self::audited_category_repository::{
    AuditedCategoryRepository, INSERT_CATEGORY, UPDATE_CATEGORY, declare_category_operations,
};
pub use self::category::{Category, CategoryDraft, CategoryId, CategoryStatus};
pub use self::category_service::CategoryService;
pub use self::error::{Error, ErrorCode};
