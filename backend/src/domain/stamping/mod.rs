//! Audit field auto-fill for persistence writes.
//!
//! Purpose: stamp creation and modification metadata onto entities just
//! before a declared persistence operation runs, so call sites never pass
//! audit fields themselves.
//!
//! Public surface:
//! - [`OperationIntent`] and [`IntentRegistry`]: which operations are
//!   stamped, and how.
//! - [`Auditable`] (usually via [`impl_auditable!`](crate::impl_auditable)):
//!   the setters an entity exposes.
//! - [`AuditStamper`]: writes timestamps and the actor onto one entity.
//! - [`StampingInterceptor`]: wraps operation calls and runs the stamper
//!   on their first argument.

mod auditable;
mod intent;
mod interceptor;
mod stamper;

use chrono::{DateTime, Utc};

use super::macros::define_error;

pub use auditable::{AuditField, Auditable};
pub use intent::{
    IntentRegistry, IntentRegistryBuilder, OperationId, OperationIntent, RegistryError,
};
pub use interceptor::{InterceptError, StampingInterceptor};
pub use stamper::{AuditStamper, MissingActorPolicy};

/// Timestamp type written into audit time fields.
pub type AuditTimestamp = DateTime<Utc>;

define_error! {
    /// Failures raised while stamping an entity.
    pub enum StampError {
        /// The entity does not expose a setter the intent requires.
        MissingSetter { entity: String, field: String } =>
            "{entity} does not expose {field} required for audit stamping",
        /// No actor is bound and the policy forbids anonymous writes.
        MissingActor { operation: String } =>
            "no actor bound to the current task for {operation}",
    }
}
