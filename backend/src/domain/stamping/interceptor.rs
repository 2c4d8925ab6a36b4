//! Before-advice wrapping declared persistence operations.
//!
//! Every persistence call goes through one of the `intercept*` wrappers
//! with its [`OperationId`] and argument list. Operations with a declared
//! intent get their first argument stamped before the body runs;
//! undeclared operations and empty argument lists pass straight through.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::{AuditStamper, Auditable, IntentRegistry, OperationId, StampError};
use crate::domain::{ActorContext, ActorId, RequestContext};

/// Failure of an intercepted call.
#[derive(Debug, Error)]
pub enum InterceptError<E> {
    /// Audit stamping failed; the operation body never ran.
    #[error("audit stamping failed: {0}")]
    Stamp(#[source] StampError),
    /// The wrapped operation itself failed.
    #[error(transparent)]
    Operation(E),
}

impl<E> InterceptError<E> {
    /// The stamping failure, if that is what aborted the call.
    #[must_use]
    pub fn as_stamp(&self) -> Option<&StampError> {
        match self {
            Self::Stamp(err) => Some(err),
            Self::Operation(_) => None,
        }
    }
}

/// Stamps the entity argument of declared operations before they run.
#[derive(Clone)]
pub struct StampingInterceptor {
    registry: Arc<IntentRegistry>,
    stamper: AuditStamper,
}

impl StampingInterceptor {
    /// Build an interceptor from the declared operations and a stamper.
    #[must_use]
    pub fn new(registry: Arc<IntentRegistry>, stamper: AuditStamper) -> Self {
        Self { registry, stamper }
    }

    /// Declared operations consulted by this interceptor.
    #[must_use]
    pub fn registry(&self) -> &IntentRegistry {
        &self.registry
    }

    /// Run the before-advice for one call.
    ///
    /// Does nothing when `operation` has no declared intent or when `args`
    /// is empty. Otherwise stamps `args[0]` for the declared intent.
    ///
    /// # Errors
    /// Propagates [`StampError`] from the stamper; the entity is unchanged
    /// when that happens.
    pub fn before<E>(
        &self,
        operation: OperationId,
        actor: Option<ActorId>,
        args: &mut [E],
    ) -> Result<(), StampError>
    where
        E: Auditable,
    {
        let Some(intent) = self.registry.intent_for(operation) else {
            return Ok(());
        };
        let Some(entity) = args.first_mut() else {
            debug!(operation = %operation, "declared operation called without arguments");
            return Ok(());
        };
        self.stamper.stamp(operation.as_str(), intent, actor, entity)
    }

    /// Stamp using the task-local actor, then run `body` with the arguments.
    ///
    /// # Errors
    /// [`InterceptError::Stamp`] when stamping fails (the body is not run),
    /// [`InterceptError::Operation`] when the body fails.
    pub fn intercept<E, T, Err, F>(
        &self,
        operation: OperationId,
        args: &mut [E],
        body: F,
    ) -> Result<T, InterceptError<Err>>
    where
        E: Auditable,
        F: FnOnce(&mut [E]) -> Result<T, Err>,
    {
        self.intercept_in(&RequestContext::capture(), operation, args, body)
    }

    /// As [`Self::intercept`], taking the actor from an explicit context.
    ///
    /// # Errors
    /// See [`Self::intercept`].
    pub fn intercept_in<E, T, Err, F>(
        &self,
        context: &RequestContext,
        operation: OperationId,
        args: &mut [E],
        body: F,
    ) -> Result<T, InterceptError<Err>>
    where
        E: Auditable,
        F: FnOnce(&mut [E]) -> Result<T, Err>,
    {
        self.before(operation, context.actor(), args)
            .map_err(InterceptError::Stamp)?;
        body(args).map_err(InterceptError::Operation)
    }

    /// Async wrapper handing the (stamped) owned arguments to `body`.
    ///
    /// The actor is read from [`ActorContext`] before the body is polled.
    ///
    /// # Errors
    /// See [`Self::intercept`].
    pub async fn intercept_async<E, T, Err, F, Fut>(
        &self,
        operation: OperationId,
        mut args: Vec<E>,
        body: F,
    ) -> Result<T, InterceptError<Err>>
    where
        E: Auditable,
        F: FnOnce(Vec<E>) -> Fut,
        Fut: Future<Output = Result<T, Err>>,
    {
        self.before(operation, ActorContext::current(), &mut args)
            .map_err(InterceptError::Stamp)?;
        body(args).await.map_err(InterceptError::Operation)
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
