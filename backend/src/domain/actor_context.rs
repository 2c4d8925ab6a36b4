//! Request-scoped actor identity.
//!
//! [`ActorContext`] associates the currently executing task with the
//! [`ActorId`] of the user it acts for, so persistence writes can be
//! attributed without threading the id through every call. Each request
//! runs inside its own scope: the slot starts empty (or pre-populated),
//! may be overwritten any number of times, and is dropped when the scope's
//! future completes. Values never leak into concurrently running tasks.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`ActorContext::scope_with`] (or capture a [`RequestContext`]) when
//! spawning new tasks, and [`ActorContext::sync_scope`] when moving work
//! onto blocking threads.

use std::cell::Cell;
use std::future::Future;

use tokio::task_local;

use super::ActorId;
use super::macros::define_error;

task_local! {
    /// Task-local slot for the current actor.
    static CURRENT_ACTOR: Cell<Option<ActorId>>;
}

define_error! {
    /// Errors raised when writing the current actor.
    pub enum ActorContextError {
        /// The caller is not running inside an actor scope.
        OutOfScope => "no actor scope is active for the current task",
    }
}

/// Accessors for the task-local actor slot.
///
/// # Examples
/// ```
/// use backend::domain::{ActorContext, ActorId};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let observed = ActorContext::scope(async {
///     ActorContext::set_current(ActorId::new(42)).expect("inside scope");
///     ActorContext::current()
/// })
/// .await;
/// assert_eq!(observed, Some(ActorId::new(42)));
/// assert_eq!(ActorContext::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ActorContext;

impl ActorContext {
    /// Run `fut` with an empty actor slot in scope.
    pub async fn scope<Fut>(fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT_ACTOR.scope(Cell::new(None), fut).await
    }

    /// Run `fut` with `actor` already bound.
    pub async fn scope_with<Fut>(actor: ActorId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT_ACTOR.scope(Cell::new(Some(actor)), fut).await
    }

    /// Run the closure synchronously with `actor` bound, for blocking work.
    pub fn sync_scope<F, R>(actor: Option<ActorId>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CURRENT_ACTOR.sync_scope(Cell::new(actor), f)
    }

    /// Bind `actor` to the current scope, replacing any earlier value.
    ///
    /// # Errors
    /// Returns [`ActorContextError::OutOfScope`] when no scope is active.
    pub fn set_current(actor: ActorId) -> Result<(), ActorContextError> {
        CURRENT_ACTOR
            .try_with(|slot| slot.set(Some(actor)))
            .map_err(|_| ActorContextError::out_of_scope())
    }

    /// The actor bound to the current scope, if any.
    #[must_use]
    pub fn current() -> Option<ActorId> {
        CURRENT_ACTOR.try_with(Cell::get).ok().flatten()
    }
}

/// Explicit snapshot of the request's actor.
///
/// Carries the same information as the task-local slot as a plain value,
/// for call chains that prefer passing context by reference or that hop
/// across spawned tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    actor: Option<ActorId>,
}

impl RequestContext {
    /// Context for a request performed by `actor`.
    #[must_use]
    pub const fn for_actor(actor: ActorId) -> Self {
        Self { actor: Some(actor) }
    }

    /// Context for a request with no authenticated actor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { actor: None }
    }

    /// Snapshot the task-local actor.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            actor: ActorContext::current(),
        }
    }

    /// The request's actor, if any.
    #[must_use]
    pub const fn actor(&self) -> Option<ActorId> {
        self.actor
    }

    /// Run `fut` with this context installed as the task-local actor.
    pub async fn enter<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT_ACTOR.scope(Cell::new(self.actor), fut).await
    }
}
