//! Request middleware.
//!
//! Purpose: bind request lifecycle concerns, such as the acting user, to
//! the task that serves each request.

pub mod actor_scope;

pub use actor_scope::{ActorResolver, ActorScope, HeaderActorResolver};
