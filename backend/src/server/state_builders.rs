//! Builders for the audit stamping pipeline and HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use backend::config::AuditSettings;
use backend::domain::stamping::{AuditStamper, IntentRegistry, StampingInterceptor};
use backend::domain::{CategoryService, declare_category_operations};
use backend::inbound::http::state::HttpState;
use backend::middleware::{ActorScope, HeaderActorResolver};
use backend::outbound::persistence::FixtureCategoryRepository;

/// Build the interceptor from the declared category operations.
///
/// # Errors
/// Returns an [`io::Error`] when the same operation is declared twice.
pub fn build_interceptor(audit: &AuditSettings) -> io::Result<StampingInterceptor> {
    let registry = declare_category_operations(IntentRegistry::builder())
        .build()
        .map_err(io::Error::other)?;
    let stamper = AuditStamper::new(Arc::new(DefaultClock), audit.missing_actor_policy());
    Ok(StampingInterceptor::new(Arc::new(registry), stamper))
}

/// Build handler state backed by the in-memory category store.
pub fn build_http_state(interceptor: StampingInterceptor) -> web::Data<HttpState> {
    let repository = Arc::new(FixtureCategoryRepository::new());
    let service = CategoryService::new(repository, interceptor);
    web::Data::new(HttpState::new(Arc::new(service)))
}

/// Build the actor middleware reading the configured header.
///
/// # Errors
/// Returns [`io::ErrorKind::InvalidInput`] when the header name is invalid.
pub fn build_actor_scope(audit: &AuditSettings) -> io::Result<ActorScope> {
    let header = audit.actor_header();
    let resolver = HeaderActorResolver::new(header).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid actor header {header:?}: {error}"),
        )
    })?;
    Ok(ActorScope::new(resolver))
}
