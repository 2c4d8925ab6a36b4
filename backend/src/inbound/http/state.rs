//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::CategoryCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<dyn CategoryCommand>,
}

impl HttpState {
    /// Construct state from the category use-case port.
    pub fn new(categories: Arc<dyn CategoryCommand>) -> Self {
        Self { categories }
    }
}
