//! HTTP inbound adapter exposing REST endpoints.

pub mod categories;
pub mod error;
pub mod state;

pub use error::ApiResult;
