//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators that store what the domain hands them.
//! They contain no business logic and never compute audit metadata.

pub mod persistence;
