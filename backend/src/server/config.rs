//! HTTP server configuration object and helpers.

use std::env;
use std::io;
use std::net::SocketAddr;

use backend::config::AuditSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) audit: AuditSettings,
}

impl ServerConfig {
    /// Construct a server configuration from loaded settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, audit: AuditSettings) -> Self {
        Self { bind_addr, audit }
    }

    /// Read the bind address from `BIND_ADDR`, falling back to the default.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the value does not parse
    /// as a socket address.
    pub fn bind_addr_from_env() -> io::Result<SocketAddr> {
        let raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        raw.parse().map_err(|error| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid BIND_ADDR {raw:?}: {error}"),
            )
        })
    }
}
