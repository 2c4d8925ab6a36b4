//! Backend entry-point: loads audit settings and serves the category API.

mod server;

use std::ffi::OsString;
use std::io;

use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::AuditSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let audit = AuditSettings::load_from_iter([OsString::from("backend")])
        .map_err(|e| io::Error::other(format!("failed to load audit settings: {e}")))?;
    let bind_addr = ServerConfig::bind_addr_from_env()?;

    create_server(ServerConfig::new(bind_addr, audit))?.await
}
