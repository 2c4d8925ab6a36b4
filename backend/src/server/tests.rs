//! Tests for server bootstrap wiring.

use std::net::SocketAddr;

use backend::config::AuditSettings;
use rstest::{fixture, rstest};

use super::{ServerConfig, create_server};

#[fixture]
fn bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

fn settings(actor_header: Option<&str>) -> AuditSettings {
    AuditSettings {
        reject_missing_actor: true,
        actor_header: actor_header.map(str::to_owned),
    }
}

#[rstest]
#[actix_rt::test]
async fn create_server_binds_with_default_settings(bind_address: SocketAddr) {
    let _server = create_server(ServerConfig::new(bind_address, settings(None)))
        .expect("server should build");
}

#[rstest]
#[actix_rt::test]
async fn create_server_rejects_invalid_actor_header(bind_address: SocketAddr) {
    let err = create_server(ServerConfig::new(bind_address, settings(Some("bad header"))))
        .err()
        .expect("invalid header name");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}
