//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::ActorScope;
use backend::inbound::http::categories::{create_category, list_categories, update_category};
use backend::inbound::http::state::HttpState;
use state_builders::{build_actor_scope, build_http_state, build_interceptor};

fn build_app(
    http_state: web::Data<HttpState>,
    actor_scope: ActorScope,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_categories)
        .service(create_category)
        .service(update_category);

    App::new()
        .app_data(http_state)
        .wrap(actor_scope)
        .service(api)
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the audit pipeline cannot be built or
/// when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, audit } = config;
    let interceptor = build_interceptor(&audit)?;
    let http_state = build_http_state(interceptor);
    let actor_scope = build_actor_scope(&audit)?;

    info!(
        %bind_addr,
        actor_header = audit.actor_header(),
        policy = ?audit.missing_actor_policy(),
        "starting category server"
    );

    let server = HttpServer::new(move || build_app(http_state.clone(), actor_scope.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}

#[cfg(test)]
mod tests;
