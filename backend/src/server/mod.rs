//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use strokecare::Trace;
use strokecare::domain::ModelVersion;
use strokecare::domain::ports::StrokePredictor as _;
use strokecare::inbound::http::configure;
use strokecare::inbound::http::health::HealthState;
use tracing::info;

use state_builders::build_http_state;

/// Bind the listener and return the running server.
///
/// `health_state` is marked ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let model_version = config.model_store.model_version();
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .bind(bind_addr)?
    .run();

    info!(
        %bind_addr,
        model_version = model_version.as_ref().map(ModelVersion::as_str),
        "listening"
    );
    health_state.mark_ready();
    Ok(server)
}
