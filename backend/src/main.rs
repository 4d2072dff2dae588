//! StrokeCare server entry point.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use strokecare::inbound::http::health::HealthState;
use strokecare::outbound::model_store::FileModelStore;
use strokecare::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use strokecare::settings::AppSettings;

fn startup_error(stage: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{stage}: {err}"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| startup_error("configuration", err))?;

    run_migrations(settings.database_url())
        .await
        .map_err(|err| startup_error("database migrations", err))?;
    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()).with_max_size(settings.pool_size()),
    )
    .await
    .map_err(|err| startup_error("database pool", err))?;
    let model_store = FileModelStore::open(settings.model_path(), settings.model_hot_reload())
        .map_err(|err| startup_error("model", err))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr(), pool, Arc::new(model_store));
    create_server(health_state, config)?.await
}
