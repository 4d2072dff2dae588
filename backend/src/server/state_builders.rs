//! Wire domain services to their SQLite and model-store adapters.

use std::sync::Arc;

use actix_web::web;

use strokecare::domain::{AccountService, ContactService};
use strokecare::inbound::http::state::HttpState;
use strokecare::outbound::persistence::{DieselContactRepository, DieselUserRepository};

use super::ServerConfig;

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let accounts = Arc::new(AccountService::new(Arc::new(DieselUserRepository::new(
        config.db_pool.clone(),
    ))));
    let contact = Arc::new(ContactService::new(Arc::new(DieselContactRepository::new(
        config.db_pool.clone(),
    ))));

    web::Data::new(HttpState::new(
        accounts.clone(),
        accounts,
        contact,
        config.model_store.clone(),
    ))
}
