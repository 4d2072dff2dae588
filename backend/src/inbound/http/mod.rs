//! HTTP inbound adapter: form handlers and server-rendered pages.

pub mod accounts;
pub mod contact;
pub mod error;
pub mod health;
pub mod pages;
pub mod prediction;
pub mod state;
pub mod templates;

use actix_web::web;

use crate::domain::Error;

/// Register every page and form handler plus the form error mapping.
///
/// Malformed form bodies surface as `400 Error: <reason>` like any other
/// validation failure. The caller supplies [`state::HttpState`] and
/// [`health::HealthState`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| Error::invalid_request(err.to_string()).into()),
    )
    .service(pages::index)
    .service(pages::about)
    .service(pages::info)
    .service(pages::input_form)
    .service(prediction::submit_input)
    .service(pages::login_form)
    .service(accounts::login)
    .service(pages::signup_form)
    .service(accounts::signup)
    .service(pages::contact_form)
    .service(contact::submit_contact)
    .service(health::ready)
    .service(health::live);
}
