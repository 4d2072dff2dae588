//! Contact form handler.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::info;

use super::state::HttpState;
use crate::domain::{ApiResult, ContactMessage, Error};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Store the message; responds with plain text.
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let message = ContactMessage::try_from_parts(&form.name, &form.email, &form.message)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let submission = state.contact.submit(&message).await?;
    info!(%submission, "contact message stored");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("add successful!"))
}
