//! Login and signup form handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::info;

use super::state::HttpState;
use super::templates::{LoginPage, render};
use crate::domain::{ApiResult, Credentials, Error, ErrorCode, INVALID_LOGIN_MESSAGE};

/// Username/password form body shared by login and signup.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Authenticate and redirect home, or re-render the form with a flash.
///
/// No session is created; a successful login only redirects.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = match Credentials::try_from_parts(&form.username, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            let message = err.to_string();
            return render(
                StatusCode::BAD_REQUEST,
                &LoginPage {
                    flash: Some(&message),
                },
            );
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            info!(%user_id, "login succeeded");
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .finish())
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => render(
            StatusCode::UNAUTHORIZED,
            &LoginPage {
                flash: Some(INVALID_LOGIN_MESSAGE),
            },
        ),
        Err(err) => Err(err),
    }
}

/// Create an account; responds with plain text.
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from_parts(&form.username, &form.password)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let user_id = state.signup.register(&credentials).await?;
    info!(%user_id, "user registered");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Signup successful!"))
}
