//! Static pages and the GET side of each form.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get};

use super::templates::{
    AboutPage, ContactPage, IndexPage, InfoPage, InputPage, LoginPage, SignupPage, render,
};
use crate::domain::ApiResult;

#[get("/")]
pub async fn index() -> ApiResult<HttpResponse> {
    render(StatusCode::OK, &IndexPage)
}

#[get("/about")]
pub async fn about() -> ApiResult<HttpResponse> {
    render(StatusCode::OK, &AboutPage)
}

#[get("/info")]
pub async fn info() -> ApiResult<HttpResponse> {
    render(StatusCode::OK, &InfoPage)
}

#[get("/input")]
pub async fn input_form() -> ApiResult<HttpResponse> {
    render(StatusCode::OK, &InputPage)
}

#[get("/login")]
pub async fn login_form() -> ApiResult<HttpResponse> {
    render(StatusCode::OK, &LoginPage { flash: None })
}

#[get("/signup")]
pub async fn signup_form() -> ApiResult<HttpResponse> {
    render(StatusCode::OK, &SignupPage)
}

#[get("/contact")]
pub async fn contact_form() -> ApiResult<HttpResponse> {
    render(StatusCode::OK, &ContactPage)
}
