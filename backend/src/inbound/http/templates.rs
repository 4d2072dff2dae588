//! Server-rendered pages (askama templates under `backend/templates/`).

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use askama::Template;

use crate::domain::{Error, RiskAssessment};

use super::prediction::PatientForm;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage;

#[derive(Template)]
#[template(path = "info.html")]
pub struct InfoPage;

#[derive(Template)]
#[template(path = "input.html")]
pub struct InputPage;

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage;

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactPage;

/// Login form, optionally with a flash message above it.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage<'a> {
    pub flash: Option<&'a str>,
}

/// Display values for a successful assessment.
pub struct AssessmentView {
    pub percentage: String,
    pub label: String,
    pub model_version: String,
}

impl From<&RiskAssessment> for AssessmentView {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            percentage: format!("{:.2}", assessment.percentage()),
            label: assessment.label().to_string(),
            model_version: assessment.model_version().to_string(),
        }
    }
}

/// Result page: echoes the submitted form and shows either the assessment
/// or the inference error.
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage<'a> {
    pub form: &'a PatientForm,
    pub assessment: Option<AssessmentView>,
    pub error: Option<String>,
}

/// Render `page` as an HTML response with `status`.
pub fn render<T: Template>(status: StatusCode, page: &T) -> Result<HttpResponse, Error> {
    let html = page
        .render()
        .map_err(|err| Error::internal(format!("template rendering failed: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html))
}
