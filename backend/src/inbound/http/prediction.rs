//! `POST /input`: parse the patient form, score it, render the result.
//!
//! Unparsable numeric fields are rejected with `400`. Inference failures
//! (the model rejects the feature table) are not HTTP errors: the result
//! page shows `Error in prediction: <reason>` instead of a probability.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::state::HttpState;
use super::templates::{AssessmentView, ResultPage, render};
use crate::domain::{ApiResult, Error, PatientAttributes, PatientValidationError, RawPatient};

/// Input form fields as submitted. Absent fields deserialise as empty.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub hypertension: String,
    pub heart_disease: String,
    pub avg_glucose: String,
    pub bmi: String,
    pub marital_status: String,
    pub residence_type: String,
    pub smoking_status: String,
    pub work_type: String,
}

impl PatientForm {
    fn as_raw(&self) -> RawPatient<'_> {
        RawPatient {
            name: &self.name,
            age: &self.age,
            gender: &self.gender,
            hypertension: &self.hypertension,
            heart_disease: &self.heart_disease,
            avg_glucose: &self.avg_glucose,
            bmi: &self.bmi,
            marital_status: &self.marital_status,
            residence_type: &self.residence_type,
            smoking_status: &self.smoking_status,
            work_type: &self.work_type,
        }
    }
}

fn map_validation_error(err: &PatientValidationError) -> Error {
    debug!(field = err.field(), "rejected patient form");
    Error::invalid_request(err.to_string())
}

#[post("/input")]
pub async fn submit_input(
    state: web::Data<HttpState>,
    form: web::Form<PatientForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let attributes =
        PatientAttributes::try_from_raw(form.as_raw()).map_err(|err| map_validation_error(&err))?;

    let (assessment, error) = match state.predictor.assess(&attributes.features).await {
        Ok(assessment) => {
            info!(
                probability = assessment.probability(),
                label = %assessment.label(),
                model_version = %assessment.model_version(),
                "stroke risk assessed"
            );
            (Some(AssessmentView::from(&assessment)), None)
        }
        Err(err) => {
            warn!(error = %err, "stroke risk prediction failed");
            (None, Some(format!("Error in prediction: {err}")))
        }
    };

    render(
        StatusCode::OK,
        &ResultPage {
            form: &form,
            assessment,
            error,
        },
    )
}
