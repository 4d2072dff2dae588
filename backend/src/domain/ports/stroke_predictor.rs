//! Driving port for stroke risk inference.

use async_trait::async_trait;

use crate::domain::{ModelVersion, PatientFeatures, RiskAssessment};

use super::define_port_error;

define_port_error! {
    /// Errors raised while scoring a patient.
    pub enum PredictionError {
        /// No model is loaded.
        Unavailable { message: String } => "model unavailable: {message}",
        /// The model rejected the feature table.
        Inference { message: String } => "{message}",
    }
}

/// Scores patient features with the currently loaded model.
#[async_trait]
pub trait StrokePredictor: Send + Sync {
    /// Probability and label for `features`, tagged with the model version.
    async fn assess(&self, features: &PatientFeatures) -> Result<RiskAssessment, PredictionError>;

    /// Version of the model that would serve the next request.
    fn model_version(&self) -> Option<ModelVersion>;
}

/// Predictor returning a fixed probability, or an inference error for
/// smoking status `unseen`.
#[derive(Debug, Clone, Copy)]
pub struct FixtureStrokePredictor {
    probability: f64,
}

impl FixtureStrokePredictor {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl Default for FixtureStrokePredictor {
    fn default() -> Self {
        Self::new(0.25)
    }
}

#[async_trait]
impl StrokePredictor for FixtureStrokePredictor {
    async fn assess(&self, features: &PatientFeatures) -> Result<RiskAssessment, PredictionError> {
        if features.smoking_status == "unseen" {
            return Err(PredictionError::inference(
                "unknown category `unseen` in column SMOKING_STATUS",
            ));
        }
        Ok(RiskAssessment::new(self.probability, ModelVersion::new("fixture")))
    }

    fn model_version(&self) -> Option<ModelVersion> {
        Some(ModelVersion::new("fixture"))
    }
}
