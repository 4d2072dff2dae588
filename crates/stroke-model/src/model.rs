//! Fitted pipeline: encoder plus logistic regression.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use linfa::Dataset;
use linfa::traits::Fit;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::columns::FeatureSchema;
use crate::encoder::FeatureEncoder;
use crate::error::ModelError;
use crate::record::PatientRecord;
use crate::table::{FeatureTable, FeatureValue};

/// Label for patients who had a stroke.
pub const POSITIVE_CLASS: usize = 1;
/// Label for patients who did not.
pub const NEGATIVE_CLASS: usize = 0;
/// Probability at or above which a row is classified as positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

const MAX_ITERATIONS: u64 = 200;

/// Stroke risk classifier persisted as a single artifact.
#[derive(Debug, Serialize, Deserialize)]
pub struct StrokeModel {
    encoder: FeatureEncoder,
    classifier: FittedLogisticRegression<f64, usize>,
}

impl StrokeModel {
    /// Fit the preprocessing and classifier on labelled records.
    ///
    /// # Errors
    /// [`ModelError::EmptyDataset`] for no rows, [`ModelError::Training`] when
    /// the solver rejects the data (for example a single class).
    pub fn fit(records: &[PatientRecord]) -> Result<Self, ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        let rows: Vec<FeatureTable> = records.iter().map(PatientRecord::feature_table).collect();
        let encoder = FeatureEncoder::fit(&FeatureSchema::stroke(), &rows)?;
        let features = encoder.transform(&rows)?;
        let targets: Array1<usize> = records.iter().map(PatientRecord::label).collect();

        let classifier = LogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(&Dataset::new(features, targets))
            .map_err(|err| ModelError::Training(err.to_string()))?;

        Ok(Self {
            encoder,
            classifier,
        })
    }

    /// Schema a [`FeatureTable`] must match to be scored.
    pub fn schema(&self) -> &FeatureSchema {
        self.encoder.schema()
    }

    /// Probability of [`POSITIVE_CLASS`] for each row.
    ///
    /// Non-finite numeric cells are treated as missing and imputed with the
    /// training mean, matching `N/A` entries in a dataset.
    ///
    /// # Errors
    /// A schema error for the first row that does not match [`Self::schema`].
    pub fn predict_proba_batch(&self, rows: &[FeatureTable]) -> Result<Vec<f64>, ModelError> {
        let features = self.encoder.transform(rows)?;
        let probabilities = self.classifier.predict_probabilities(&features);
        let positive_is_reference = self.classifier.labels().pos.class == POSITIVE_CLASS;
        Ok(probabilities
            .iter()
            .map(|&p| if positive_is_reference { p } else { 1.0 - p })
            .collect())
    }

    /// Probability of stroke for one row, in `[0, 1]`.
    ///
    /// Unlike the batch path, nothing is imputed: every numeric cell must be
    /// finite.
    ///
    /// # Errors
    /// A schema error when `row` does not match [`Self::schema`], or
    /// [`ModelError::NonFinite`] for a NaN or infinite cell.
    pub fn predict_proba(&self, row: &FeatureTable) -> Result<f64, ModelError> {
        if let Some((column, _)) = row
            .cells()
            .iter()
            .find(|(_, value)| matches!(value, FeatureValue::Numeric(v) if !v.is_finite()))
        {
            return Err(ModelError::NonFinite {
                column: column.clone(),
            });
        }
        let probabilities = self.predict_proba_batch(std::slice::from_ref(row))?;
        probabilities
            .first()
            .copied()
            .ok_or(ModelError::EmptyDataset)
    }

    /// Hard labels using [`DECISION_THRESHOLD`].
    ///
    /// # Errors
    /// See [`Self::predict_proba_batch`].
    pub fn predict_batch(&self, rows: &[FeatureTable]) -> Result<Vec<usize>, ModelError> {
        Ok(self
            .predict_proba_batch(rows)?
            .into_iter()
            .map(classify)
            .collect())
    }

    /// Hard label for one row.
    ///
    /// # Errors
    /// See [`Self::predict_proba`].
    pub fn predict(&self, row: &FeatureTable) -> Result<usize, ModelError> {
        self.predict_proba(row).map(classify)
    }

    pub fn to_msgpack_vec(&self) -> Result<Vec<u8>, ModelError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_msgpack_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    /// Write the model as named MessagePack to `path`.
    ///
    /// # Errors
    /// [`ModelError::Io`] or [`ModelError::Encode`].
    pub fn save_to_file(&self, path: &Path) -> Result<(), ModelError> {
        let file = File::create(path).map_err(|source| ModelError::io(path, source))?;
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write_named(&mut writer, self)?;
        writer
            .flush()
            .map_err(|source| ModelError::io(path, source))
    }

    /// Read a model previously written by [`Self::save_to_file`].
    ///
    /// # Errors
    /// [`ModelError::Io`] or [`ModelError::Decode`].
    pub fn load_from_file(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|source| ModelError::io(path, source))?;
        Ok(rmp_serde::from_read(BufReader::new(file))?)
    }
}

fn classify(probability: f64) -> usize {
    if probability >= DECISION_THRESHOLD {
        POSITIVE_CLASS
    } else {
        NEGATIVE_CLASS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns;
    use crate::fixtures::synthetic_records;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn model() -> StrokeModel {
        StrokeModel::fit(&synthetic_records(400, 3)).expect("synthetic data fits")
    }

    fn patient(age: f64, glucose: f64, hypertension: f64, heart: f64) -> FeatureTable {
        FeatureTable::new()
            .with_numeric(columns::AGE, age)
            .with_numeric(columns::HYPERTENSION, hypertension)
            .with_numeric(columns::HEART_DISEASE, heart)
            .with_numeric(columns::AVG_GLUCOSE_LEVEL, glucose)
            .with_numeric(columns::BMI, 27.0)
            .with_categorical(columns::SMOKING_STATUS, "never smoked")
            .with_categorical(columns::MARITAL_STATUS, "Yes")
            .with_categorical(columns::WORK_TYPE, "Private")
    }

    #[rstest]
    fn probabilities_are_bounded_and_ordered(model: StrokeModel) {
        let low = model
            .predict_proba(&patient(25.0, 80.0, 0.0, 0.0))
            .expect("low-risk row scores");
        let high = model
            .predict_proba(&patient(85.0, 240.0, 1.0, 1.0))
            .expect("high-risk row scores");

        assert!((0.0..=1.0).contains(&low));
        assert!((0.0..=1.0).contains(&high));
        assert!(high > low, "expected {high} > {low}");
        assert_eq!(model.predict(&patient(85.0, 240.0, 1.0, 1.0)).expect("label"), POSITIVE_CLASS);
        assert_eq!(model.predict(&patient(25.0, 80.0, 0.0, 0.0)).expect("label"), NEGATIVE_CLASS);
    }

    fn with_bmi(bmi: f64) -> FeatureTable {
        FeatureTable::new()
            .with_numeric(columns::AGE, 50.0)
            .with_numeric(columns::HYPERTENSION, 0.0)
            .with_numeric(columns::HEART_DISEASE, 0.0)
            .with_numeric(columns::AVG_GLUCOSE_LEVEL, 100.0)
            .with_numeric(columns::BMI, bmi)
            .with_categorical(columns::SMOKING_STATUS, "smokes")
            .with_categorical(columns::MARITAL_STATUS, "No")
            .with_categorical(columns::WORK_TYPE, "Govt_job")
    }

    #[rstest]
    fn missing_bmi_is_imputed_in_batches(model: StrokeModel) {
        let p = model
            .predict_proba_batch(&[with_bmi(f64::NAN)])
            .expect("NaN BMI is imputed");
        assert!(p[0].is_finite());
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn single_rows_reject_non_finite_values(model: StrokeModel, #[case] bmi: f64) {
        let err = model.predict_proba(&with_bmi(bmi)).expect_err("not imputed");
        assert!(
            matches!(&err, ModelError::NonFinite { column } if column == columns::BMI),
            "{err}"
        );
    }

    #[rstest]
    fn schema_mismatch_is_reported_not_predicted(model: StrokeModel) {
        let row = FeatureTable::new().with_numeric("age", 50.0);
        let err = model.predict_proba(&row).expect_err("bad row");
        assert!(err.is_schema_mismatch());
    }

    #[rstest]
    fn single_class_training_fails() {
        let records: Vec<_> = synthetic_records(200, 1)
            .into_iter()
            .filter(|r| r.stroke == 0)
            .collect();
        let err = StrokeModel::fit(&records).expect_err("one class only");
        assert!(matches!(err, ModelError::Training(_)));
    }

    #[rstest]
    fn file_round_trip_preserves_predictions(model: StrokeModel) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("model.msgpack");
        model.save_to_file(&path).expect("model saves");

        let loaded = StrokeModel::load_from_file(&path).expect("model loads");
        let row = patient(60.0, 150.0, 1.0, 0.0);
        assert_eq!(
            model.predict_proba(&row).expect("original"),
            loaded.predict_proba(&row).expect("loaded"),
        );
    }

    #[rstest]
    fn garbage_artifact_fails_to_decode() {
        let err = StrokeModel::from_msgpack_slice(b"not a model").expect_err("garbage");
        assert!(matches!(err, ModelError::Decode(_)));
    }
}
