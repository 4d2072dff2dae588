//! Offline evaluation and training against the dataset CSV.

use std::path::Path;

use tracing::info;

use crate::error::ModelError;
use crate::metrics::{ClassificationReport, accuracy_score};
use crate::model::StrokeModel;
use crate::record::{PatientRecord, load_dataset};
use crate::split::{DEFAULT_SEED, DEFAULT_TEST_RATIO, train_test_split};
use crate::table::FeatureTable;

/// Held-out scores for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub accuracy: f64,
    pub report: ClassificationReport,
    pub test_rows: usize,
}

/// Score `model` on the held-out partition of `records`.
///
/// # Errors
/// [`ModelError::EmptyDataset`] when the held-out partition is empty, or a
/// schema error when a row cannot be encoded.
pub fn evaluate_records(
    records: &[PatientRecord],
    model: &StrokeModel,
) -> Result<Evaluation, ModelError> {
    let split = train_test_split(records, DEFAULT_TEST_RATIO, DEFAULT_SEED);
    if split.test.is_empty() {
        return Err(ModelError::EmptyDataset);
    }
    let rows: Vec<FeatureTable> = split.test.iter().map(PatientRecord::feature_table).collect();
    let actual: Vec<usize> = split.test.iter().map(PatientRecord::label).collect();
    let predicted = model.predict_batch(&rows)?;

    Ok(Evaluation {
        accuracy: accuracy_score(&actual, &predicted),
        report: ClassificationReport::new(&actual, &predicted),
        test_rows: rows.len(),
    })
}

/// Load `dataset` and `model_path`, then score the model on the held-out rows.
///
/// # Errors
/// Any loading, decoding, or scoring failure.
pub fn evaluate(dataset: &Path, model_path: &Path) -> Result<Evaluation, ModelError> {
    let records = load_dataset(dataset)?;
    info!(rows = records.len(), dataset = %dataset.display(), "dataset loaded");
    let model = StrokeModel::load_from_file(model_path)?;
    let evaluation = evaluate_records(&records, &model)?;
    info!(
        accuracy = evaluation.accuracy,
        test_rows = evaluation.test_rows,
        "model evaluated"
    );
    Ok(evaluation)
}

/// Fit a model on the training partition of `records`.
///
/// # Errors
/// See [`StrokeModel::fit`].
pub fn train_records(records: &[PatientRecord]) -> Result<StrokeModel, ModelError> {
    let split = train_test_split(records, DEFAULT_TEST_RATIO, DEFAULT_SEED);
    StrokeModel::fit(&split.train)
}

/// Fit a model on the training partition of `dataset` and write it to
/// `model_out`.
///
/// # Errors
/// Any loading, fitting, or writing failure.
pub fn train(dataset: &Path, model_out: &Path) -> Result<StrokeModel, ModelError> {
    let records = load_dataset(dataset)?;
    let model = train_records(&records)?;
    model.save_to_file(model_out)?;
    info!(model = %model_out.display(), rows = records.len(), "model trained");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::synthetic_records;
    use rstest::rstest;

    #[rstest]
    fn held_out_evaluation_is_reproducible() {
        let records = synthetic_records(300, 11);
        let model = train_records(&records).expect("fits");

        let first = evaluate_records(&records, &model).expect("evaluates");
        let second = evaluate_records(&records, &model).expect("evaluates");

        assert_eq!(first, second);
        assert_eq!(first.test_rows, 60);
        assert!(first.accuracy > 0.8, "accuracy {}", first.accuracy);
    }

    #[rstest]
    fn empty_dataset_cannot_be_evaluated() {
        let records = synthetic_records(50, 2);
        let model = train_records(&records).expect("fits");
        let err = evaluate_records(&[], &model).expect_err("no rows");
        assert!(matches!(err, ModelError::EmptyDataset));
    }
}
