//! Loading, inference, and hot reload of the file-backed model store.

use std::fs::File;
use std::time::Duration;

use rstest::{fixture, rstest};
use stroke_model::fixtures::synthetic_records;
use tempfile::TempDir;

use super::*;
use crate::domain::RiskLabel;

struct Artifact {
    _dir: TempDir,
    path: PathBuf,
}

fn write_model(path: &Path, seed: u64) {
    StrokeModel::fit(&synthetic_records(300, seed))
        .expect("fit")
        .save_to_file(path)
        .expect("save");
}

fn bump_mtime(path: &Path, seconds: u64) {
    let later = SystemTime::now() + Duration::from_secs(seconds);
    File::options()
        .write(true)
        .open(path)
        .expect("open artifact")
        .set_modified(later)
        .expect("set mtime");
}

#[fixture]
fn artifact() -> Artifact {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stroke_model.msgpack");
    write_model(&path, 1);
    Artifact { _dir: dir, path }
}

fn features(smoking_status: &str) -> PatientFeatures {
    PatientFeatures {
        age: 81.0,
        hypertension: true,
        heart_disease: true,
        avg_glucose_level: 240.0,
        bmi: 31.0,
        smoking_status: smoking_status.to_owned(),
        marital_status: "Yes".to_owned(),
        work_type: "Private".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn assessment_reports_version_and_consistent_label(artifact: Artifact) {
    let store = FileModelStore::open(&artifact.path, false).expect("open");
    let assessment = store.assess(&features("smokes")).await.expect("assess");

    assert_eq!(Some(assessment.model_version().clone()), store.model_version());
    assert_eq!(assessment.model_version().as_str().len(), VERSION_HEX_CHARS);
    let expected = if assessment.probability() >= 0.5 {
        RiskLabel::Yes
    } else {
        RiskLabel::No
    };
    assert_eq!(assessment.label(), expected);
}

#[rstest]
#[tokio::test]
async fn unseen_category_is_an_inference_error(artifact: Artifact) {
    let store = FileModelStore::open(&artifact.path, false).expect("open");
    let err = store
        .assess(&features("vapes"))
        .await
        .expect_err("unknown level");
    assert!(matches!(err, PredictionError::Inference { .. }));
    assert!(err.to_string().contains("vapes"));
}

#[rstest]
fn missing_artifact_fails_to_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = FileModelStore::open(dir.path().join("absent.msgpack"), true).expect_err("missing");
    assert!(matches!(err, ModelStoreError::Read { .. }));
}

#[rstest]
#[tokio::test]
async fn newer_artifact_is_swapped_in(artifact: Artifact) {
    let store = FileModelStore::open(&artifact.path, true).expect("open");
    let before = store.model_version();
    assert_eq!(store.reload_if_stale().await, ReloadOutcome::Unchanged);

    write_model(&artifact.path, 2);
    bump_mtime(&artifact.path, 60);

    assert_eq!(store.reload_if_stale().await, ReloadOutcome::Swapped);
    assert_ne!(store.model_version(), before);
    assert_eq!(store.reload_if_stale().await, ReloadOutcome::Unchanged);
}

#[rstest]
#[tokio::test]
async fn corrupt_reload_keeps_previous_model(artifact: Artifact) {
    let store = FileModelStore::open(&artifact.path, true).expect("open");
    let before = store.model_version();

    std::fs::write(&artifact.path, b"not a model").expect("overwrite");
    bump_mtime(&artifact.path, 60);

    store.assess(&features("smokes")).await.expect("still serving");
    assert_eq!(store.model_version(), before);
}

#[rstest]
#[tokio::test]
async fn broken_artifact_is_attempted_once_per_change(artifact: Artifact) {
    let store = FileModelStore::open(&artifact.path, true).expect("open");
    let before = store.model_version();

    std::fs::write(&artifact.path, b"not a model").expect("overwrite");
    bump_mtime(&artifact.path, 60);
    assert_eq!(store.reload_if_stale().await, ReloadOutcome::Failed);
    assert_eq!(store.reload_if_stale().await, ReloadOutcome::Unchanged);

    write_model(&artifact.path, 3);
    bump_mtime(&artifact.path, 120);
    assert_eq!(store.reload_if_stale().await, ReloadOutcome::Swapped);
    assert_ne!(store.model_version(), before);
}
