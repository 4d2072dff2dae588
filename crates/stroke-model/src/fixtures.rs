//! Deterministic synthetic patients for tests.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::columns;
use crate::error::ModelError;
use crate::record::PatientRecord;

pub const SMOKING_STATUSES: [&str; 4] = ["never smoked", "formerly smoked", "smokes", "Unknown"];
pub const MARITAL_STATUSES: [&str; 2] = ["Yes", "No"];
pub const WORK_TYPES: [&str; 5] = ["Private", "Self-employed", "Govt_job", "children", "Never_worked"];

/// Generate `count` labelled rows. Risk rises with age, glucose,
/// hypertension, and heart disease; every seventh row has no BMI.
pub fn synthetic_records(count: usize, seed: u64) -> Vec<PatientRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let age: f64 = rng.gen_range(20.0..90.0);
            let avg_glucose_level: f64 = rng.gen_range(60.0..260.0);
            let hypertension = u8::from(rng.gen_bool(0.2));
            let heart_disease = u8::from(rng.gen_bool(0.1));
            let bmi = (i % 7 != 0).then(|| rng.gen_range(18.0..40.0));
            let score = 0.08 * (age - 60.0)
                + 0.03 * (avg_glucose_level - 150.0)
                + 1.5 * f64::from(hypertension)
                + 1.5 * f64::from(heart_disease);
            PatientRecord {
                age,
                hypertension,
                heart_disease,
                avg_glucose_level,
                bmi,
                smoking_status: SMOKING_STATUSES[i % SMOKING_STATUSES.len()].to_owned(),
                marital_status: MARITAL_STATUSES[i % MARITAL_STATUSES.len()].to_owned(),
                work_type: WORK_TYPES[i % WORK_TYPES.len()].to_owned(),
                stroke: u8::from(score > 0.0),
            }
        })
        .collect()
}

/// Write `records` as a headed CSV, with `N/A` for missing BMI.
///
/// # Errors
/// [`ModelError::Csv`] when the file cannot be created or written.
pub fn write_dataset_csv(path: &Path, records: &[PatientRecord]) -> Result<(), ModelError> {
    let csv_err = |source| ModelError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer
        .write_record([
            columns::AGE,
            columns::HYPERTENSION,
            columns::HEART_DISEASE,
            columns::AVG_GLUCOSE_LEVEL,
            columns::BMI,
            columns::SMOKING_STATUS,
            columns::MARITAL_STATUS,
            columns::WORK_TYPE,
            columns::STROKE,
        ])
        .map_err(csv_err)?;
    for r in records {
        let bmi = r.bmi.map_or_else(|| "N/A".to_owned(), |v| v.to_string());
        writer
            .write_record([
                r.age.to_string(),
                r.hypertension.to_string(),
                r.heart_disease.to_string(),
                r.avg_glucose_level.to_string(),
                bmi,
                r.smoking_status.clone(),
                r.marital_status.clone(),
                r.work_type.clone(),
                r.stroke.to_string(),
            ])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ModelError::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::load_dataset;
    use rstest::rstest;

    #[rstest]
    fn written_dataset_loads_back_with_quoted_categories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.csv");
        let mut records = synthetic_records(8, 5);
        records[1].work_type = "Self-employed, part \"time\"".to_owned();

        write_dataset_csv(&path, &records).expect("written");
        let loaded = load_dataset(&path).expect("loads");

        assert_eq!(loaded.len(), records.len());
        assert_eq!(loaded[1].work_type, records[1].work_type);
        assert_eq!(loaded[0].bmi, None);
        assert_eq!(loaded[3].stroke, records[3].stroke);
    }
}
