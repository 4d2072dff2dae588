//! Dataset rows and CSV loading.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::ModelError;
use crate::table::FeatureTable;

/// One labelled row of the stroke dataset.
///
/// Columns beyond the ones named here are ignored when reading. `BMI` may be
/// blank or `N/A`; missing values are imputed with the training mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "AGE")]
    pub age: f64,
    #[serde(rename = "HYPERTENSION")]
    pub hypertension: u8,
    #[serde(rename = "HEART_DISEASE")]
    pub heart_disease: u8,
    #[serde(rename = "AVG_GLUECOSE_LEVEL")]
    pub avg_glucose_level: f64,
    #[serde(rename = "BMI", deserialize_with = "csv::invalid_option")]
    pub bmi: Option<f64>,
    #[serde(rename = "SMOKING_STATUS")]
    pub smoking_status: String,
    #[serde(rename = "MARITAL_STATUS")]
    pub marital_status: String,
    #[serde(rename = "WORK_TYPE")]
    pub work_type: String,
    #[serde(rename = "STROKE")]
    pub stroke: u8,
}

impl PatientRecord {
    /// Feature row in training column order.
    pub fn feature_table(&self) -> FeatureTable {
        FeatureTable::new()
            .with_numeric(columns::AGE, self.age)
            .with_numeric(columns::HYPERTENSION, f64::from(self.hypertension))
            .with_numeric(columns::HEART_DISEASE, f64::from(self.heart_disease))
            .with_numeric(columns::AVG_GLUCOSE_LEVEL, self.avg_glucose_level)
            .with_numeric(columns::BMI, self.bmi.unwrap_or(f64::NAN))
            .with_categorical(columns::SMOKING_STATUS, self.smoking_status.as_str())
            .with_categorical(columns::MARITAL_STATUS, self.marital_status.as_str())
            .with_categorical(columns::WORK_TYPE, self.work_type.as_str())
    }

    /// Class label: `1` for stroke, `0` otherwise.
    pub fn label(&self) -> usize {
        usize::from(self.stroke != 0)
    }
}

/// Read every row of a headed CSV file.
///
/// # Errors
/// Returns [`ModelError::Io`] when the file cannot be opened and
/// [`ModelError::Csv`] on the first malformed row.
pub fn load_dataset(path: &Path) -> Result<Vec<PatientRecord>, ModelError> {
    let file = File::open(path).map_err(|source| ModelError::io(path, source))?;
    let mut reader = csv::Reader::from_reader(file);
    reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| ModelError::Csv {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[rstest]
    fn loads_rows_and_ignores_extra_columns() {
        let file = write_csv(
            "ID,GENDER,AGE,HYPERTENSION,HEART_DISEASE,MARITAL_STATUS,WORK_TYPE,AVG_GLUECOSE_LEVEL,BMI,SMOKING_STATUS,STROKE\n\
             1,Male,67,0,1,Yes,Private,228.69,36.6,formerly smoked,1\n\
             2,Female,61,0,0,Yes,Self-employed,202.21,N/A,never smoked,0\n",
        );

        let rows = load_dataset(file.path()).expect("dataset loads");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].age, 67.0);
        assert_eq!(rows[0].bmi, Some(36.6));
        assert_eq!(rows[0].label(), 1);
        assert_eq!(rows[1].bmi, None);
        assert_eq!(rows[1].work_type, "Self-employed");
    }

    #[rstest]
    fn malformed_numeric_field_fails() {
        let file = write_csv(
            "AGE,HYPERTENSION,HEART_DISEASE,AVG_GLUECOSE_LEVEL,BMI,SMOKING_STATUS,MARITAL_STATUS,WORK_TYPE,STROKE\n\
             old,0,0,80.0,22.0,smokes,No,Private,0\n",
        );

        let err = load_dataset(file.path()).expect_err("age is not numeric");
        assert!(matches!(err, ModelError::Csv { .. }));
    }

    #[rstest]
    fn missing_file_fails() {
        let err = load_dataset(Path::new("/definitely/not/here.csv")).expect_err("missing file");
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[rstest]
    fn missing_bmi_becomes_nan_feature() {
        let record = PatientRecord {
            age: 40.0,
            hypertension: 1,
            heart_disease: 0,
            avg_glucose_level: 90.0,
            bmi: None,
            smoking_status: "smokes".into(),
            marital_status: "No".into(),
            work_type: "Private".into(),
            stroke: 0,
        };

        let row = record.feature_table();
        match row.get(columns::BMI) {
            Some(crate::FeatureValue::Numeric(value)) => assert!(value.is_nan()),
            other => panic!("unexpected BMI cell: {other:?}"),
        }
        assert_eq!(row.len(), 8);
    }
}
