//! Patient attributes, risk assessments, and recorded inputs.
//!
//! Form values arrive as raw strings. [`PatientAttributes::try_from_raw`]
//! parses the numeric fields strictly (blank or non-numeric input is an
//! error, never a default) and maps the yes/no flags. The feature table built
//! from the result follows the classifier's training column order.

use std::fmt;

use chrono::{DateTime, Utc};
use stroke_model::{DECISION_THRESHOLD, FeatureTable, columns};

use super::UserId;

/// Error returned when a numeric form field cannot be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientValidationError {
    /// The field was absent or blank.
    Missing { field: &'static str },
    /// The field did not parse as a floating point number.
    NotNumeric { field: &'static str, value: String },
    /// The field parsed to NaN or an infinity (`nan`, `inf`, `1e999`).
    NotFinite { field: &'static str, value: String },
}

impl PatientValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::NotNumeric { field, .. }
            | Self::NotFinite { field, .. } => field,
        }
    }
}

impl fmt::Display for PatientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::NotNumeric { field, value } => {
                write!(f, "{field} must be a number, got `{value}`")
            }
            Self::NotFinite { field, value } => {
                write!(f, "{field} must be a finite number, got `{value}`")
            }
        }
    }
}

impl std::error::Error for PatientValidationError {}

/// Raw form values, borrowed from the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawPatient<'a> {
    pub name: &'a str,
    pub age: &'a str,
    pub gender: &'a str,
    pub hypertension: &'a str,
    pub heart_disease: &'a str,
    pub avg_glucose: &'a str,
    pub bmi: &'a str,
    pub marital_status: &'a str,
    pub residence_type: &'a str,
    pub smoking_status: &'a str,
    pub work_type: &'a str,
}

/// The eight attributes the classifier consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientFeatures {
    pub age: f64,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
    pub marital_status: String,
    pub work_type: String,
}

impl PatientFeatures {
    /// One-row table in training column order.
    pub fn feature_table(&self) -> FeatureTable {
        FeatureTable::new()
            .with_numeric(columns::AGE, self.age)
            .with_numeric(columns::HYPERTENSION, flag(self.hypertension))
            .with_numeric(columns::HEART_DISEASE, flag(self.heart_disease))
            .with_numeric(columns::AVG_GLUCOSE_LEVEL, self.avg_glucose_level)
            .with_numeric(columns::BMI, self.bmi)
            .with_categorical(columns::SMOKING_STATUS, self.smoking_status.as_str())
            .with_categorical(columns::MARITAL_STATUS, self.marital_status.as_str())
            .with_categorical(columns::WORK_TYPE, self.work_type.as_str())
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Everything submitted on the input form, parsed.
///
/// `name`, `gender`, and `residence_type` are echoed on the result page but
/// are not model inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientAttributes {
    pub name: String,
    pub gender: String,
    pub residence_type: String,
    pub features: PatientFeatures,
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, PatientValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PatientValidationError::Missing { field });
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| PatientValidationError::NotNumeric {
            field,
            value: raw.to_owned(),
        })?;
    if !value.is_finite() {
        return Err(PatientValidationError::NotFinite {
            field,
            value: raw.to_owned(),
        });
    }
    Ok(value)
}

impl PatientAttributes {
    /// Parse raw form values.
    ///
    /// `hypertension` and `heart_disease` are true only for the exact value
    /// `yes`.
    ///
    /// # Examples
    /// ```
    /// use strokecare::domain::{PatientAttributes, RawPatient};
    ///
    /// let raw = RawPatient { age: "67", avg_glucose: "228.7", bmi: "36.6",
    ///     hypertension: "yes", heart_disease: "no", ..RawPatient::default() };
    /// let parsed = PatientAttributes::try_from_raw(raw).expect("valid");
    /// assert!(parsed.features.hypertension);
    /// assert!(!parsed.features.heart_disease);
    ///
    /// let bad = RawPatient { age: "abc", ..raw };
    /// assert!(PatientAttributes::try_from_raw(bad).is_err());
    /// ```
    pub fn try_from_raw(raw: RawPatient<'_>) -> Result<Self, PatientValidationError> {
        let features = PatientFeatures {
            age: parse_number("age", raw.age)?,
            hypertension: raw.hypertension == "yes",
            heart_disease: raw.heart_disease == "yes",
            avg_glucose_level: parse_number("avg_glucose", raw.avg_glucose)?,
            bmi: parse_number("bmi", raw.bmi)?,
            smoking_status: raw.smoking_status.to_owned(),
            marital_status: raw.marital_status.to_owned(),
            work_type: raw.work_type.to_owned(),
        };
        Ok(Self {
            name: raw.name.to_owned(),
            gender: raw.gender.to_owned(),
            residence_type: raw.residence_type.to_owned(),
            features,
        })
    }
}

/// Content fingerprint of the model artifact that produced a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelVersion(String);

impl ModelVersion {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binary stroke prediction shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    Yes,
    No,
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("Yes"),
            Self::No => f.write_str("No"),
        }
    }
}

/// Outcome of scoring one patient.
///
/// ## Invariants
/// - `label` is [`RiskLabel::Yes`] iff `probability >= 0.5`.
/// - `percentage == probability * 100`.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    probability: f64,
    model_version: ModelVersion,
}

impl RiskAssessment {
    pub fn new(probability: f64, model_version: ModelVersion) -> Self {
        Self {
            probability,
            model_version,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn percentage(&self) -> f64 {
        self.probability * 100.0
    }

    pub fn label(&self) -> RiskLabel {
        if self.probability >= DECISION_THRESHOLD {
            RiskLabel::Yes
        } else {
            RiskLabel::No
        }
    }

    pub fn model_version(&self) -> &ModelVersion {
        &self.model_version
    }
}

/// Stored snapshot of submitted features tied to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeInput {
    pub id: i32,
    pub user_id: UserId,
    pub features: PatientFeatures,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use stroke_model::{FeatureSchema, FeatureValue};

    fn base_raw() -> RawPatient<'static> {
        RawPatient {
            name: "Ann",
            age: "67",
            gender: "Female",
            hypertension: "yes",
            heart_disease: "no",
            avg_glucose: "228.69",
            bmi: "36.6",
            marital_status: "Yes",
            residence_type: "Urban",
            smoking_status: "formerly smoked",
            work_type: "Private",
        }
    }

    #[fixture]
    fn raw() -> RawPatient<'static> {
        base_raw()
    }

    #[rstest]
    fn parses_all_fields(raw: RawPatient<'static>) {
        let attrs = PatientAttributes::try_from_raw(raw).expect("valid");
        assert_eq!(attrs.name, "Ann");
        assert_eq!(attrs.residence_type, "Urban");
        assert_eq!(attrs.features.age, 67.0);
        assert!(attrs.features.hypertension);
        assert!(!attrs.features.heart_disease);
        assert_eq!(attrs.features.work_type, "Private");
    }

    #[rstest]
    #[case("Yes")]
    #[case("1")]
    #[case("")]
    fn only_lowercase_yes_sets_a_flag(raw: RawPatient<'static>, #[case] value: &'static str) {
        let attrs =
            PatientAttributes::try_from_raw(RawPatient { hypertension: value, ..raw })
                .expect("valid");
        assert!(!attrs.features.hypertension);
    }

    #[rstest]
    #[case(RawPatient { age: "abc", ..base_raw() }, "age")]
    #[case(RawPatient { avg_glucose: "high", ..base_raw() }, "avg_glucose")]
    #[case(RawPatient { bmi: "", ..base_raw() }, "bmi")]
    #[case(RawPatient { age: "  ", ..base_raw() }, "age")]
    #[case(RawPatient { age: "nan", ..base_raw() }, "age")]
    #[case(RawPatient { bmi: "-inf", ..base_raw() }, "bmi")]
    fn numeric_fields_never_default(#[case] raw: RawPatient<'static>, #[case] field: &str) {
        let err = PatientAttributes::try_from_raw(raw).expect_err("must fail");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case("NaN")]
    #[case("inf")]
    #[case("infinity")]
    #[case("1e999")]
    fn non_finite_numbers_are_rejected(raw: RawPatient<'static>, #[case] value: &'static str) {
        let err = PatientAttributes::try_from_raw(RawPatient { avg_glucose: value, ..raw })
            .expect_err("non-finite");
        assert_eq!(
            err,
            PatientValidationError::NotFinite {
                field: "avg_glucose",
                value: value.to_owned(),
            }
        );
    }

    #[rstest]
    fn feature_table_matches_training_schema(raw: RawPatient<'static>) {
        let attrs = PatientAttributes::try_from_raw(raw).expect("valid");
        let table = attrs.features.feature_table();
        FeatureSchema::stroke()
            .check(&table)
            .expect("column order and kinds match");
        assert_eq!(table.get(columns::HYPERTENSION), Some(&FeatureValue::Numeric(1.0)));
    }

    #[rstest]
    #[case(0.5, RiskLabel::Yes)]
    #[case(0.499_999, RiskLabel::No)]
    #[case(0.93, RiskLabel::Yes)]
    #[case(0.0, RiskLabel::No)]
    fn label_follows_threshold(#[case] probability: f64, #[case] expected: RiskLabel) {
        let assessment = RiskAssessment::new(probability, ModelVersion::new("v"));
        assert_eq!(assessment.label(), expected);
        assert!((assessment.percentage() - probability * 100.0).abs() < f64::EPSILON);
    }
}
