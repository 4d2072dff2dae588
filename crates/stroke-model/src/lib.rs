//! Stroke risk classifier: feature schema, encoding, fitting and evaluation.
//!
//! The classifier is a pipeline of per-column preprocessing (standard scaling
//! for numeric columns, one-hot encoding for categorical columns) followed by
//! a [`linfa-logistic`](https://crates.io/crates/linfa-logistic) binary
//! logistic regression. The fitted pipeline persists as one MessagePack
//! artifact via `rmp-serde`.
//!
//! Inference consumes a [`FeatureTable`]: a single row whose column names,
//! order, and value kinds must match the [`FeatureSchema`] the model was
//! trained on. Any mismatch is reported as a [`ModelError`] instead of a
//! prediction.
//!
//! ## Example
//! ```no_run
//! use std::path::Path;
//! use stroke_model::{FeatureTable, StrokeModel, columns};
//!
//! let model = StrokeModel::load_from_file(Path::new("stroke_model.msgpack"))?;
//! let row = FeatureTable::new()
//!     .with_numeric(columns::AGE, 67.0)
//!     .with_numeric(columns::HYPERTENSION, 0.0)
//!     .with_numeric(columns::HEART_DISEASE, 1.0)
//!     .with_numeric(columns::AVG_GLUCOSE_LEVEL, 228.7)
//!     .with_numeric(columns::BMI, 36.6)
//!     .with_categorical(columns::SMOKING_STATUS, "formerly smoked")
//!     .with_categorical(columns::MARITAL_STATUS, "Yes")
//!     .with_categorical(columns::WORK_TYPE, "Private");
//! let probability = model.predict_proba(&row)?;
//! println!("P(stroke) = {probability:.2}");
//! # Ok::<(), stroke_model::ModelError>(())
//! ```

pub mod columns;
mod encoder;
mod error;
pub mod evaluation;
#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;
mod metrics;
mod model;
mod record;
mod split;
mod table;

pub use columns::{ColumnKind, FeatureColumn, FeatureSchema};
pub use encoder::FeatureEncoder;
pub use error::ModelError;
pub use metrics::{ClassMetrics, ClassificationReport, accuracy_score};
pub use model::{DECISION_THRESHOLD, NEGATIVE_CLASS, POSITIVE_CLASS, StrokeModel};
pub use record::{PatientRecord, load_dataset};
pub use split::{DEFAULT_SEED, DEFAULT_TEST_RATIO, DatasetSplit, train_test_split};
pub use table::{FeatureTable, FeatureValue};
