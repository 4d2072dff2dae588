//! Error type shared by dataset loading, fitting, and inference.

use std::path::PathBuf;

use thiserror::Error;

use crate::columns::ColumnKind;

/// Failures raised while loading data, fitting, persisting, or predicting.
///
/// Schema variants (`ColumnCount`, `ColumnMismatch`, `KindMismatch`,
/// `UnknownCategory`) mean the supplied row does not match what the model was
/// trained on; callers render them in place of a prediction.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A file could not be opened, read, or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The dataset CSV is malformed.
    #[error("invalid dataset row in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The model could not be serialised to MessagePack.
    #[error("failed to encode model: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    /// The artifact is not a valid MessagePack model.
    #[error("failed to decode model: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    /// The row has a different number of columns than the schema.
    #[error("expected {expected} feature columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    /// A column name differs from the trained schema at this position.
    #[error("column {position} should be `{expected}`, found `{found}`")]
    ColumnMismatch {
        position: usize,
        expected: String,
        found: String,
    },
    /// A value has the wrong kind for its column.
    #[error("column `{column}` expects a {expected} value")]
    KindMismatch { column: String, expected: ColumnKind },
    /// A categorical value was never seen during fitting.
    #[error("found unknown category `{value}` in column `{column}`")]
    UnknownCategory { column: String, value: String },
    /// A live row carried NaN or an infinity in a numeric column.
    #[error("column `{column}` must be a finite number")]
    NonFinite { column: String },
    /// Fitting or evaluation was attempted on no rows.
    #[error("dataset is empty")]
    EmptyDataset,
    /// The solver rejected the training data.
    #[error("training failed: {0}")]
    Training(String),
}

impl ModelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error describes a row that does not fit the trained schema.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(
            self,
            Self::ColumnCount { .. }
                | Self::ColumnMismatch { .. }
                | Self::KindMismatch { .. }
                | Self::UnknownCategory { .. }
        )
    }
}
