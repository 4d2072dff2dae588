//! Column names and the trained feature schema.
//!
//! Column names are the dataset headers the model was fitted against,
//! including the historical `AVG_GLUECOSE_LEVEL` spelling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::table::{FeatureTable, FeatureValue};

pub const AGE: &str = "AGE";
pub const HYPERTENSION: &str = "HYPERTENSION";
pub const HEART_DISEASE: &str = "HEART_DISEASE";
pub const AVG_GLUCOSE_LEVEL: &str = "AVG_GLUECOSE_LEVEL";
pub const BMI: &str = "BMI";
pub const SMOKING_STATUS: &str = "SMOKING_STATUS";
pub const MARITAL_STATUS: &str = "MARITAL_STATUS";
pub const WORK_TYPE: &str = "WORK_TYPE";
/// Target column in the dataset CSV.
pub const STROKE: &str = "STROKE";

/// Value kind accepted by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("numeric"),
            Self::Categorical => f.write_str("categorical"),
        }
    }
}

/// One named, typed column of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureColumn {
    name: String,
    kind: ColumnKind,
}

impl FeatureColumn {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }
}

/// Ordered column list a [`FeatureTable`] must match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<FeatureColumn>) -> Self {
        Self { columns }
    }

    /// Schema of the stroke dataset, in training order.
    pub fn stroke() -> Self {
        use ColumnKind::{Categorical, Numeric};
        Self::new(vec![
            FeatureColumn::new(AGE, Numeric),
            FeatureColumn::new(HYPERTENSION, Numeric),
            FeatureColumn::new(HEART_DISEASE, Numeric),
            FeatureColumn::new(AVG_GLUCOSE_LEVEL, Numeric),
            FeatureColumn::new(BMI, Numeric),
            FeatureColumn::new(SMOKING_STATUS, Categorical),
            FeatureColumn::new(MARITAL_STATUS, Categorical),
            FeatureColumn::new(WORK_TYPE, Categorical),
        ])
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Verify that `table` has exactly this schema's columns, in order, with
    /// values of the right kind. Names are compared case-sensitively.
    pub fn check(&self, table: &FeatureTable) -> Result<(), ModelError> {
        if table.len() != self.columns.len() {
            return Err(ModelError::ColumnCount {
                expected: self.columns.len(),
                found: table.len(),
            });
        }

        for (position, (column, (name, value))) in
            self.columns.iter().zip(table.cells()).enumerate()
        {
            if column.name() != name {
                return Err(ModelError::ColumnMismatch {
                    position,
                    expected: column.name().to_owned(),
                    found: name.clone(),
                });
            }
            let kind_matches = matches!(
                (column.kind(), value),
                (ColumnKind::Numeric, FeatureValue::Numeric(_))
                    | (ColumnKind::Categorical, FeatureValue::Categorical(_))
            );
            if !kind_matches {
                return Err(ModelError::KindMismatch {
                    column: column.name().to_owned(),
                    expected: column.kind(),
                });
            }
        }
        Ok(())
    }
}
