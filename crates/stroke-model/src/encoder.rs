//! Column-wise preprocessing: standard scaling and one-hot encoding.

use std::collections::BTreeSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::columns::{ColumnKind, FeatureSchema};
use crate::error::ModelError;
use crate::table::{FeatureTable, FeatureValue};

/// Mean/scale pair learnt for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NumericScaler {
    mean: f64,
    scale: f64,
}

impl NumericScaler {
    #[expect(
        clippy::cast_precision_loss,
        reason = "row counts are far below f64 precision limits"
    )]
    fn fit(values: impl Iterator<Item = f64>) -> Self {
        let finite: Vec<f64> = values.filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self {
                mean: 0.0,
                scale: 1.0,
            };
        }
        let n = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        Self {
            mean,
            scale: if std > f64::EPSILON { std } else { 1.0 },
        }
    }

    /// Missing (non-finite) inputs are imputed with the mean, i.e. encode to 0.
    fn transform(&self, value: f64) -> f64 {
        let value = if value.is_finite() { value } else { self.mean };
        (value - self.mean) / self.scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum ColumnEncoding {
    Scaled(NumericScaler),
    OneHot { categories: Vec<String> },
}

impl ColumnEncoding {
    fn width(&self) -> usize {
        match self {
            Self::Scaled(_) => 1,
            Self::OneHot { categories } => categories.len(),
        }
    }
}

/// Preprocessing fitted on the training rows of a [`FeatureSchema`].
///
/// Unknown categories are rejected at transform time rather than silently
/// encoded as all-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
    encodings: Vec<ColumnEncoding>,
}

impl FeatureEncoder {
    /// Learn scaling statistics and category vocabularies from `rows`.
    ///
    /// # Errors
    /// [`ModelError::EmptyDataset`] when `rows` is empty, or a schema error
    /// for the first row that does not match `schema`.
    pub fn fit(schema: &FeatureSchema, rows: &[FeatureTable]) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        for row in rows {
            schema.check(row)?;
        }

        let encodings = schema
            .columns()
            .iter()
            .enumerate()
            .map(|(position, column)| {
                let cells = rows.iter().map(move |row| &row.cells()[position].1);
                match column.kind() {
                    ColumnKind::Numeric => ColumnEncoding::Scaled(NumericScaler::fit(
                        cells.filter_map(|cell| match cell {
                            FeatureValue::Numeric(v) => Some(*v),
                            FeatureValue::Categorical(_) => None,
                        }),
                    )),
                    ColumnKind::Categorical => {
                        let categories: BTreeSet<String> = cells
                            .filter_map(|cell| match cell {
                                FeatureValue::Categorical(v) => Some(v.clone()),
                                FeatureValue::Numeric(_) => None,
                            })
                            .collect();
                        ColumnEncoding::OneHot {
                            categories: categories.into_iter().collect(),
                        }
                    }
                }
            })
            .collect();

        Ok(Self {
            schema: schema.clone(),
            encodings,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Number of encoded features per row.
    pub fn width(&self) -> usize {
        self.encodings.iter().map(ColumnEncoding::width).sum()
    }

    fn encode_into(&self, row: &FeatureTable, out: &mut Vec<f64>) -> Result<(), ModelError> {
        self.schema.check(row)?;
        for ((name, value), encoding) in row.cells().iter().zip(&self.encodings) {
            match (encoding, value) {
                (ColumnEncoding::Scaled(scaler), FeatureValue::Numeric(v)) => {
                    out.push(scaler.transform(*v));
                }
                (ColumnEncoding::OneHot { categories }, FeatureValue::Categorical(v)) => {
                    let hot = categories
                        .iter()
                        .position(|category| category == v)
                        .ok_or_else(|| ModelError::UnknownCategory {
                            column: name.clone(),
                            value: v.clone(),
                        })?;
                    out.extend((0..categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
                }
                (ColumnEncoding::Scaled(_), FeatureValue::Categorical(_)) => {
                    return Err(ModelError::KindMismatch {
                        column: name.clone(),
                        expected: ColumnKind::Numeric,
                    });
                }
                (ColumnEncoding::OneHot { .. }, FeatureValue::Numeric(_)) => {
                    return Err(ModelError::KindMismatch {
                        column: name.clone(),
                        expected: ColumnKind::Categorical,
                    });
                }
            }
        }
        Ok(())
    }

    /// Encode rows into a dense `rows x width` matrix.
    ///
    /// # Errors
    /// The first schema or unknown-category error encountered.
    pub fn transform(&self, rows: &[FeatureTable]) -> Result<Array2<f64>, ModelError> {
        let width = self.width();
        let mut values = Vec::with_capacity(rows.len() * width);
        for row in rows {
            self.encode_into(row, &mut values)?;
        }
        Array2::from_shape_vec((rows.len(), width), values)
            .map_err(|err| ModelError::Training(format!("encoded matrix has wrong shape: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::FeatureColumn;
    use rstest::{fixture, rstest};

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            FeatureColumn::new("X", ColumnKind::Numeric),
            FeatureColumn::new("COLOUR", ColumnKind::Categorical),
        ])
    }

    fn row(x: f64, colour: &str) -> FeatureTable {
        FeatureTable::new()
            .with_numeric("X", x)
            .with_categorical("COLOUR", colour)
    }

    #[fixture]
    fn encoder() -> FeatureEncoder {
        FeatureEncoder::fit(
            &schema(),
            &[row(1.0, "red"), row(3.0, "blue"), row(f64::NAN, "red")],
        )
        .expect("encoder fits")
    }

    #[rstest]
    fn width_counts_scaled_and_one_hot_columns(encoder: FeatureEncoder) {
        assert_eq!(encoder.width(), 3);
    }

    #[rstest]
    fn scales_numeric_and_sorts_categories(encoder: FeatureEncoder) {
        let encoded = encoder
            .transform(&[row(3.0, "blue"), row(f64::NAN, "red")])
            .expect("known rows encode");

        // mean 2, population std 1; categories sorted: blue, red
        assert_eq!(encoded.row(0).to_vec(), vec![1.0, 1.0, 0.0]);
        assert_eq!(encoded.row(1).to_vec(), vec![0.0, 0.0, 1.0]);
    }

    #[rstest]
    fn unknown_category_is_rejected(encoder: FeatureEncoder) {
        let err = encoder
            .transform(&[row(2.0, "green")])
            .expect_err("green was never seen");
        assert!(matches!(
            err,
            ModelError::UnknownCategory { ref column, ref value }
                if column == "COLOUR" && value == "green"
        ));
    }

    #[rstest]
    fn fitting_on_no_rows_fails() {
        let err = FeatureEncoder::fit(&schema(), &[]).expect_err("empty");
        assert!(matches!(err, ModelError::EmptyDataset));
    }

    #[rstest]
    fn constant_column_keeps_unit_scale() {
        let encoder = FeatureEncoder::fit(&schema(), &[row(5.0, "red"), row(5.0, "red")])
            .expect("encoder fits");
        let encoded = encoder.transform(&[row(6.0, "red")]).expect("encodes");
        assert_eq!(encoded.row(0).to_vec(), vec![1.0, 1.0]);
    }
}
