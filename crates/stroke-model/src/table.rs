//! Single-row feature table handed to the classifier.

/// One cell of a [`FeatureTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
}

/// Ordered `(column, value)` pairs describing one patient.
///
/// The table does not validate itself; [`crate::FeatureSchema::check`] decides
/// whether it matches what a model was trained on.
///
/// # Examples
/// ```
/// use stroke_model::{FeatureTable, FeatureValue};
///
/// let row = FeatureTable::new()
///     .with_numeric("AGE", 42.0)
///     .with_categorical("WORK_TYPE", "Private");
/// assert_eq!(row.columns().collect::<Vec<_>>(), ["AGE", "WORK_TYPE"]);
/// assert_eq!(row.get("AGE"), Some(&FeatureValue::Numeric(42.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    cells: Vec<(String, FeatureValue)>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a numeric column.
    #[must_use]
    pub fn with_numeric(mut self, column: impl Into<String>, value: f64) -> Self {
        self.cells
            .push((column.into(), FeatureValue::Numeric(value)));
        self
    }

    /// Append a categorical column.
    #[must_use]
    pub fn with_categorical(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells
            .push((column.into(), FeatureValue::Categorical(value.into())));
        self
    }

    pub fn cells(&self) -> &[(String, FeatureValue)] {
        &self.cells
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// First value stored under `column`, if any.
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
