//! Named columns sharing one index.

use crate::error::DataError;
use crate::index::Index;
use crate::series::{Series, Value};

/// An ordered collection of named columns aligned with one shared index.
///
/// Column insertion order is preserved and observable. Frames are value
/// types; `with_column` returns a new frame rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    index: Index,
    columns: Vec<(String, Vec<Value>)>,
}

impl Frame {
    /// Create an empty frame over the given index.
    pub fn new(index: Index) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Return a new frame with one column appended.
    ///
    /// Fails if the name collides with an existing column or the value
    /// count does not match the index length.
    pub fn with_column<I>(mut self, name: impl Into<String>, values: I) -> Result<Self, DataError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let name = name.into();
        if self.has_column(&name) {
            return Err(DataError::ColumnCollision { name });
        }
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != self.index.len() {
            return Err(DataError::LengthMismatch {
                index_len: self.index.len(),
                values_len: values.len(),
            });
        }
        self.columns.push((name, values));
        Ok(self)
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Values of a column, in row order.
    pub fn column_values(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// A column as a named series over the frame's index.
    pub fn column(&self, name: &str) -> Result<Series, DataError> {
        let values = self
            .column_values(name)
            .ok_or_else(|| DataError::UnknownColumn {
                name: name.to_string(),
            })?;
        Ok(Series::new(self.index.clone(), values.to_vec())?.with_name(name))
    }
}
