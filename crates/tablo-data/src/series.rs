//! Dynamic cell values and index-aligned columns.

use crate::error::DataError;
use crate::handles::{ConstrHandle, VarHandle};
use crate::index::Index;
use crate::key::Key;

/// A single cell value.
///
/// Cells hold scalars or entity handles, so the same column type carries
/// input data and creation results.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
    Str(String),
    Var(VarHandle),
    Constr(ConstrHandle),
}

impl Value {
    /// Numeric view; integers widen to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<VarHandle> {
        match self {
            Value::Var(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_constr(&self) -> Option<ConstrHandle> {
        match self {
            Value::Constr(h) => Some(*h),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<VarHandle> for Value {
    fn from(value: VarHandle) -> Self {
        Value::Var(value)
    }
}

impl From<ConstrHandle> for Value {
    fn from(value: ConstrHandle) -> Self {
        Value::Constr(value)
    }
}

/// An ordered column of values aligned 1:1 with an index.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    index: Index,
    values: Vec<Value>,
    name: Option<String>,
}

impl Series {
    /// Create a series over an explicit index.
    ///
    /// Fails if the value count does not match the index length.
    pub fn new<I>(index: Index, values: I) -> Result<Self, DataError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != index.len() {
            return Err(DataError::LengthMismatch {
                index_len: index.len(),
                values_len: values.len(),
            });
        }
        Ok(Self {
            index,
            values,
            name: None,
        })
    }

    /// Create a series over the default `0..n` integer index.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self {
            index: Index::range(values.len()),
            values,
            name: None,
        }
    }

    /// Attach a name to the series.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at a position.
    pub fn get(&self, pos: usize) -> Option<&Value> {
        self.values.get(pos)
    }

    /// Strict alignment check: the series index must equal `target` as an
    /// ordered sequence of keys, position for position.
    pub fn aligns_with(&self, target: &Index) -> bool {
        self.index == *target
    }

    /// Iterate over (key, value) pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.index.iter().zip(self.values.iter())
    }
}
