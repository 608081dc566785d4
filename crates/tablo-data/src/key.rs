//! Index key types.

use std::fmt;

/// A single index key.
///
/// Keys are scalar (`Int`, `Float`, `Str`) or composite for multi-level
/// indices. Composite components are expected to be scalar keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Int(i64),
    Float(f64),
    Str(String),
    Composite(Vec<Key>),
}

impl Key {
    /// Build a composite key from its components.
    pub fn composite<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        Key::Composite(parts.into_iter().collect())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{v}"),
            Key::Float(v) => write!(f, "{v}"),
            Key::Str(v) => write!(f, "{v}"),
            Key::Composite(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key::Float(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}
