//! Data error types.

/// Errors that can occur when building series and frames.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// Value count does not match index length.
    LengthMismatch { index_len: usize, values_len: usize },
    /// Referenced column does not exist.
    UnknownColumn { name: String },
    /// Column name already exists in the frame.
    ColumnCollision { name: String },
}

impl DataError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            DataError::LengthMismatch { .. } => "DATA_LENGTH_MISMATCH",
            DataError::UnknownColumn { .. } => "DATA_UNKNOWN_COLUMN",
            DataError::ColumnCollision { .. } => "DATA_COLUMN_COLLISION",
        }
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::LengthMismatch {
                index_len,
                values_len,
            } => write!(
                f,
                "[{}] Column has {} values but the index has {} entries",
                self.code(),
                values_len,
                index_len
            ),
            DataError::UnknownColumn { name } => {
                write!(f, "[{}] Column '{}' does not exist", self.code(), name)
            }
            DataError::ColumnCollision { name } => {
                write!(f, "[{}] Column '{}' already exists", self.code(), name)
            }
        }
    }
}

impl std::error::Error for DataError {}
