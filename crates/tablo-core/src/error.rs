//! Bridge and sink error types.

use tablo_data::{ConstrHandle, DataError, Index, VarHandle};

/// First differing key between two indices of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMismatch {
    pub position: usize,
    /// Display form of the target index key at `position`.
    pub expected: String,
    /// Display form of the supplied series key at `position`.
    pub got: String,
}

/// Errors raised by the bridge before any sink call is made.
///
/// All validation happens up front: a `BridgeError` other than `Sink`
/// guarantees the model sink was not touched.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// Referenced column does not exist in the target frame.
    UnknownColumn { name: String },
    /// Result column name collides with an existing frame column.
    ColumnCollision { name: String },
    /// The frame path requires a name for the result column.
    MissingName,
    /// Spec kind is not legal for this input kind.
    SpecNotApplicable {
        attribute: &'static str,
        reason: &'static str,
    },
    /// Constraint creation received only scalars; nothing to index by.
    NoIndexSource,
    /// A supplied series does not positionally match the target index.
    Misaligned {
        attribute: &'static str,
        expected_len: usize,
        got_len: usize,
        /// Set when the lengths agree but a key differs.
        mismatch: Option<KeyMismatch>,
    },
    /// A resolved value is not of the expected scalar type for its slot.
    WrongType {
        attribute: &'static str,
        expected: &'static str,
    },
    /// Data-model error while assembling the result.
    Data(DataError),
    /// Error propagated verbatim from the model sink.
    Sink(SinkError),
}

impl BridgeError {
    /// Build a misalignment error for `got` against `target`, locating the
    /// first differing key when the lengths agree.
    pub fn misaligned(attribute: &'static str, target: &Index, got: &Index) -> Self {
        let mismatch = target
            .iter()
            .zip(got.iter())
            .enumerate()
            .find(|(_, (expected, key))| expected != key)
            .map(|(position, (expected, key))| KeyMismatch {
                position,
                expected: expected.to_string(),
                got: key.to_string(),
            });
        BridgeError::Misaligned {
            attribute,
            expected_len: target.len(),
            got_len: got.len(),
            mismatch,
        }
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::UnknownColumn { .. } => "CONFIG_UNKNOWN_COLUMN",
            BridgeError::ColumnCollision { .. } => "CONFIG_COLUMN_COLLISION",
            BridgeError::MissingName => "CONFIG_MISSING_NAME",
            BridgeError::SpecNotApplicable { .. } => "CONFIG_SPEC_KIND",
            BridgeError::NoIndexSource => "CONFIG_NO_INDEX",
            BridgeError::Misaligned { .. } => "ALIGN_MISMATCH",
            BridgeError::WrongType { .. } => "TYPE_MISMATCH",
            BridgeError::Data(inner) => inner.code(),
            BridgeError::Sink(inner) => inner.code(),
        }
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::UnknownColumn { name } => {
                write!(f, "[{}] Column '{}' does not exist", self.code(), name)
            }
            BridgeError::ColumnCollision { name } => write!(
                f,
                "[{}] Result column '{}' collides with an existing column",
                self.code(),
                name
            ),
            BridgeError::MissingName => write!(
                f,
                "[{}] A name is required to attach the result column to a frame",
                self.code()
            ),
            BridgeError::SpecNotApplicable { attribute, reason } => {
                write!(f, "[{}] Attribute '{}': {}", self.code(), attribute, reason)
            }
            BridgeError::NoIndexSource => write!(
                f,
                "[{}] At least one of lhs, sense, rhs must be a series",
                self.code()
            ),
            BridgeError::Misaligned {
                attribute,
                expected_len,
                got_len,
                mismatch,
            } => {
                write!(
                    f,
                    "[{}] Attribute '{}' is not aligned with the target index \
                     (target has {} entries, series has {})",
                    self.code(),
                    attribute,
                    expected_len,
                    got_len
                )?;
                if let Some(detail) = mismatch {
                    write!(
                        f,
                        "; first differing key at position {}: target '{}', series '{}'",
                        detail.position, detail.expected, detail.got
                    )?;
                }
                Ok(())
            }
            BridgeError::WrongType {
                attribute,
                expected,
            } => write!(
                f,
                "[{}] Attribute '{}' expects {} values",
                self.code(),
                attribute,
                expected
            ),
            BridgeError::Data(inner) => inner.fmt(f),
            BridgeError::Sink(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<DataError> for BridgeError {
    fn from(err: DataError) -> Self {
        BridgeError::Data(err)
    }
}

impl From<SinkError> for BridgeError {
    fn from(err: SinkError) -> Self {
        BridgeError::Sink(err)
    }
}

/// Errors raised by a model sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkError {
    /// Lower bound exceeds upper bound, or a bound is NaN.
    InvalidBounds { lower: f64, upper: f64 },
    /// Entity name already exists in the model.
    NameCollision { name: String },
    /// Handle does not refer to a variable in the model.
    UnknownVariable(VarHandle),
    /// Handle does not refer to a constraint in the model.
    UnknownConstraint(ConstrHandle),
    /// Entity was created but not yet committed; attributes unreadable.
    PendingUpdate,
    /// Attribute not materialized (e.g., solution value before a solve) or
    /// not writable for this entity kind.
    AttributeUnavailable { attribute: &'static str },
    /// Written value is not of the type the attribute accepts.
    InvalidValue { attribute: &'static str },
    /// Internal sink error.
    Internal(String),
}

impl SinkError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SinkError::InvalidBounds { .. } => "SINK_INVALID_BOUNDS",
            SinkError::NameCollision { .. } => "SINK_NAME_COLLISION",
            SinkError::UnknownVariable(_) => "SINK_UNKNOWN_VARIABLE",
            SinkError::UnknownConstraint(_) => "SINK_UNKNOWN_CONSTRAINT",
            SinkError::PendingUpdate => "SINK_PENDING_UPDATE",
            SinkError::AttributeUnavailable { .. } => "SINK_ATTR_UNAVAILABLE",
            SinkError::InvalidValue { .. } => "SINK_INVALID_VALUE",
            SinkError::Internal(_) => "SINK_INTERNAL",
        }
    }
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::InvalidBounds { lower, upper } => write!(
                f,
                "[{}] Bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            SinkError::NameCollision { name } => {
                write!(f, "[{}] Entity name '{}' already exists", self.code(), name)
            }
            SinkError::UnknownVariable(handle) => write!(
                f,
                "[{}] Variable handle {} does not exist",
                self.code(),
                handle.inner()
            ),
            SinkError::UnknownConstraint(handle) => write!(
                f,
                "[{}] Constraint handle {} does not exist",
                self.code(),
                handle.inner()
            ),
            SinkError::PendingUpdate => write!(
                f,
                "[{}] Entity is pending; call commit before reading attributes",
                self.code()
            ),
            SinkError::AttributeUnavailable { attribute } => write!(
                f,
                "[{}] Attribute '{}' is not available",
                self.code(),
                attribute
            ),
            SinkError::InvalidValue { attribute } => write!(
                f,
                "[{}] Value has the wrong type for attribute '{}'",
                self.code(),
                attribute
            ),
            SinkError::Internal(msg) => {
                write!(f, "[{}] Sink internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SinkError {}
