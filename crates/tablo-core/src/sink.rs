//! The model sink contract.
//!
//! A model sink is the narrow interface the bridge requires from a host
//! optimization library: batch entity creation, per-handle attribute access,
//! and an explicit commit step before attributes of just-created entities
//! become readable.

use tablo_data::{ConstrHandle, Value, VarHandle};

use crate::error::SinkError;

/// Variable domain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Continuous,
    Integer,
    Binary,
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Continuous => "continuous",
            VarType::Integer => "integer",
            VarType::Binary => "binary",
        }
    }

    /// Parse a textual variable type. Single-letter solver shorthands are
    /// accepted alongside the full names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "continuous" | "C" => Some(VarType::Continuous),
            "integer" | "I" => Some(VarType::Integer),
            "binary" | "B" => Some(VarType::Binary),
            _ => None,
        }
    }
}

/// Constraint comparison sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstrSense {
    LessEqual,
    Equal,
    GreaterEqual,
}

impl ConstrSense {
    pub fn symbol(self) -> &'static str {
        match self {
            ConstrSense::LessEqual => "<=",
            ConstrSense::Equal => "=",
            ConstrSense::GreaterEqual => ">=",
        }
    }

    /// Parse a sense symbol. Single-character solver shorthands are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "<=" | "<" => Some(ConstrSense::LessEqual),
            "=" | "==" => Some(ConstrSense::Equal),
            ">=" | ">" => Some(ConstrSense::GreaterEqual),
            _ => None,
        }
    }
}

/// Variable attributes exposed through the accessor layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarAttr {
    LowerBound,
    UpperBound,
    Obj,
    VType,
    /// Post-solve solution value.
    Value,
}

impl VarAttr {
    pub fn as_str(self) -> &'static str {
        match self {
            VarAttr::LowerBound => "lb",
            VarAttr::UpperBound => "ub",
            VarAttr::Obj => "obj",
            VarAttr::VType => "vtype",
            VarAttr::Value => "value",
        }
    }
}

/// Constraint attributes exposed through the accessor layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstrAttr {
    Sense,
    Rhs,
    /// Post-solve slack, `rhs - lhs`.
    Slack,
}

impl ConstrAttr {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstrAttr::Sense => "sense",
            ConstrAttr::Rhs => "rhs",
            ConstrAttr::Slack => "slack",
        }
    }
}

/// One batch "add N variables" request.
///
/// The per-position vectors are parallel; position i describes the i-th
/// variable to create.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBatch {
    pub lb: Vec<f64>,
    pub ub: Vec<f64>,
    pub obj: Vec<f64>,
    pub vtype: Vec<VarType>,
    pub names: Option<Vec<String>>,
}

impl VariableBatch {
    pub fn len(&self) -> usize {
        self.lb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lb.is_empty()
    }
}

/// One batch "add N constraints" request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintBatch {
    pub lhs: Vec<f64>,
    pub sense: Vec<ConstrSense>,
    pub rhs: Vec<f64>,
    pub names: Option<Vec<String>>,
}

impl ConstraintBatch {
    pub fn len(&self) -> usize {
        self.lhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lhs.is_empty()
    }
}

/// The interface a host optimization library presents to the bridge.
///
/// Created entities go through a pending phase: their attributes are not
/// guaranteed readable until [`ModelSink::commit`] is called. The bridge
/// never retries a failed batch call; post-failure model state is whatever
/// the host library guarantees.
pub trait ModelSink {
    /// Create one variable per batch position, returning handles in order.
    fn create_variables(&mut self, batch: &VariableBatch) -> Result<Vec<VarHandle>, SinkError>;

    /// Create one constraint per batch position, returning handles in order.
    fn create_constraints(
        &mut self,
        batch: &ConstraintBatch,
    ) -> Result<Vec<ConstrHandle>, SinkError>;

    fn read_var_attr(&self, handle: VarHandle, attr: VarAttr) -> Result<Value, SinkError>;

    fn write_var_attr(
        &mut self,
        handle: VarHandle,
        attr: VarAttr,
        value: Value,
    ) -> Result<(), SinkError>;

    fn read_constr_attr(&self, handle: ConstrHandle, attr: ConstrAttr) -> Result<Value, SinkError>;

    fn write_constr_attr(
        &mut self,
        handle: ConstrHandle,
        attr: ConstrAttr,
        value: Value,
    ) -> Result<(), SinkError>;

    /// Commit pending changes, making attributes of just-created entities
    /// readable.
    fn commit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtype_parse_roundtrip() {
        for vtype in [VarType::Continuous, VarType::Integer, VarType::Binary] {
            assert_eq!(VarType::parse(vtype.as_str()), Some(vtype));
        }
        assert_eq!(VarType::parse("C"), Some(VarType::Continuous));
        assert_eq!(VarType::parse("semi"), None);
    }

    #[test]
    fn test_sense_parse_accepts_shorthands() {
        assert_eq!(ConstrSense::parse("<="), Some(ConstrSense::LessEqual));
        assert_eq!(ConstrSense::parse("<"), Some(ConstrSense::LessEqual));
        assert_eq!(ConstrSense::parse("=="), Some(ConstrSense::Equal));
        assert_eq!(ConstrSense::parse(">"), Some(ConstrSense::GreaterEqual));
        assert_eq!(ConstrSense::parse("!="), None);
    }

    #[test]
    fn test_batch_len() {
        let batch = VariableBatch {
            lb: vec![0.0; 3],
            ub: vec![1.0; 3],
            obj: vec![0.0; 3],
            vtype: vec![VarType::Continuous; 3],
            names: None,
        };
        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
    }
}
