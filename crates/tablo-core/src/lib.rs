//! Bridge between indexed tables and optimization model sinks.
//!
//! Callers declare one decision variable or constraint per row of an index,
//! series, or frame. The bridge resolves per-entity attribute specifications
//! against the target index, derives deterministic entity names from index
//! keys, issues a single batch creation call to a [`ModelSink`], and returns
//! the created handles as an index-aligned series.
//!
//! # Module Organization
//!
//! - [`sink`]: The collaborator contract a host optimization library implements
//! - [`naming`]: Deterministic entity labels derived from index keys
//! - [`attr`]: Attribute specifications and resolution
//! - [`builder`]: Batch variable and constraint creation
//! - [`accessor`]: Attribute reads and writes over handle series
//! - [`error`]: Bridge and sink error types

pub mod accessor;
pub mod attr;
pub mod builder;
pub mod error;
pub mod naming;
pub mod sink;

pub use accessor::{read_constr_attr, read_var_attr, write_constr_attr, write_var_attr};
pub use attr::AttrSpec;
pub use builder::{
    add_constraints, add_variables, add_variables_from_frame, add_variables_from_index, Operand,
    SenseSpec, VarResult, VarSpec, VarTarget,
};
pub use error::{BridgeError, KeyMismatch, SinkError};
pub use naming::entity_labels;
pub use sink::{ConstrAttr, ConstrSense, ConstraintBatch, ModelSink, VarAttr, VarType, VariableBatch};
