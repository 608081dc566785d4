//! Serializable model snapshots.

use serde::Serialize;

use crate::model::MemModel;

/// View of a variable in a model snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct VariableView {
    pub id: u32,
    pub name: Option<String>,
    pub lb: f64,
    pub ub: f64,
    pub obj: f64,
    pub vtype: &'static str,
    pub value: Option<f64>,
    pub metadata: Option<serde_json::Value>,
}

/// View of a constraint in a model snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintView {
    pub id: u32,
    pub name: Option<String>,
    pub lhs: f64,
    pub sense: &'static str,
    pub rhs: f64,
    pub metadata: Option<serde_json::Value>,
}

/// Metadata about a model snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SnapshotMetadata {
    pub variables: usize,
    pub constraints: usize,
    pub pending: usize,
    pub solved: bool,
}

/// A complete snapshot of a model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSnapshot {
    pub variables: Vec<VariableView>,
    pub constraints: Vec<ConstraintView>,
    pub metadata: SnapshotMetadata,
}

impl MemModel {
    /// Inspect the model and return a structured snapshot.
    pub fn snapshot(&self) -> ModelSnapshot {
        let variables = self
            .variables
            .iter()
            .map(|(handle, entry)| VariableView {
                id: handle.inner(),
                name: self.variable_name(*handle).map(str::to_string),
                lb: entry.lb,
                ub: entry.ub,
                obj: entry.obj,
                vtype: entry.vtype.as_str(),
                value: entry.value,
                metadata: self.variable_metadata(*handle).cloned(),
            })
            .collect();

        let constraints = self
            .constraints
            .iter()
            .map(|(handle, entry)| ConstraintView {
                id: handle.inner(),
                name: self.constraint_name(*handle).map(str::to_string),
                lhs: entry.lhs,
                sense: entry.sense.symbol(),
                rhs: entry.rhs,
                metadata: self.constraint_metadata(*handle).cloned(),
            })
            .collect();

        ModelSnapshot {
            variables,
            constraints,
            metadata: SnapshotMetadata {
                variables: self.num_variables(),
                constraints: self.num_constraints(),
                pending: self.num_pending(),
                solved: self.is_solved(),
            },
        }
    }
}
