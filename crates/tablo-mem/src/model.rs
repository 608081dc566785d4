//! In-memory model storage and the sink implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tablo_core::{
    ConstrAttr, ConstrSense, ConstraintBatch, ModelSink, SinkError, VarAttr, VarType, VariableBatch,
};
use tablo_data::{ConstrHandle, Value, VarHandle};

/// Stored state of one variable.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VariableEntry {
    pub lb: f64,
    pub ub: f64,
    pub obj: f64,
    pub vtype: VarType,
    /// Post-solve solution value; `None` before the first optimize.
    pub value: Option<f64>,
}

/// Stored state of one constraint.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConstraintEntry {
    pub lhs: f64,
    pub sense: ConstrSense,
    pub rhs: f64,
}

/// An in-memory model implementing the sink contract.
///
/// Entities created through the batch calls stay pending until
/// [`MemModel::commit`]; attribute reads and writes on pending entities
/// fail with `PendingUpdate`. Entity names must be unique model-wide;
/// duplicates (including duplicates within one batch) are rejected at the
/// batch call, before any entity is created.
#[derive(Debug, Clone, Default)]
pub struct MemModel {
    pub(crate) variables: BTreeMap<VarHandle, VariableEntry>,
    pub(crate) constraints: BTreeMap<ConstrHandle, ConstraintEntry>,
    next_variable_id: u32,
    next_constraint_id: u32,
    pending_variables: BTreeSet<VarHandle>,
    pending_constraints: BTreeSet<ConstrHandle>,
    // All entity names in use, across variables and constraints.
    used_names: BTreeSet<String>,
    // Lazy-allocated metadata storage
    pub(crate) variable_names: Option<BTreeMap<VarHandle, String>>,
    pub(crate) constraint_names: Option<BTreeMap<ConstrHandle, String>>,
    pub(crate) variable_metadata: Option<BTreeMap<VarHandle, serde_json::Value>>,
    pub(crate) constraint_metadata: Option<BTreeMap<ConstrHandle, serde_json::Value>>,
    solved: bool,
}

impl MemModel {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of variables, pending included.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints, pending included.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get the number of entities awaiting commit.
    pub fn num_pending(&self) -> usize {
        self.pending_variables.len() + self.pending_constraints.len()
    }

    /// Whether a solve has run.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Get name for a variable.
    pub fn variable_name(&self, handle: VarHandle) -> Option<&str> {
        self.variable_names
            .as_ref()
            .and_then(|names| names.get(&handle).map(|s| s.as_str()))
    }

    /// Get name for a constraint.
    pub fn constraint_name(&self, handle: ConstrHandle) -> Option<&str> {
        self.constraint_names
            .as_ref()
            .and_then(|names| names.get(&handle).map(|s| s.as_str()))
    }

    /// Lookup a variable by name.
    pub fn variable_by_name(&self, name: &str) -> Option<VarHandle> {
        self.variable_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(handle, value)| (value == name).then_some(*handle))
        })
    }

    /// Lookup a constraint by name.
    pub fn constraint_by_name(&self, name: &str) -> Option<ConstrHandle> {
        self.constraint_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(handle, value)| (value == name).then_some(*handle))
        })
    }

    /// Set metadata for a variable.
    pub fn set_variable_metadata(
        &mut self,
        handle: VarHandle,
        metadata: serde_json::Value,
    ) -> Result<(), SinkError> {
        if !self.variables.contains_key(&handle) {
            return Err(SinkError::UnknownVariable(handle));
        }
        self.variable_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(handle, metadata);
        Ok(())
    }

    /// Get metadata for a variable.
    pub fn variable_metadata(&self, handle: VarHandle) -> Option<&serde_json::Value> {
        self.variable_metadata
            .as_ref()
            .and_then(|meta| meta.get(&handle))
    }

    /// Set metadata for a constraint.
    pub fn set_constraint_metadata(
        &mut self,
        handle: ConstrHandle,
        metadata: serde_json::Value,
    ) -> Result<(), SinkError> {
        if !self.constraints.contains_key(&handle) {
            return Err(SinkError::UnknownConstraint(handle));
        }
        self.constraint_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(handle, metadata);
        Ok(())
    }

    /// Get metadata for a constraint.
    pub fn constraint_metadata(&self, handle: ConstrHandle) -> Option<&serde_json::Value> {
        self.constraint_metadata
            .as_ref()
            .and_then(|meta| meta.get(&handle))
    }

    /// Run a naive solve: commit pending entities, then assign every
    /// variable the value of zero clamped into its bounds.
    ///
    /// This is not an optimizer; it exists so that post-solve attribute
    /// reads have deterministic values to return.
    pub fn optimize(&mut self) {
        let started = Instant::now();
        self.commit();
        for entry in self.variables.values_mut() {
            entry.value = Some(0.0f64.clamp(entry.lb, entry.ub));
        }
        self.solved = true;
        tracing::debug!(
            component = "mem_model",
            operation = "optimize",
            status = "success",
            variables = self.variables.len(),
            constraints = self.constraints.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Assigned solution values"
        );
    }

    fn check_batch_names(&self, names: Option<&Vec<String>>) -> Result<(), SinkError> {
        let Some(names) = names else { return Ok(()) };
        let mut seen = BTreeSet::new();
        for name in names {
            if self.used_names.contains(name) || !seen.insert(name.as_str()) {
                return Err(SinkError::NameCollision { name: name.clone() });
            }
        }
        Ok(())
    }

    fn committed_variable(&self, handle: VarHandle) -> Result<&VariableEntry, SinkError> {
        let entry = self
            .variables
            .get(&handle)
            .ok_or(SinkError::UnknownVariable(handle))?;
        if self.pending_variables.contains(&handle) {
            return Err(SinkError::PendingUpdate);
        }
        Ok(entry)
    }

    fn committed_constraint(&self, handle: ConstrHandle) -> Result<&ConstraintEntry, SinkError> {
        let entry = self
            .constraints
            .get(&handle)
            .ok_or(SinkError::UnknownConstraint(handle))?;
        if self.pending_constraints.contains(&handle) {
            return Err(SinkError::PendingUpdate);
        }
        Ok(entry)
    }
}

fn check_bounds(lower: f64, upper: f64) -> Result<(), SinkError> {
    if lower.is_nan() || upper.is_nan() || lower > upper {
        return Err(SinkError::InvalidBounds { lower, upper });
    }
    Ok(())
}

fn numeric(attr: &'static str, value: &Value) -> Result<f64, SinkError> {
    value
        .as_f64()
        .ok_or(SinkError::InvalidValue { attribute: attr })
}

impl ModelSink for MemModel {
    fn create_variables(&mut self, batch: &VariableBatch) -> Result<Vec<VarHandle>, SinkError> {
        let started = Instant::now();
        let count = batch.len();
        if batch.ub.len() != count || batch.obj.len() != count || batch.vtype.len() != count {
            return Err(SinkError::Internal("ragged variable batch".to_string()));
        }
        if let Some(names) = &batch.names {
            if names.len() != count {
                return Err(SinkError::Internal("ragged variable batch".to_string()));
            }
        }
        // Validate the whole batch before creating anything.
        for i in 0..count {
            check_bounds(batch.lb[i], batch.ub[i])?;
        }
        self.check_batch_names(batch.names.as_ref())?;

        let mut handles = Vec::with_capacity(count);
        for i in 0..count {
            let handle = VarHandle::new(self.next_variable_id);
            self.next_variable_id += 1;
            self.variables.insert(
                handle,
                VariableEntry {
                    lb: batch.lb[i],
                    ub: batch.ub[i],
                    obj: batch.obj[i],
                    vtype: batch.vtype[i],
                    value: None,
                },
            );
            self.pending_variables.insert(handle);
            if let Some(names) = &batch.names {
                self.used_names.insert(names[i].clone());
                self.variable_names
                    .get_or_insert_with(BTreeMap::new)
                    .insert(handle, names[i].clone());
            }
            handles.push(handle);
        }

        tracing::debug!(
            component = "mem_model",
            operation = "create_variables",
            status = "success",
            variables = count,
            named = batch.names.is_some(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Staged variable batch"
        );
        Ok(handles)
    }

    fn create_constraints(
        &mut self,
        batch: &ConstraintBatch,
    ) -> Result<Vec<ConstrHandle>, SinkError> {
        let started = Instant::now();
        let count = batch.len();
        if batch.sense.len() != count || batch.rhs.len() != count {
            return Err(SinkError::Internal("ragged constraint batch".to_string()));
        }
        if let Some(names) = &batch.names {
            if names.len() != count {
                return Err(SinkError::Internal("ragged constraint batch".to_string()));
            }
        }
        for i in 0..count {
            if batch.lhs[i].is_nan() || batch.rhs[i].is_nan() {
                return Err(SinkError::InvalidBounds {
                    lower: batch.lhs[i],
                    upper: batch.rhs[i],
                });
            }
        }
        self.check_batch_names(batch.names.as_ref())?;

        let mut handles = Vec::with_capacity(count);
        for i in 0..count {
            let handle = ConstrHandle::new(self.next_constraint_id);
            self.next_constraint_id += 1;
            self.constraints.insert(
                handle,
                ConstraintEntry {
                    lhs: batch.lhs[i],
                    sense: batch.sense[i],
                    rhs: batch.rhs[i],
                },
            );
            self.pending_constraints.insert(handle);
            if let Some(names) = &batch.names {
                self.used_names.insert(names[i].clone());
                self.constraint_names
                    .get_or_insert_with(BTreeMap::new)
                    .insert(handle, names[i].clone());
            }
            handles.push(handle);
        }

        tracing::debug!(
            component = "mem_model",
            operation = "create_constraints",
            status = "success",
            constraints = count,
            named = batch.names.is_some(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Staged constraint batch"
        );
        Ok(handles)
    }

    fn read_var_attr(&self, handle: VarHandle, attr: VarAttr) -> Result<Value, SinkError> {
        let entry = self.committed_variable(handle)?;
        match attr {
            VarAttr::LowerBound => Ok(Value::Float(entry.lb)),
            VarAttr::UpperBound => Ok(Value::Float(entry.ub)),
            VarAttr::Obj => Ok(Value::Float(entry.obj)),
            VarAttr::VType => Ok(Value::Str(entry.vtype.as_str().to_string())),
            VarAttr::Value => entry
                .value
                .map(Value::Float)
                .ok_or(SinkError::AttributeUnavailable { attribute: "value" }),
        }
    }

    fn write_var_attr(
        &mut self,
        handle: VarHandle,
        attr: VarAttr,
        value: Value,
    ) -> Result<(), SinkError> {
        // Borrow immutably first so validation can inspect current state.
        let current = self.committed_variable(handle)?.clone();
        let entry = match self.variables.get_mut(&handle) {
            Some(entry) => entry,
            None => return Err(SinkError::UnknownVariable(handle)),
        };
        match attr {
            VarAttr::LowerBound => {
                let v = numeric("lb", &value)?;
                check_bounds(v, current.ub)?;
                entry.lb = v;
            }
            VarAttr::UpperBound => {
                let v = numeric("ub", &value)?;
                check_bounds(current.lb, v)?;
                entry.ub = v;
            }
            VarAttr::Obj => {
                entry.obj = numeric("obj", &value)?;
            }
            VarAttr::VType => {
                let vtype = value
                    .as_str()
                    .and_then(VarType::parse)
                    .ok_or(SinkError::InvalidValue { attribute: "vtype" })?;
                entry.vtype = vtype;
            }
            VarAttr::Value => {
                return Err(SinkError::AttributeUnavailable { attribute: "value" });
            }
        }
        Ok(())
    }

    fn read_constr_attr(&self, handle: ConstrHandle, attr: ConstrAttr) -> Result<Value, SinkError> {
        let entry = self.committed_constraint(handle)?;
        match attr {
            ConstrAttr::Sense => Ok(Value::Str(entry.sense.symbol().to_string())),
            ConstrAttr::Rhs => Ok(Value::Float(entry.rhs)),
            ConstrAttr::Slack => {
                if !self.solved {
                    return Err(SinkError::AttributeUnavailable { attribute: "slack" });
                }
                Ok(Value::Float(entry.rhs - entry.lhs))
            }
        }
    }

    fn write_constr_attr(
        &mut self,
        handle: ConstrHandle,
        attr: ConstrAttr,
        value: Value,
    ) -> Result<(), SinkError> {
        self.committed_constraint(handle)?;
        let entry = match self.constraints.get_mut(&handle) {
            Some(entry) => entry,
            None => return Err(SinkError::UnknownConstraint(handle)),
        };
        match attr {
            ConstrAttr::Rhs => {
                entry.rhs = numeric("rhs", &value)?;
            }
            ConstrAttr::Sense => {
                let sense = value
                    .as_str()
                    .and_then(ConstrSense::parse)
                    .ok_or(SinkError::InvalidValue { attribute: "sense" })?;
                entry.sense = sense;
            }
            ConstrAttr::Slack => {
                return Err(SinkError::AttributeUnavailable { attribute: "slack" });
            }
        }
        Ok(())
    }

    fn commit(&mut self) {
        let released = self.pending_variables.len() + self.pending_constraints.len();
        self.pending_variables.clear();
        self.pending_constraints.clear();
        if released > 0 {
            tracing::debug!(
                component = "mem_model",
                operation = "commit",
                status = "success",
                released = released,
                "Committed pending entities"
            );
        }
    }
}
