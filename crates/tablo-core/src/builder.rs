//! Entity builder: batch variable and constraint creation.
//!
//! Both operations share one skeleton: resolve every attribute spec against
//! the target index, derive labels, issue exactly one batch call to the
//! model sink, and wrap the returned handles into an index-aligned series.
//! All validation precedes the sink call, so creation is all-or-nothing
//! with respect to input validation. Sink errors propagate unchanged and
//! are never retried.

use std::time::Instant;

use tablo_data::{Frame, Index, Key, Series, Value};

use crate::attr::AttrSpec;
use crate::error::BridgeError;
use crate::naming::entity_labels;
use crate::sink::{ConstrSense, ConstraintBatch, ModelSink, VarType, VariableBatch};

/// Per-variable attribute specifications for a batch creation call.
///
/// Defaults match the conventional LP relaxation: `lb = 0`, `ub = +inf`,
/// `obj = 0`, continuous type, unnamed.
#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    pub name: Option<String>,
    pub lb: AttrSpec,
    pub ub: AttrSpec,
    pub obj: AttrSpec,
    pub vtype: AttrSpec,
    /// Frame path only: derive entity labels from the values of these
    /// columns instead of the frame index. One column yields scalar label
    /// keys; several yield composite keys in the given order.
    pub label_columns: Option<Vec<String>>,
}

impl Default for VarSpec {
    fn default() -> Self {
        Self {
            name: None,
            lb: AttrSpec::from(0.0),
            ub: AttrSpec::from(f64::INFINITY),
            obj: AttrSpec::from(0.0),
            vtype: AttrSpec::Constant(VarType::Continuous.into()),
            label_columns: None,
        }
    }
}

impl VarSpec {
    /// Create a spec with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spec with all defaults and a base name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_lb(mut self, spec: impl Into<AttrSpec>) -> Self {
        self.lb = spec.into();
        self
    }

    pub fn with_ub(mut self, spec: impl Into<AttrSpec>) -> Self {
        self.ub = spec.into();
        self
    }

    pub fn with_obj(mut self, spec: impl Into<AttrSpec>) -> Self {
        self.obj = spec.into();
        self
    }

    /// Set one variable type for the whole batch.
    pub fn with_vtype(mut self, vtype: VarType) -> Self {
        self.vtype = AttrSpec::Constant(vtype.into());
        self
    }

    /// Supply the variable type per entity.
    pub fn with_vtype_spec(mut self, spec: AttrSpec) -> Self {
        self.vtype = spec;
        self
    }

    pub fn with_label_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

/// Input to the variable-creation entry point.
#[derive(Debug, Clone)]
pub enum VarTarget {
    Index(Index),
    Series(Series),
    Frame(Frame),
}

/// Result of the variable-creation entry point: a series of handles on the
/// index/series path, a new frame with one appended column on the frame path.
#[derive(Debug, Clone, PartialEq)]
pub enum VarResult {
    Series(Series),
    Frame(Frame),
}

impl VarResult {
    pub fn into_series(self) -> Option<Series> {
        match self {
            VarResult::Series(series) => Some(series),
            VarResult::Frame(_) => None,
        }
    }

    pub fn into_frame(self) -> Option<Frame> {
        match self {
            VarResult::Frame(frame) => Some(frame),
            VarResult::Series(_) => None,
        }
    }
}

/// Add one variable per entry of the given index, series, or frame.
pub fn add_variables<M: ModelSink>(
    sink: &mut M,
    target: &VarTarget,
    spec: &VarSpec,
) -> Result<VarResult, BridgeError> {
    match target {
        VarTarget::Index(index) => {
            add_variables_from_index(sink, index, spec).map(VarResult::Series)
        }
        VarTarget::Series(series) => {
            add_variables_from_index(sink, series.index(), spec).map(VarResult::Series)
        }
        VarTarget::Frame(frame) => add_variables_from_frame(sink, frame, spec).map(VarResult::Frame),
    }
}

/// Add one variable per index entry. Attribute specs must be constants or
/// aligned series. Unnamed variables are permitted on this path.
pub fn add_variables_from_index<M: ModelSink>(
    sink: &mut M,
    index: &Index,
    spec: &VarSpec,
) -> Result<Series, BridgeError> {
    create_variable_series(sink, index, index, None, spec)
}

/// Add one variable per frame row, returning a new frame with the handle
/// column appended under the spec's name. The name is required here.
pub fn add_variables_from_frame<M: ModelSink>(
    sink: &mut M,
    frame: &Frame,
    spec: &VarSpec,
) -> Result<Frame, BridgeError> {
    let name = spec.name.as_deref().ok_or(BridgeError::MissingName)?;
    if frame.has_column(name) {
        return Err(BridgeError::ColumnCollision {
            name: name.to_string(),
        });
    }
    let label_index = label_index_for_frame(frame, spec.label_columns.as_deref())?;
    let series = create_variable_series(sink, frame.index(), &label_index, Some(frame), spec)?;
    let frame = frame
        .clone()
        .with_column(name, series.values().to_vec())?;
    Ok(frame)
}

fn create_variable_series<M: ModelSink>(
    sink: &mut M,
    target: &Index,
    label_index: &Index,
    frame: Option<&Frame>,
    spec: &VarSpec,
) -> Result<Series, BridgeError> {
    let started = Instant::now();

    let lb = spec.lb.resolve_f64("lb", target, frame)?;
    let ub = spec.ub.resolve_f64("ub", target, frame)?;
    let obj = spec.obj.resolve_f64("obj", target, frame)?;
    let vtype = spec.vtype.resolve_vtype("vtype", target, frame)?;
    let names = entity_labels(label_index, spec.name.as_deref());

    let batch = VariableBatch {
        lb,
        ub,
        obj,
        vtype,
        names,
    };
    let handles = sink.create_variables(&batch)?;

    tracing::debug!(
        component = "builder",
        operation = "add_variables",
        status = "success",
        variables = handles.len(),
        named = spec.name.is_some(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Created variable batch"
    );

    let mut series = Series::new(target.clone(), handles.into_iter().map(Value::Var))?;
    if let Some(name) = &spec.name {
        series = series.with_name(name.clone());
    }
    Ok(series)
}

fn label_index_for_frame(
    frame: &Frame,
    label_columns: Option<&[String]>,
) -> Result<Index, BridgeError> {
    let Some(columns) = label_columns else {
        return Ok(frame.index().clone());
    };
    let mut column_keys: Vec<Vec<Key>> = Vec::with_capacity(columns.len());
    for name in columns {
        let values = frame
            .column_values(name)
            .ok_or_else(|| BridgeError::UnknownColumn { name: name.clone() })?;
        let keys = values
            .iter()
            .map(label_key)
            .collect::<Result<Vec<Key>, BridgeError>>()?;
        column_keys.push(keys);
    }
    if column_keys.len() == 1 {
        return Ok(column_keys.remove(0).into_iter().collect());
    }
    let keys = (0..frame.len()).map(|row| {
        Key::Composite(
            column_keys
                .iter()
                .map(|column| column[row].clone())
                .collect(),
        )
    });
    Ok(keys.collect())
}

fn label_key(value: &Value) -> Result<Key, BridgeError> {
    match value {
        Value::Int(v) => Ok(Key::Int(*v)),
        Value::Float(v) => Ok(Key::Float(*v)),
        Value::Str(v) => Ok(Key::Str(v.clone())),
        Value::Var(_) | Value::Constr(_) => Err(BridgeError::WrongType {
            attribute: "label_columns",
            expected: "scalar",
        }),
    }
}

/// One side of a constraint row: a broadcast scalar or an aligned series.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Series(Series),
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Series> for Operand {
    fn from(series: Series) -> Self {
        Operand::Series(series)
    }
}

/// Constraint sense: one symbol for every row, or one per row.
#[derive(Debug, Clone, PartialEq)]
pub enum SenseSpec {
    Uniform(ConstrSense),
    PerRow(Series),
}

impl From<ConstrSense> for SenseSpec {
    fn from(sense: ConstrSense) -> Self {
        SenseSpec::Uniform(sense)
    }
}

/// Add one constraint per row of the series operands.
///
/// The target index comes from the first series among lhs, rhs, and sense;
/// every other series operand must align with it. At least one operand must
/// be a series, otherwise there is nothing to index the batch by.
pub fn add_constraints<M: ModelSink>(
    sink: &mut M,
    lhs: &Operand,
    sense: &SenseSpec,
    rhs: &Operand,
    name: Option<&str>,
) -> Result<Series, BridgeError> {
    let started = Instant::now();

    let target = constraint_index(lhs, sense, rhs)?;
    let lhs_values = resolve_operand("lhs", lhs, &target)?;
    let rhs_values = resolve_operand("rhs", rhs, &target)?;
    let senses = match sense {
        SenseSpec::Uniform(sense) => vec![*sense; target.len()],
        SenseSpec::PerRow(series) => {
            AttrSpec::aligned(series.clone()).resolve_sense("sense", &target, None)?
        }
    };
    let names = entity_labels(&target, name);

    let batch = ConstraintBatch {
        lhs: lhs_values,
        sense: senses,
        rhs: rhs_values,
        names,
    };
    let handles = sink.create_constraints(&batch)?;

    tracing::debug!(
        component = "builder",
        operation = "add_constraints",
        status = "success",
        constraints = handles.len(),
        named = name.is_some(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Created constraint batch"
    );

    let mut series = Series::new(target, handles.into_iter().map(Value::Constr))?;
    if let Some(name) = name {
        series = series.with_name(name);
    }
    Ok(series)
}

fn constraint_index(
    lhs: &Operand,
    sense: &SenseSpec,
    rhs: &Operand,
) -> Result<Index, BridgeError> {
    if let Operand::Series(series) = lhs {
        return Ok(series.index().clone());
    }
    if let Operand::Series(series) = rhs {
        return Ok(series.index().clone());
    }
    if let SenseSpec::PerRow(series) = sense {
        return Ok(series.index().clone());
    }
    Err(BridgeError::NoIndexSource)
}

fn resolve_operand(
    attribute: &'static str,
    operand: &Operand,
    target: &Index,
) -> Result<Vec<f64>, BridgeError> {
    match operand {
        Operand::Scalar(value) => Ok(vec![*value; target.len()]),
        Operand::Series(series) => {
            AttrSpec::aligned(series.clone()).resolve_f64(attribute, target, None)
        }
    }
}
