//! Attribute reads and writes over series of entity handles.
//!
//! Reads and writes translate element-wise to per-handle attribute calls on
//! the model sink, in index order. No batching or atomicity is guaranteed:
//! a write failing partway through leaves earlier handles already mutated.

use tablo_data::{Series, Value};

use crate::attr::AttrSpec;
use crate::error::BridgeError;
use crate::sink::{ConstrAttr, ModelSink, VarAttr};

/// Read one variable attribute off every handle in the series.
///
/// The result is aligned with the handle series and carries its name.
pub fn read_var_attr<M: ModelSink>(
    sink: &M,
    handles: &Series,
    attr: VarAttr,
) -> Result<Series, BridgeError> {
    let mut values = Vec::with_capacity(handles.len());
    for value in handles.values() {
        let handle = value.as_var().ok_or(BridgeError::WrongType {
            attribute: attr.as_str(),
            expected: "variable handle",
        })?;
        values.push(sink.read_var_attr(handle, attr)?);
    }
    named_like(handles, Series::new(handles.index().clone(), values)?)
}

/// Write one variable attribute on every handle in the series.
///
/// `spec` is a constant broadcast or an aligned series; column references
/// are not applicable here.
pub fn write_var_attr<M: ModelSink>(
    sink: &mut M,
    handles: &Series,
    attr: VarAttr,
    spec: &AttrSpec,
) -> Result<(), BridgeError> {
    let values = spec.resolve(attr.as_str(), handles.index(), None)?;
    for (value, cell) in values.into_iter().zip(handles.values()) {
        let handle = cell.as_var().ok_or(BridgeError::WrongType {
            attribute: attr.as_str(),
            expected: "variable handle",
        })?;
        sink.write_var_attr(handle, attr, value)?;
    }
    Ok(())
}

/// Read one constraint attribute off every handle in the series.
pub fn read_constr_attr<M: ModelSink>(
    sink: &M,
    handles: &Series,
    attr: ConstrAttr,
) -> Result<Series, BridgeError> {
    let mut values = Vec::with_capacity(handles.len());
    for value in handles.values() {
        let handle = value.as_constr().ok_or(BridgeError::WrongType {
            attribute: attr.as_str(),
            expected: "constraint handle",
        })?;
        values.push(sink.read_constr_attr(handle, attr)?);
    }
    named_like(handles, Series::new(handles.index().clone(), values)?)
}

/// Write one constraint attribute on every handle in the series.
pub fn write_constr_attr<M: ModelSink>(
    sink: &mut M,
    handles: &Series,
    attr: ConstrAttr,
    spec: &AttrSpec,
) -> Result<(), BridgeError> {
    let values = spec.resolve(attr.as_str(), handles.index(), None)?;
    for (value, cell) in values.into_iter().zip(handles.values()) {
        let handle = cell.as_constr().ok_or(BridgeError::WrongType {
            attribute: attr.as_str(),
            expected: "constraint handle",
        })?;
        sink.write_constr_attr(handle, attr, value)?;
    }
    Ok(())
}

fn named_like(handles: &Series, series: Series) -> Result<Series, BridgeError> {
    match handles.name() {
        Some(name) => Ok(series.with_name(name)),
        None => Ok(series),
    }
}
