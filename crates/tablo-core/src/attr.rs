//! Attribute specifications and their resolution against a target index.

use tablo_data::{Frame, Index, Series, Value};

use crate::error::BridgeError;
use crate::sink::{ConstrSense, VarType};

/// How one per-entity attribute is supplied to a creation call.
///
/// `Column` is only legal when the target is a frame; `Aligned` only on the
/// index/series path. `Constant` broadcasts on either path.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrSpec {
    Constant(Value),
    Column(String),
    Aligned(Series),
}

impl AttrSpec {
    pub fn constant(value: impl Into<Value>) -> Self {
        AttrSpec::Constant(value.into())
    }

    pub fn column(name: impl Into<String>) -> Self {
        AttrSpec::Column(name.into())
    }

    pub fn aligned(series: Series) -> Self {
        AttrSpec::Aligned(series)
    }

    /// Materialize the spec against `target`, one value per index entry.
    ///
    /// `frame` is the column-reference source on the frame path and must be
    /// `None` on the index/series path.
    pub fn resolve(
        &self,
        attribute: &'static str,
        target: &Index,
        frame: Option<&Frame>,
    ) -> Result<Vec<Value>, BridgeError> {
        match self {
            AttrSpec::Constant(value) => Ok(vec![value.clone(); target.len()]),
            AttrSpec::Column(name) => {
                let frame = frame.ok_or(BridgeError::SpecNotApplicable {
                    attribute,
                    reason: "column references require a frame input",
                })?;
                let values =
                    frame
                        .column_values(name)
                        .ok_or_else(|| BridgeError::UnknownColumn {
                            name: name.clone(),
                        })?;
                Ok(values.to_vec())
            }
            AttrSpec::Aligned(series) => {
                if frame.is_some() {
                    return Err(BridgeError::SpecNotApplicable {
                        attribute,
                        reason: "aligned series are only accepted on the index/series path",
                    });
                }
                if !series.aligns_with(target) {
                    return Err(BridgeError::misaligned(attribute, target, series.index()));
                }
                Ok(series.values().to_vec())
            }
        }
    }

    /// Resolve to numeric values; integers widen to f64.
    pub fn resolve_f64(
        &self,
        attribute: &'static str,
        target: &Index,
        frame: Option<&Frame>,
    ) -> Result<Vec<f64>, BridgeError> {
        self.resolve(attribute, target, frame)?
            .iter()
            .map(|value| {
                value.as_f64().ok_or(BridgeError::WrongType {
                    attribute,
                    expected: "numeric",
                })
            })
            .collect()
    }

    /// Resolve to variable types, parsing textual forms.
    pub fn resolve_vtype(
        &self,
        attribute: &'static str,
        target: &Index,
        frame: Option<&Frame>,
    ) -> Result<Vec<VarType>, BridgeError> {
        self.resolve(attribute, target, frame)?
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .and_then(VarType::parse)
                    .ok_or(BridgeError::WrongType {
                        attribute,
                        expected: "variable type",
                    })
            })
            .collect()
    }

    /// Resolve to constraint senses, parsing symbol forms.
    pub fn resolve_sense(
        &self,
        attribute: &'static str,
        target: &Index,
        frame: Option<&Frame>,
    ) -> Result<Vec<ConstrSense>, BridgeError> {
        self.resolve(attribute, target, frame)?
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .and_then(ConstrSense::parse)
                    .ok_or(BridgeError::WrongType {
                        attribute,
                        expected: "constraint sense",
                    })
            })
            .collect()
    }
}

impl From<f64> for AttrSpec {
    fn from(value: f64) -> Self {
        AttrSpec::Constant(Value::Float(value))
    }
}

impl From<VarType> for Value {
    fn from(vtype: VarType) -> Self {
        Value::Str(vtype.as_str().to_string())
    }
}

impl From<ConstrSense> for Value {
    fn from(sense: ConstrSense) -> Self {
        Value::Str(sense.symbol().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::KeyMismatch;
    use tablo_data::DataError;

    fn sample_frame() -> Frame {
        Frame::new(Index::new([0i64, 2, 3]))
            .with_column("a", vec![1i64, 3, 5])
            .unwrap()
            .with_column("b", vec![2i64, 4, 6])
            .unwrap()
    }

    #[test]
    fn test_constant_broadcasts_over_any_length() {
        for n in [0usize, 1, 7] {
            let target = Index::range(n);
            let values = AttrSpec::constant(5.0).resolve("lb", &target, None).unwrap();
            assert_eq!(values, vec![Value::Float(5.0); n]);
        }
    }

    #[test]
    fn test_column_reference_returns_frame_column_unchanged() {
        let frame = sample_frame();
        let values = AttrSpec::column("a")
            .resolve("lb", frame.index(), Some(&frame))
            .unwrap();
        assert_eq!(values, frame.column_values("a").unwrap().to_vec());
    }

    #[test]
    fn test_column_reference_without_frame_is_config_error() {
        let result = AttrSpec::column("a").resolve("lb", &Index::range(2), None);
        assert!(matches!(
            result,
            Err(BridgeError::SpecNotApplicable { attribute: "lb", .. })
        ));
    }

    #[test]
    fn test_unknown_column() {
        let frame = sample_frame();
        let result = AttrSpec::column("missing").resolve("ub", frame.index(), Some(&frame));
        assert_eq!(
            result,
            Err(BridgeError::UnknownColumn {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_aligned_series_succeeds_iff_index_equal() {
        let target = Index::new([0i64, 2, 3]);
        let series = Series::new(target.clone(), vec![1.0, 2.0, 3.0]).unwrap();
        let values = AttrSpec::aligned(series.clone())
            .resolve("lb", &target, None)
            .unwrap();
        assert_eq!(values.len(), 3);

        // Same keys as a set, different order: must fail and point at the
        // first differing position.
        let permuted = Index::new([2i64, 0, 3]);
        let result = AttrSpec::aligned(series).resolve("lb", &permuted, None);
        assert_eq!(
            result,
            Err(BridgeError::Misaligned {
                attribute: "lb",
                expected_len: 3,
                got_len: 3,
                mismatch: Some(KeyMismatch {
                    position: 0,
                    expected: "2".to_string(),
                    got: "0".to_string()
                })
            })
        );
    }

    #[test]
    fn test_aligned_series_on_frame_path_is_config_error() {
        let frame = sample_frame();
        let series = Series::new(frame.index().clone(), vec![1.0, 2.0, 3.0]).unwrap();
        let result = AttrSpec::aligned(series).resolve("lb", frame.index(), Some(&frame));
        assert!(matches!(result, Err(BridgeError::SpecNotApplicable { .. })));
    }

    #[test]
    fn test_resolve_f64_rejects_strings() {
        let target = Index::range(2);
        let result = AttrSpec::constant("oops").resolve_f64("obj", &target, None);
        assert_eq!(
            result,
            Err(BridgeError::WrongType {
                attribute: "obj",
                expected: "numeric"
            })
        );
    }

    #[test]
    fn test_resolve_f64_widens_integer_columns() {
        let frame = sample_frame();
        let values = AttrSpec::column("a")
            .resolve_f64("lb", frame.index(), Some(&frame))
            .unwrap();
        assert_eq!(values, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_resolve_vtype() {
        let target = Index::range(2);
        let values = AttrSpec::Constant(VarType::Integer.into())
            .resolve_vtype("vtype", &target, None)
            .unwrap();
        assert_eq!(values, vec![VarType::Integer; 2]);

        let result = AttrSpec::constant(1.0).resolve_vtype("vtype", &target, None);
        assert!(matches!(result, Err(BridgeError::WrongType { .. })));
    }

    #[test]
    fn test_resolve_sense() {
        let target = Index::range(1);
        let values = AttrSpec::constant("<=")
            .resolve_sense("sense", &target, None)
            .unwrap();
        assert_eq!(values, vec![ConstrSense::LessEqual]);
    }

    #[test]
    fn test_data_error_converts() {
        let err: BridgeError = DataError::UnknownColumn {
            name: "a".to_string(),
        }
        .into();
        assert_eq!(err.code(), "DATA_UNKNOWN_COLUMN");
    }
}
