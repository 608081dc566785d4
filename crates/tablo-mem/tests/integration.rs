#![allow(clippy::float_cmp)]

use tablo_core::{
    add_constraints, add_variables, add_variables_from_frame, add_variables_from_index,
    read_constr_attr, read_var_attr, write_var_attr, AttrSpec, BridgeError, ConstrAttr,
    ConstrSense, ModelSink, SinkError, VarAttr, VarSpec, VarTarget, VarType,
};
use tablo_data::{Frame, Index, Key, Series, Value};
use tablo_mem::MemModel;

fn sample_frame() -> Frame {
    Frame::new(Index::new([0i64, 2, 3]))
        .with_column("a", vec![1i64, 3, 5])
        .unwrap()
        .with_column("b", vec![2i64, 4, 6])
        .unwrap()
}

fn float_series(series: &Series) -> Vec<f64> {
    series
        .values()
        .iter()
        .map(|v| v.as_f64().expect("numeric value"))
        .collect()
}

/// End-to-end: frame columns drive bounds, readable after commit.
#[test]
fn test_frame_bounds_round_trip() {
    let mut model = MemModel::new();
    let frame = sample_frame();
    let spec = VarSpec::named("x")
        .with_lb(AttrSpec::column("a"))
        .with_ub(AttrSpec::column("b"));
    let result = add_variables_from_frame(&mut model, &frame, &spec).unwrap();

    assert_eq!(result.column_names(), vec!["a", "b", "x"]);
    assert_eq!(result.index(), frame.index());

    model.commit();

    let handles = result.column("x").unwrap();
    let lb = read_var_attr(&model, &handles, VarAttr::LowerBound).unwrap();
    let ub = read_var_attr(&model, &handles, VarAttr::UpperBound).unwrap();
    assert_eq!(lb.index(), &Index::new([0i64, 2, 3]));
    assert_eq!(float_series(&lb), vec![1.0, 3.0, 5.0]);
    assert_eq!(float_series(&ub), vec![2.0, 4.0, 6.0]);
}

/// Variables created through a frame are named from the frame index.
#[test]
fn test_frame_variables_named_from_index() {
    let mut model = MemModel::new();
    let frame = sample_frame();
    let result = add_variables_from_frame(&mut model, &frame, &VarSpec::named("x")).unwrap();
    model.commit();

    let handles = result.column("x").unwrap();
    for (key, value) in handles.iter() {
        let handle = value.as_var().unwrap();
        assert_eq!(
            model.variable_name(handle),
            Some(format!("x[{key}]").as_str())
        );
    }
}

/// Label columns override the naming index (single and composite).
#[test]
fn test_frame_label_columns() {
    let mut model = MemModel::new();
    let frame = sample_frame();

    let spec = VarSpec::named("y").with_label_columns(["a"]);
    let result = add_variables_from_frame(&mut model, &frame, &spec).unwrap();
    let first = result.column("y").unwrap().get(0).unwrap().as_var().unwrap();
    assert_eq!(model.variable_name(first), Some("y[1]"));

    let spec = VarSpec::named("z").with_label_columns(["b", "a"]);
    let result = add_variables_from_frame(&mut model, &frame, &spec).unwrap();
    let first = result.column("z").unwrap().get(0).unwrap().as_var().unwrap();
    assert_eq!(model.variable_name(first), Some("z[2,1]"));
}

/// Multi-level index keys render as comma-joined label components.
#[test]
fn test_composite_index_naming() {
    let mut model = MemModel::new();
    let index = Index::new([
        Key::composite([Key::Int(0), Key::from("a")]),
        Key::composite([Key::Int(1), Key::from("b")]),
    ]);
    let series = add_variables_from_index(&mut model, &index, &VarSpec::named("z")).unwrap();
    let handle = series.get(1).unwrap().as_var().unwrap();
    assert_eq!(model.variable_name(handle), Some("z[1,b]"));
}

/// The dispatching entry point on a frame without a name is a config error.
#[test]
fn test_frame_without_name_is_config_error() {
    let mut model = MemModel::new();
    let result = add_variables(
        &mut model,
        &VarTarget::Frame(sample_frame()),
        &VarSpec::new(),
    );
    assert_eq!(
        result.err().map(|e| e.code()),
        Some("CONFIG_MISSING_NAME")
    );
    assert_eq!(model.num_variables(), 0);
}

/// Attributes of just-created variables are unreadable until commit.
#[test]
fn test_commit_required_before_reads() {
    let mut model = MemModel::new();
    let series =
        add_variables_from_index(&mut model, &Index::range(2), &VarSpec::named("x")).unwrap();

    let result = read_var_attr(&model, &series, VarAttr::LowerBound);
    assert_eq!(result, Err(BridgeError::Sink(SinkError::PendingUpdate)));

    model.commit();
    let lb = read_var_attr(&model, &series, VarAttr::LowerBound).unwrap();
    assert_eq!(float_series(&lb), vec![0.0, 0.0]);
}

/// lb = ub = value pins the naive solution, so post-solve reads recover it.
#[test]
fn test_solution_value_round_trip() {
    let mut model = MemModel::new();
    let frame = Frame::new(Index::new(["a", "b", "c"]))
        .with_column("value", vec![1.0, 2.0, 3.0])
        .unwrap();
    let spec = VarSpec::named("x")
        .with_lb(AttrSpec::column("value"))
        .with_ub(AttrSpec::column("value"));
    let result = add_variables_from_frame(&mut model, &frame, &spec).unwrap();

    model.optimize();

    let handles = result.column("x").unwrap();
    let solution = read_var_attr(&model, &handles, VarAttr::Value).unwrap();
    assert_eq!(solution.name(), Some("x"));
    assert_eq!(float_series(&solution), vec![1.0, 2.0, 3.0]);
    assert_eq!(solution.index(), frame.index());
}

/// Constraint creation names handles from the shared operand index.
#[test]
fn test_constraint_creation_and_naming() {
    let mut model = MemModel::new();
    let index = Index::new([0i64, 1]);
    let lhs = Series::new(index.clone(), vec![1.0, 2.0]).unwrap();
    let rhs = Series::new(index.clone(), vec![3.0, 4.0]).unwrap();

    let series = add_constraints(
        &mut model,
        &lhs.into(),
        &ConstrSense::LessEqual.into(),
        &rhs.into(),
        Some("c"),
    )
    .unwrap();

    assert_eq!(series.len(), 2);
    let first = series.get(0).unwrap().as_constr().unwrap();
    let second = series.get(1).unwrap().as_constr().unwrap();
    assert_eq!(model.constraint_name(first), Some("c[0]"));
    assert_eq!(model.constraint_name(second), Some("c[1]"));

    model.commit();
    let rhs_read = read_constr_attr(&model, &series, ConstrAttr::Rhs).unwrap();
    assert_eq!(float_series(&rhs_read), vec![3.0, 4.0]);
    let sense = read_constr_attr(&model, &series, ConstrAttr::Sense).unwrap();
    assert_eq!(sense.get(0), Some(&Value::from("<=")));
}

/// Duplicate index keys plus naming surface as a sink error, not a bridge check.
#[test]
fn test_duplicate_keys_surface_as_sink_error() {
    let mut model = MemModel::new();
    let index = Index::new([1i64, 1]);
    let result = add_variables_from_index(&mut model, &index, &VarSpec::named("x"));
    assert_eq!(
        result,
        Err(BridgeError::Sink(SinkError::NameCollision {
            name: "x[1]".to_string()
        }))
    );
    assert_eq!(model.num_variables(), 0);
}

/// Unnamed duplicate keys are permitted; only naming makes them collide.
#[test]
fn test_duplicate_keys_without_names_are_permitted() {
    let mut model = MemModel::new();
    let index = Index::new([1i64, 1]);
    let series = add_variables_from_index(&mut model, &index, &VarSpec::new()).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(model.num_variables(), 2);
}

/// The bridge does not pre-check lb <= ub; the sink rejects the batch.
#[test]
fn test_bound_ordering_delegated_to_sink() {
    let mut model = MemModel::new();
    let spec = VarSpec::new().with_lb(5.0).with_ub(1.0);
    let result = add_variables_from_index(&mut model, &Index::range(1), &spec);
    assert_eq!(
        result,
        Err(BridgeError::Sink(SinkError::InvalidBounds {
            lower: 5.0,
            upper: 1.0
        }))
    );
}

/// Name validation stays fast as the model grows: a second large named
/// batch must not rescan every existing name per candidate.
#[test]
fn test_large_named_batches_validate_quickly() {
    let mut model = MemModel::new();
    let n = 30_000;
    add_variables_from_index(&mut model, &Index::range(n), &VarSpec::named("x")).unwrap();

    let lhs = Series::new(Index::range(n), vec![1.0; n]).unwrap();
    let started = std::time::Instant::now();
    add_constraints(
        &mut model,
        &lhs.into(),
        &ConstrSense::LessEqual.into(),
        &0.0.into(),
        Some("c"),
    )
    .unwrap();
    assert!(
        started.elapsed().as_secs_f64() < 1.0,
        "constraint batch took {:.3}s",
        started.elapsed().as_secs_f64()
    );

    // Collisions are still detected against the full registry.
    let result = add_variables_from_index(&mut model, &Index::range(1), &VarSpec::named("x"));
    assert_eq!(
        result,
        Err(BridgeError::Sink(SinkError::NameCollision {
            name: "x[0]".to_string()
        }))
    );
}

/// Writes through the accessor layer are visible to subsequent reads.
#[test]
fn test_accessor_write_then_read() {
    let mut model = MemModel::new();
    let series =
        add_variables_from_index(&mut model, &Index::range(3), &VarSpec::named("x")).unwrap();
    model.commit();

    write_var_attr(&mut model, &series, VarAttr::Obj, &AttrSpec::constant(2.5)).unwrap();
    let obj = read_var_attr(&model, &series, VarAttr::Obj).unwrap();
    assert_eq!(float_series(&obj), vec![2.5; 3]);

    let bounds = Series::new(Index::range(3), vec![1.0, 2.0, 3.0]).unwrap();
    write_var_attr(
        &mut model,
        &series,
        VarAttr::UpperBound,
        &AttrSpec::aligned(bounds),
    )
    .unwrap();
    let ub = read_var_attr(&model, &series, VarAttr::UpperBound).unwrap();
    assert_eq!(float_series(&ub), vec![1.0, 2.0, 3.0]);
}

/// Integer vtype flows through creation and reads back as text.
#[test]
fn test_vtype_round_trip() {
    let mut model = MemModel::new();
    let spec = VarSpec::named("n")
        .with_vtype(VarType::Integer)
        .with_lb(-10.0)
        .with_ub(10.0);
    let series = add_variables_from_index(&mut model, &Index::range(2), &spec).unwrap();
    model.commit();
    let vtype = read_var_attr(&model, &series, VarAttr::VType).unwrap();
    assert_eq!(vtype.get(0), Some(&Value::from("integer")));
}

/// A snapshot after the full pipeline reflects names, bounds, and values.
#[test]
fn test_snapshot_after_pipeline() {
    let mut model = MemModel::new();
    let frame = sample_frame();
    let spec = VarSpec::named("x").with_lb(AttrSpec::column("a"));
    add_variables_from_frame(&mut model, &frame, &spec).unwrap();
    model.optimize();

    let snapshot = model.snapshot();
    assert_eq!(snapshot.metadata.variables, 3);
    assert_eq!(snapshot.metadata.pending, 0);
    assert!(snapshot.metadata.solved);
    assert_eq!(snapshot.variables[0].name.as_deref(), Some("x[0]"));
    assert_eq!(snapshot.variables[0].lb, 1.0);
    assert_eq!(snapshot.variables[0].value, Some(1.0));
}
