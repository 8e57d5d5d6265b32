mod common;

use std::sync::Arc;

use common::{Fixture, TABLE_MDID};
use rust_opt_xforms::error::{OptError, OptResult};
use rust_opt_xforms::expression::{AllocScope, ExprRef, Expression};
use rust_opt_xforms::metadata::{ColumnRef, MdId, TableDescriptor};
use rust_opt_xforms::operator::{
    Datum, Dml, DmlKind, LogicalOperator, NullTest, Operator, OperatorKind, RowTrigger,
    ScalarOperator, Update,
};
use rust_opt_xforms::optimizer::{
    DefaultDmlBuilders, DmlBuilders, OptimizerConfig, OptimizerContext, StaticTriggers,
};
use rust_opt_xforms::properties::DistributionPolicy;
use rust_opt_xforms::rules::{apply_rule, InPlaceUpdateToDmlRule, UpdateToDmlRule};

fn dml_of(expr: &ExprRef) -> &Dml {
    expr.operator()
        .as_logical()
        .and_then(|op| op.as_dml())
        .expect("dml")
}

fn hashed_on_a() -> DistributionPolicy {
    DistributionPolicy::Hashed(vec![0])
}

fn lower_update(
    f: &Fixture,
    ctx: &OptimizerContext,
    changed: Option<usize>,
) -> (ExprRef, ExprRef) {
    let expr = f.update(changed);
    let result = apply_rule(&UpdateToDmlRule::new(), ctx, &expr).unwrap();
    assert_eq!(result.len(), 1);
    let alternative = result.alternatives()[0].clone();
    (expr, alternative)
}

/// The constant projected as the table oid column.
fn projected_oid(project: &ExprRef) -> (ColumnRef, Datum) {
    assert_eq!(project.kind(), OperatorKind::Project);
    let element = project.child(1).child(0);
    let column = element
        .operator()
        .as_scalar()
        .and_then(|op| op.as_project_element())
        .expect("project element")
        .clone();
    let value = element
        .child(0)
        .operator()
        .as_scalar()
        .and_then(|op| op.as_const())
        .expect("const")
        .clone();
    (column, value)
}

#[test]
fn test_unchanged_columns_update_in_place() {
    let f = Fixture::new(hashed_on_a(), false, vec![]);
    let (expr, alternative) = lower_update(&f, &f.context(), None);

    let dml = dml_of(&alternative);
    assert_eq!(dml.kind, DmlKind::Update);
    assert!(dml.modified.is_clear());
    assert_eq!(dml.source_columns, f.columns);
    assert!(!alternative.contains_kind(OperatorKind::Split));

    let project = alternative.child(0);
    let (oid_column, oid_value) = projected_oid(project);
    assert_eq!(dml.table_oid, Some(oid_column));
    assert_eq!(oid_value, Datum::Oid(TABLE_MDID.oid()));
    assert!(Arc::ptr_eq(project.child(0), expr.child(0)));
}

#[test]
fn test_non_key_change_needs_no_split() {
    let f = Fixture::new(hashed_on_a(), false, vec![]);
    let (expr, alternative) = lower_update(&f, &f.context(), Some(1));

    let dml = dml_of(&alternative);
    assert_eq!(dml.modified.ones().collect::<Vec<_>>(), vec![1]);
    assert_eq!(dml.modified.len(), f.table.column_count());
    assert!(!alternative.contains_kind(OperatorKind::Split));

    let update = expr.operator().as_logical().unwrap().as_update().unwrap();
    assert_eq!(dml.source_columns, update.insert_columns);
    assert_eq!(dml.row_id, update.row_id);
}

#[test]
fn test_distribution_key_change_splits() {
    let f = Fixture::new(hashed_on_a(), false, vec![]);
    let (expr, alternative) = lower_update(&f, &f.context(), Some(0));
    let update = expr.operator().as_logical().unwrap().as_update().unwrap();

    let dml = dml_of(&alternative);
    assert_eq!(dml.modified.ones().collect::<Vec<_>>(), vec![0]);
    assert_eq!(dml.source_columns, update.delete_columns);
    assert_eq!(alternative.count_kind(OperatorKind::Split), 1);

    // Dml(Project(Split(Project, action list), table oid))
    let project = alternative.child(0);
    let (oid_column, _) = projected_oid(project);
    assert_eq!(dml.table_oid, Some(oid_column));

    let split_expr = project.child(0);
    let split = split_expr
        .operator()
        .as_logical()
        .and_then(|op| op.as_split())
        .unwrap();
    assert_eq!(split.action, dml.action);
    assert_eq!(split.delete_columns, update.delete_columns);
    assert_eq!(split.insert_columns, update.insert_columns);
    assert!(Arc::ptr_eq(split_expr.child(0), expr.child(0)));

    let action_element = split_expr.child(1).child(0);
    assert_eq!(
        action_element.operator(),
        &Operator::Scalar(ScalarOperator::ProjectElement(dml.action.clone()))
    );
    assert_eq!(action_element.child(0).kind(), OperatorKind::ScalarDmlAction);
}

#[test]
fn test_partitioned_split_selects_partition() {
    let f = Fixture::new(hashed_on_a(), true, vec![]);
    let (_, alternative) = lower_update(&f, &f.context(), Some(0));

    let dml = dml_of(&alternative);
    let selector_expr = alternative.child(0);
    let selector = selector_expr
        .operator()
        .as_logical()
        .and_then(|op| op.as_partition_selector())
        .expect("partition selector");
    assert_eq!(selector.relation(), TABLE_MDID);
    assert_eq!(dml.table_oid.as_ref(), Some(selector.oid_column()));
    assert_eq!(selector_expr.child(0).kind(), OperatorKind::Split);
    assert_eq!(alternative.count_kind(OperatorKind::Split), 1);
}

#[test]
fn test_enforced_constraints_assert_below_partition_selector() {
    let f = Fixture::new(hashed_on_a(), true, vec![]);
    let ctx = f.context_with(OptimizerConfig::default().with_enforce_constraints_on_dml(true));
    let (expr, alternative) = lower_update(&f, &ctx, Some(0));
    let update = expr.operator().as_logical().unwrap().as_update().unwrap();

    // Dml(PartitionSelector(Assert(Split, constraints)))
    let selector = alternative.child(0);
    assert_eq!(selector.kind(), OperatorKind::PartitionSelector);
    let assert = selector.child(0);
    assert_eq!(assert.kind(), OperatorKind::Assert);
    assert_eq!(assert.child(0).kind(), OperatorKind::Split);

    // Only column a is NOT NULL.
    let constraints = assert.child(1);
    assert_eq!(constraints.arity(), 1);
    let not_null = constraints.child(0).child(0);
    assert_eq!(
        not_null.operator(),
        &Operator::Scalar(ScalarOperator::NullTest(NullTest::new(false)))
    );
    assert_eq!(
        not_null.child(0).operator(),
        &Operator::Scalar(ScalarOperator::Ident(update.insert_columns[0].clone()))
    );
}

#[test]
fn test_enforced_constraints_without_split() {
    let f = Fixture::new(hashed_on_a(), false, vec![]);
    let ctx = f.context_with(OptimizerConfig::default().with_enforce_constraints_on_dml(true));
    let (_, alternative) = lower_update(&f, &ctx, Some(2));

    assert!(!alternative.contains_kind(OperatorKind::Assert));
    assert!(!alternative.contains_kind(OperatorKind::Split));
}

#[test]
fn test_before_triggers_wrap_input() {
    let f = Fixture::new(DistributionPolicy::Random, false, vec![]);
    let ctx = f
        .context()
        .with_triggers(Arc::new(StaticTriggers::new().with_before(TABLE_MDID, DmlKind::Update)));
    let (expr, alternative) = lower_update(&f, &ctx, Some(1));

    // Dml(Project(RowTrigger(Project), table oid))
    let trigger_expr = alternative.child(0).child(0);
    let trigger = trigger_expr
        .operator()
        .as_logical()
        .and_then(|op| op.as_row_trigger())
        .expect("row trigger");
    assert!(trigger.before);
    assert_eq!(trigger.kind, DmlKind::Update);
    assert_eq!(trigger.relation, TABLE_MDID);
    assert!(Arc::ptr_eq(trigger_expr.child(0), expr.child(0)));
}

#[test]
fn test_triggers_for_other_kinds_ignored() {
    let f = Fixture::new(DistributionPolicy::Random, false, vec![]);
    let ctx = f.context().with_triggers(Arc::new(
        StaticTriggers::new()
            .with_before(TABLE_MDID, DmlKind::Delete)
            .with_before(MdId(TABLE_MDID.0 + 1), DmlKind::Update),
    ));
    let (_, alternative) = lower_update(&f, &ctx, Some(1));

    assert!(!alternative.contains_kind(OperatorKind::RowTrigger));
}

#[test]
fn test_update_child_must_be_project() {
    let f = Fixture::new(DistributionPolicy::Random, false, vec![]);
    let update = Update {
        table: f.table.clone(),
        delete_columns: f.columns.clone(),
        insert_columns: f.columns.clone(),
        row_id: f.row_id(),
        tuple_oid: None,
    };
    let expr = f.scan().update(update).build();

    let err = apply_rule(&UpdateToDmlRule::new(), &f.context(), &expr).unwrap_err();
    assert_eq!(
        err.downcast_ref::<OptError>(),
        Some(&OptError::UnexpectedOperator {
            expected: OperatorKind::Project,
            found: OperatorKind::Get,
        })
    );
}

#[test]
fn test_column_images_must_pair_up() {
    let f = Fixture::new(DistributionPolicy::Random, false, vec![]);
    let expr = f.update(None);
    let update = expr.operator().as_logical().unwrap().as_update().unwrap();
    let truncated = Update {
        insert_columns: Arc::new(update.insert_columns[..2].to_vec()),
        ..update.clone()
    };
    let expr = Arc::new(Expression::new(
        truncated,
        vec![expr.child(0).clone()],
    ));

    let err = apply_rule(&UpdateToDmlRule::new(), &f.context(), &expr).unwrap_err();
    assert_eq!(
        err.downcast_ref::<OptError>(),
        Some(&OptError::ColumnListMismatch {
            deletes: 3,
            inserts: 2,
        })
    );
}

/// Partition selection that forgets to produce a selector.
struct NoSelector;

impl DmlBuilders for NoSelector {
    fn assert_constraints(
        &self,
        ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        table: &Arc<TableDescriptor>,
        insert_columns: &[ColumnRef],
    ) -> OptResult<ExprRef> {
        DefaultDmlBuilders.assert_constraints(ctx, scope, input, table, insert_columns)
    }

    fn partition_selector(
        &self,
        _ctx: &OptimizerContext,
        _scope: &AllocScope,
        input: ExprRef,
        _table: &Arc<TableDescriptor>,
        _insert_columns: &[ColumnRef],
    ) -> OptResult<ExprRef> {
        Ok(input)
    }

    fn row_trigger(
        &self,
        ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        trigger: RowTrigger,
    ) -> OptResult<ExprRef> {
        DefaultDmlBuilders.row_trigger(ctx, scope, input, trigger)
    }
}

#[test]
fn test_partition_selector_must_produce_oid() {
    let f = Fixture::new(hashed_on_a(), true, vec![]);
    let ctx = f.context().with_builders(Arc::new(NoSelector));

    let err = apply_rule(&UpdateToDmlRule::new(), &ctx, &f.update(Some(0))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<OptError>(),
        Some(OptError::MissingOutputColumn(_))
    ));
}

#[test]
fn test_in_place_update_is_never_wrapped() {
    let f = Fixture::new(hashed_on_a(), true, vec![]);
    let ctx = f
        .context_with(OptimizerConfig::default().with_enforce_constraints_on_dml(true))
        .with_triggers(Arc::new(StaticTriggers::new().with_before(TABLE_MDID, DmlKind::Update)));
    let expr = f.in_place_update();

    let result = apply_rule(&InPlaceUpdateToDmlRule::new(), &ctx, &expr).unwrap();
    assert_eq!(result.len(), 1);

    let alternative = &result.alternatives()[0];
    let dml = dml_of(alternative);
    assert_eq!(dml.kind, DmlKind::InPlaceUpdate);
    assert_eq!(dml.source_columns, f.columns);
    assert!(dml.modified.is_clear());
    assert_eq!(dml.table_oid, None);
    assert_eq!(dml.action.type_mdid(), MdId::INT4);
    assert!(Arc::ptr_eq(alternative.child(0), expr.child(0)));

    for kind in [
        OperatorKind::Split,
        OperatorKind::RowTrigger,
        OperatorKind::PartitionSelector,
        OperatorKind::Assert,
    ] {
        assert!(!alternative.contains_kind(kind), "unexpected {}", kind);
    }
}

#[test]
fn test_update_rules_ignore_other_operators() {
    let f = Fixture::new(DistributionPolicy::Random, false, vec![]);
    let ctx = f.context();
    let update = f.update(None);
    let in_place = f.in_place_update();

    assert!(apply_rule(&InPlaceUpdateToDmlRule::new(), &ctx, &update)
        .unwrap()
        .is_empty());
    assert!(apply_rule(&UpdateToDmlRule::new(), &ctx, &in_place)
        .unwrap()
        .is_empty());
    assert!(matches!(
        update.operator(),
        Operator::Logical(LogicalOperator::Update(_))
    ));
}

#[test]
fn test_fresh_columns_distinct_under_default_context() {
    let f = Fixture::new(DistributionPolicy::Random, false, vec![]);
    let ctx = OptimizerContext::new(Arc::new(f.md.clone()));

    let result = apply_rule(&InPlaceUpdateToDmlRule::new(), &ctx, &f.in_place_update()).unwrap();
    let action = dml_of(&result.alternatives()[0]).action.clone();
    assert!(!f.columns.contains(&action));

    let (expr, alternative) = lower_update(&f, &ctx, Some(1));
    let dml = dml_of(&alternative);
    let update = expr
        .operator()
        .as_logical()
        .and_then(|op| op.as_update())
        .expect("update");
    let table_oid = dml.table_oid.clone().expect("table oid");
    for fresh in [&dml.action, &table_oid] {
        assert!(!f.columns.contains(fresh));
        assert!(!update.insert_columns.contains(fresh));
    }
    assert_ne!(dml.action, table_oid);
}
