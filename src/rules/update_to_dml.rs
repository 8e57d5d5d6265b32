use log::trace;

use crate::common::BitSet;
use crate::error::{OptError, OptResult};
use crate::expression::{AllocScope, ExprRef};
use crate::metadata::{ColumnRef, MdId, TableDescriptor, DEFAULT_TYPE_MODIFIER};
use crate::operator::{
    Datum, Dml, DmlKind, LogicalOperator, OperatorKind, RowTrigger, ScalarOperator, Split, Update,
};
use crate::optimizer::OptimizerContext;
use crate::rules::utils::{add_const_projection, expect_kind, expect_logical};
use crate::rules::{ExprHandle, Pattern, Promise, Rule, RuleId, RuleResult};

/// Lowers a logical update to a DML step.
///
/// When no distribution key column changes, rows are updated where they are:
///
/// ```text
/// Update(Project) => Dml(Project(Project, table oid))
/// ```
///
/// Otherwise each row is split into a delete and an insert so the new row can
/// move to another segment:
///
/// ```text
/// Update(Project) => Dml(Project(Split(Project, action), table oid))
/// ```
///
/// The split may be wrapped with constraint checks, and a partitioned table
/// gets its oid column from a partition selector instead of a projection.
#[derive(Clone, Debug)]
pub struct UpdateToDmlRule {
    pattern: Pattern,
}

impl UpdateToDmlRule {
    pub fn new() -> Self {
        Self {
            pattern: Pattern::operator(OperatorKind::Update, vec![Pattern::Tree]),
        }
    }
}

impl Default for UpdateToDmlRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for UpdateToDmlRule {
    fn id(&self) -> RuleId {
        RuleId::UpdateToDml
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn promise(&self, _handle: &ExprHandle<'_>) -> Promise {
        Promise::High
    }

    fn transform(
        &self,
        ctx: &OptimizerContext,
        expr: &ExprRef,
        result: &mut RuleResult,
    ) -> OptResult<()> {
        let update = expect_logical!(expr, Update, as_update)?;
        let child = expr.child(0);
        expect_kind(child, OperatorKind::Project)?;

        let deletes = &update.delete_columns;
        let inserts = &update.insert_columns;
        if deletes.len() != inserts.len() {
            return Err(OptError::ColumnListMismatch {
                deletes: deletes.len(),
                inserts: inserts.len(),
            }
            .into());
        }

        let scope = ctx.alloc_scope();
        let table = &update.table;

        let mut input = child.clone();
        if ctx
            .triggers()
            .before_triggers_exist(table.mdid(), DmlKind::Update)
        {
            let trigger = RowTrigger {
                relation: table.mdid(),
                kind: DmlKind::Update,
                before: true,
                old_columns: Some(deletes.clone()),
                new_columns: Some(inserts.clone()),
            };
            input = ctx.builders().row_trigger(ctx, &scope, input, trigger)?;
        }

        let action = ctx
            .column_factory()
            .create_column(MdId::INT4, DEFAULT_TYPE_MODIFIER);
        let (modified, split_required) = modified_columns(table, deletes, inserts);
        trace!(
            "Update of {} modifies columns {}, split required: {}",
            table.name(),
            modified,
            split_required
        );

        let dml = if split_required {
            split_update(ctx, &scope, update, input, modified, action)?
        } else {
            let (projected, table_oid) = add_const_projection(
                ctx,
                &scope,
                input,
                Datum::Oid(table.mdid().oid()),
            )?;
            let dml = Dml {
                kind: DmlKind::Update,
                table: table.clone(),
                source_columns: inserts.clone(),
                modified,
                action,
                table_oid: Some(table_oid),
                row_id: update.row_id.clone(),
                tuple_oid: update.tuple_oid.clone(),
            };
            scope.expr(dml, vec![projected])?
        };

        result.add(dml)
    }
}

/// Positions whose inserted column differs from the deleted one, and whether
/// one of them is a distribution key column.
fn modified_columns(
    table: &TableDescriptor,
    deletes: &[ColumnRef],
    inserts: &[ColumnRef],
) -> (BitSet, bool) {
    let mut modified = BitSet::new(inserts.len());
    let mut split_required = false;

    for (pos, (deleted, inserted)) in deletes.iter().zip(inserts.iter()).enumerate() {
        if deleted != inserted {
            modified.insert(pos);
            split_required |= table.is_distribution_column(pos);
        }
    }

    (modified, split_required)
}

fn split_update(
    ctx: &OptimizerContext,
    scope: &AllocScope,
    update: &Update,
    input: ExprRef,
    modified: BitSet,
    action: ColumnRef,
) -> OptResult<ExprRef> {
    let table = &update.table;
    let builders = ctx.builders();

    let action_value = scope.leaf(ScalarOperator::DmlAction)?;
    let action_element = scope.expr(
        ScalarOperator::ProjectElement(action.clone()),
        vec![action_value],
    )?;
    let action_list = scope.expr(ScalarOperator::ProjectList, vec![action_element])?;

    let split = Split {
        delete_columns: update.delete_columns.clone(),
        insert_columns: update.insert_columns.clone(),
        row_id: update.row_id.clone(),
        action: action.clone(),
        tuple_oid: update.tuple_oid.clone(),
    };
    let mut output = scope.expr(split, vec![input, action_list])?;

    if ctx.config().enforce_constraints_on_dml() {
        output = builders.assert_constraints(ctx, scope, output, table, &update.insert_columns)?;
    }

    let (output, table_oid) = if table.is_partitioned() {
        let selector =
            builders.partition_selector(ctx, scope, output, table, &update.insert_columns)?;
        let oid_column = selector
            .operator()
            .as_logical()
            .and_then(LogicalOperator::as_partition_selector)
            .map(|selector| selector.oid_column().clone())
            .ok_or(OptError::MissingOutputColumn("partition oid"))?;
        (selector, oid_column)
    } else {
        add_const_projection(ctx, scope, output, Datum::Oid(table.mdid().oid()))?
    };

    let dml = Dml {
        kind: DmlKind::Update,
        table: table.clone(),
        source_columns: update.delete_columns.clone(),
        modified,
        action,
        table_oid: Some(table_oid),
        row_id: update.row_id.clone(),
        tuple_oid: update.tuple_oid.clone(),
    };
    scope.expr(dml, vec![output])
}
