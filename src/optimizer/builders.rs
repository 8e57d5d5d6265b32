use std::sync::Arc;

use log::trace;

use crate::error::OptResult;
use crate::expression::{AllocScope, ExprRef};
use crate::metadata::{ColumnRef, MdId, TableDescriptor, DEFAULT_TYPE_MODIFIER};
use crate::operator::{
    DmlKind, LogicalOperator, NullTest, PartitionSelector, RowTrigger, ScalarOperator,
};
use crate::optimizer::OptimizerContext;

/// Builders of the wrappers the DML rules place around their input.
///
/// Each builder returns an expression producing at least the columns of `input`.
pub trait DmlBuilders: Send + Sync {
    /// Wraps `input` with checks of the table constraints against `insert_columns`.
    ///
    /// May return `input` itself when there is nothing to check.
    fn assert_constraints(
        &self,
        ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        table: &Arc<TableDescriptor>,
        insert_columns: &[ColumnRef],
    ) -> OptResult<ExprRef>;

    /// Routes rows of `input` to the leaf partitions of `table`.
    ///
    /// The root of the result must be a [`PartitionSelector`].
    fn partition_selector(
        &self,
        ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        table: &Arc<TableDescriptor>,
        insert_columns: &[ColumnRef],
    ) -> OptResult<ExprRef>;

    fn row_trigger(
        &self,
        ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        trigger: RowTrigger,
    ) -> OptResult<ExprRef>;
}

/// Asserts NOT NULL columns, selects partitions through a fresh oid column and
/// wraps triggers in a plain [`RowTrigger`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDmlBuilders;

impl DmlBuilders for DefaultDmlBuilders {
    fn assert_constraints(
        &self,
        _ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        table: &Arc<TableDescriptor>,
        insert_columns: &[ColumnRef],
    ) -> OptResult<ExprRef> {
        let mut constraints = Vec::new();
        for (column, inserted) in table.columns().iter().zip(insert_columns) {
            if column.is_nullable() {
                continue;
            }
            let message = format!(
                "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
                column.name(),
                table.name()
            );
            let value = scope.leaf(ScalarOperator::Ident(inserted.clone()))?;
            let not_null = scope.expr(ScalarOperator::NullTest(NullTest::new(false)), vec![value])?;
            constraints.push(scope.expr(ScalarOperator::AssertConstraint(message), vec![not_null])?);
        }

        if constraints.is_empty() {
            return Ok(input);
        }

        trace!(
            "Asserting {} not null constraints on table {}",
            constraints.len(),
            table.name()
        );
        let list = scope.expr(ScalarOperator::AssertConstraintList, constraints)?;
        scope.expr(LogicalOperator::Assert, vec![input, list])
    }

    fn partition_selector(
        &self,
        ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        table: &Arc<TableDescriptor>,
        _insert_columns: &[ColumnRef],
    ) -> OptResult<ExprRef> {
        let oid_column = ctx
            .column_factory()
            .create_column(MdId::OID, DEFAULT_TYPE_MODIFIER);
        scope.expr(
            PartitionSelector::new(table.mdid(), oid_column),
            vec![input],
        )
    }

    fn row_trigger(
        &self,
        _ctx: &OptimizerContext,
        scope: &AllocScope,
        input: ExprRef,
        trigger: RowTrigger,
    ) -> OptResult<ExprRef> {
        debug_assert!(
            trigger.kind != DmlKind::InPlaceUpdate,
            "in place updates fire no row triggers"
        );
        scope.expr(trigger, vec![input])
    }
}
