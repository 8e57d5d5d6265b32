use crate::common::BitSet;
use crate::error::OptResult;
use crate::expression::ExprRef;
use crate::metadata::{MdId, DEFAULT_TYPE_MODIFIER};
use crate::operator::{Dml, DmlKind, OperatorKind};
use crate::optimizer::OptimizerContext;
use crate::rules::utils::expect_logical;
use crate::rules::{ExprHandle, Pattern, Promise, Rule, RuleId, RuleResult};

/// Lowers an in-place update straight to a DML step over its input.
///
/// ```text
/// InPlaceUpdate(input) => Dml(input)
/// ```
#[derive(Clone, Debug)]
pub struct InPlaceUpdateToDmlRule {
    pattern: Pattern,
}

impl InPlaceUpdateToDmlRule {
    pub fn new() -> Self {
        Self {
            pattern: Pattern::operator(OperatorKind::InPlaceUpdate, vec![Pattern::Tree]),
        }
    }
}

impl Default for InPlaceUpdateToDmlRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for InPlaceUpdateToDmlRule {
    fn id(&self) -> RuleId {
        RuleId::InPlaceUpdateToDml
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
        let update = expect_logical!(expr, InPlaceUpdate, as_in_place_update)?;
        let scope = ctx.alloc_scope();

        let action = ctx
            .column_factory()
            .create_column(MdId::INT4, DEFAULT_TYPE_MODIFIER);
        let dml = Dml {
            kind: DmlKind::InPlaceUpdate,
            table: update.table.clone(),
            source_columns: update.insert_columns.clone(),
            modified: BitSet::new(update.table.column_count()),
            action,
            table_oid: None,
            row_id: update.row_id.clone(),
            tuple_oid: None,
        };

        result.add(scope.expr(dml, vec![expr.child(0).clone()])?)
    }
}
