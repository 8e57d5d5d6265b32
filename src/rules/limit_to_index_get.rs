use log::trace;

use crate::error::{OptError, OptResult};
use crate::expression::{ExprRef, Expression};
use crate::operator::{Get, Limit, LogicalOperator, OperatorKind};
use crate::optimizer::OptimizerContext;
use crate::rules::utils::{build_index_get, expect_logical, index_key_columns, rebuild_limit};
use crate::rules::{
    index_scan_direction, ExprHandle, Pattern, Promise, Rule, RuleId, RuleResult,
};

/// Replaces the table scan under an ordered limit with an index scan that
/// returns rows in the required order.
///
/// ```text
/// Limit(Get, offset, count) => Limit(IndexGet(true), offset, count)
/// ```
///
/// One alternative is produced per index able to deliver the order.
#[derive(Clone, Debug)]
pub struct LimitToIndexGetRule {
    pattern: Pattern,
}

impl LimitToIndexGetRule {
    pub fn new() -> Self {
        Self {
            pattern: Pattern::operator(
                OperatorKind::Limit,
                vec![
                    Pattern::operator(OperatorKind::Get, vec![]),
                    Pattern::Leaf,
                    Pattern::Leaf,
                ],
            ),
        }
    }
}

impl Default for LimitToIndexGetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for LimitToIndexGetRule {
    fn id(&self) -> RuleId {
        RuleId::LimitToIndexGet
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn promise(&self, handle: &ExprHandle<'_>) -> Promise {
        limit_promise(handle)
    }

    fn transform(
        &self,
        ctx: &OptimizerContext,
        expr: &ExprRef,
        result: &mut RuleResult,
    ) -> OptResult<()> {
        let limit = expect_logical!(expr, Limit, as_limit)?;
        let get = expect_logical!(expr.child(0), Get, as_get)?;

        add_index_scans(ctx, expr, limit, get, &[], None, result)
    }
}

/// A subquery in the offset makes the limit depend on the outer row.
pub(crate) fn limit_promise(handle: &ExprHandle<'_>) -> Promise {
    if handle.derive_has_subquery(1) {
        Promise::None
    } else {
        Promise::High
    }
}

/// Adds one Limit over an index scan of `get` for each index of its table that
/// delivers the order of `limit`.
///
/// `predicates` filter the index scan. `project_list` is re-applied over the
/// scan when the original limit sat on a projection.
pub(crate) fn add_index_scans(
    ctx: &OptimizerContext,
    expr: &Expression,
    limit: &Limit,
    get: &Get,
    predicates: &[ExprRef],
    project_list: Option<&ExprRef>,
    result: &mut RuleResult,
) -> OptResult<()> {
    let table = get.table();
    if table.index_count() == 0 {
        trace!("Table {} has no index", table.name());
        return Ok(());
    }

    let order_spec = limit.order_spec();
    if order_spec.is_empty() {
        trace!("Limit over {} has no sort columns", table.name());
        return Ok(());
    }

    let md_accessor = ctx.md_accessor();
    let relation = md_accessor.relation_by_id(table.mdid())?;
    let scope = ctx.alloc_scope();

    for idx in 0..table.index_count() {
        let index_mdid = relation
            .index_id_at(idx)
            .ok_or(OptError::MetadataNotFound(table.mdid()))?;
        let index = md_accessor.index_by_id(index_mdid)?;
        let index_columns = index_key_columns(get, &index);

        let direction =
            match index_scan_direction(md_accessor, order_spec, &index_columns, &index)? {
                Some(direction) => direction,
                None => continue,
            };

        let mut input = build_index_get(&scope, get, &index, &index_columns, predicates, direction)?;
        if let Some(project_list) = project_list {
            input = scope.expr(LogicalOperator::Project, vec![input, project_list.clone()])?;
        }

        trace!(
            "Index {} delivers {} with a {} scan",
            index.name(),
            order_spec,
            direction
        );
        result.add(rebuild_limit(&scope, limit, input, expr)?)?;
    }

    Ok(())
}
