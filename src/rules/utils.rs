//! Building blocks shared by the rules.

use log::trace;

use crate::error::{OptError, OptResult};
use crate::expression::{AllocScope, ExprRef, Expression};
use crate::metadata::{ColumnRef, IndexMetadata, DEFAULT_TYPE_MODIFIER};
use crate::operator::{
    BoolOpKind, Datum, Get, IndexGet, IndexScanDirection, Limit, LogicalOperator, Operator,
    OperatorKind, ScalarOperator,
};
use crate::optimizer::OptimizerContext;
use crate::properties::ScalarProperties;

/// Borrows the attributes of a logical operator of the expected variant.
///
/// Fails with [`OptError::UnexpectedOperator`] for any other operator.
macro_rules! expect_logical {
    ($expr:expr, $kind:ident, $as_fn:ident) => {{
        let expr: &$crate::expression::Expression = $expr;
        expr.operator()
            .as_logical()
            .and_then(|op| op.$as_fn())
            .ok_or_else(|| $crate::error::OptError::UnexpectedOperator {
                expected: $crate::operator::OperatorKind::$kind,
                found: expr.kind(),
            })
    }};
}

pub(crate) use expect_logical;

pub(crate) fn expect_kind(expr: &Expression, expected: OperatorKind) -> OptResult<()> {
    if expr.kind() == expected {
        Ok(())
    } else {
        Err(OptError::UnexpectedOperator {
            expected,
            found: expr.kind(),
        }
        .into())
    }
}

/// Key columns of `index` as output by `get`, in key order.
///
/// Stops at the first key the scan does not output.
pub fn index_key_columns(get: &Get, index: &IndexMetadata) -> Vec<ColumnRef> {
    let output_columns = get.output_columns();
    index
        .key_columns()
        .iter()
        .map_while(|pos| output_columns.get(*pos).cloned())
        .collect()
}

/// Top level conjuncts of a predicate.
pub fn conjuncts(predicate: &ExprRef) -> Vec<ExprRef> {
    match predicate.operator() {
        Operator::Scalar(ScalarOperator::BoolOp(BoolOpKind::And)) => predicate
            .children()
            .iter()
            .flat_map(conjuncts)
            .collect(),
        _ => vec![predicate.clone()],
    }
}

/// Conjunction of `conjuncts`, or `true` if there are none.
pub fn conjunction(scope: &AllocScope, mut conjuncts: Vec<ExprRef>) -> OptResult<ExprRef> {
    match conjuncts.len() {
        0 => scope.leaf(ScalarOperator::Const(Datum::Bool(true))),
        1 => Ok(conjuncts.remove(0)),
        _ => scope.expr(ScalarOperator::BoolOp(BoolOpKind::And), conjuncts),
    }
}

/// Index scan of `index` replacing `get`, filtered by `predicates`.
///
/// Predicates that only reference index keys and contain no subquery form the
/// index condition. The others are applied by a Select over the index scan.
pub fn build_index_get(
    scope: &AllocScope,
    get: &Get,
    index: &IndexMetadata,
    index_columns: &[ColumnRef],
    predicates: &[ExprRef],
    direction: IndexScanDirection,
) -> OptResult<ExprRef> {
    let (index_conds, residuals): (Vec<ExprRef>, Vec<ExprRef>) =
        predicates.iter().cloned().partition(|predicate| {
            let props = ScalarProperties::derive(predicate);
            !props.has_subquery()
                && props
                    .used_columns()
                    .iter()
                    .all(|col| index_columns.contains(col))
        });

    trace!(
        "Index {} takes {} predicates, {} left as residual",
        index.name(),
        index_conds.len(),
        residuals.len()
    );

    let index_cond = conjunction(scope, index_conds)?;
    let index_get = scope.expr(IndexGet::new(index, get, direction), vec![index_cond])?;
    if residuals.is_empty() {
        return Ok(index_get);
    }

    let residual = conjunction(scope, residuals)?;
    scope.expr(LogicalOperator::Select, vec![index_get, residual])
}

/// Projects `datum` as a new column on top of `input`.
///
/// Returns the projection and the new column.
pub fn add_const_projection(
    ctx: &OptimizerContext,
    scope: &AllocScope,
    input: ExprRef,
    datum: Datum,
) -> OptResult<(ExprRef, ColumnRef)> {
    let column = ctx
        .column_factory()
        .create_column(datum.type_mdid(), DEFAULT_TYPE_MODIFIER);
    let value = scope.leaf(ScalarOperator::Const(datum))?;
    let element = scope.expr(ScalarOperator::ProjectElement(column.clone()), vec![value])?;
    let list = scope.expr(ScalarOperator::ProjectList, vec![element])?;
    let project = scope.expr(LogicalOperator::Project, vec![input, list])?;
    Ok((project, column))
}

/// New Limit with the attributes and scalar children of `original` over `input`.
pub fn rebuild_limit(
    scope: &AllocScope,
    limit: &Limit,
    input: ExprRef,
    original: &Expression,
) -> OptResult<ExprRef> {
    scope.expr(
        limit.clone(),
        vec![input, original.child(1).clone(), original.child(2).clone()],
    )
}
