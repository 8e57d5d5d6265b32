use std::sync::Arc;

use crate::expression::{ExprRef, Expression};
use crate::metadata::{CmpKind, ColumnRef, TableDescriptor};
use crate::operator::{
    BoolOpKind, Datum, Get, InPlaceUpdate, Limit, LogicalOperator, NullTest, ScalarOperator,
    Update,
};
use crate::properties::OrderSpec;

/// Builds a logical fragment bottom up, starting from a table scan.
///
/// ```
/// # use std::sync::Arc;
/// # use rust_opt_xforms::expression::*;
/// # use rust_opt_xforms::metadata::*;
/// # use rust_opt_xforms::operator::Datum;
/// # use rust_opt_xforms::properties::OrderSpec;
/// let factory = ColumnFactory::new();
/// let table = Arc::new(TableDescriptor::new(
///     MdId(1000),
///     "t",
///     vec![ColumnDescriptor::new("a", MdId::INT4, true)],
/// ));
/// let a = factory.create_named_column("a", MdId::INT4, DEFAULT_TYPE_MODIFIER);
///
/// let expr = LogicalExprBuilder::get(table, Arc::new(vec![a]))
///     .limit(
///         Arc::new(OrderSpec::new()),
///         const_datum(Datum::Int8(0)),
///         const_datum(Datum::Int8(10)),
///     )
///     .build();
/// assert!(expr.validate().is_ok());
/// ```
pub struct LogicalExprBuilder {
    root: ExprRef,
}

impl LogicalExprBuilder {
    pub fn get(table: Arc<TableDescriptor>, output_columns: Arc<Vec<ColumnRef>>) -> Self {
        Self {
            root: Arc::new(Expression::new(Get::new(table, output_columns), None)),
        }
    }

    pub fn from_expr(root: ExprRef) -> Self {
        Self { root }
    }

    fn reset_root<O: Into<crate::operator::Operator>>(
        mut self,
        operator: O,
        scalars: Vec<ExprRef>,
    ) -> Self {
        let mut children = vec![self.root];
        children.extend(scalars);
        self.root = Arc::new(Expression::new(operator, children));
        self
    }

    pub fn select(self, predicate: ExprRef) -> Self {
        self.reset_root(LogicalOperator::Select, vec![predicate])
    }

    pub fn project(self, project_list: ExprRef) -> Self {
        self.reset_root(LogicalOperator::Project, vec![project_list])
    }

    /// Global limit with a row count.
    pub fn limit(self, order_spec: Arc<OrderSpec>, offset: ExprRef, count: ExprRef) -> Self {
        self.limit_with(Limit::new(order_spec, true, true, false), offset, count)
    }

    pub fn limit_with(self, limit: Limit, offset: ExprRef, count: ExprRef) -> Self {
        self.reset_root(limit, vec![offset, count])
    }

    pub fn update(self, update: Update) -> Self {
        self.reset_root(update, vec![])
    }

    pub fn in_place_update(self, update: InPlaceUpdate) -> Self {
        self.reset_root(update, vec![])
    }

    pub fn build(self) -> ExprRef {
        self.root
    }
}

pub fn const_datum(datum: Datum) -> ExprRef {
    Arc::new(Expression::new(ScalarOperator::Const(datum), None))
}

pub fn const_bool(value: bool) -> ExprRef {
    const_datum(Datum::Bool(value))
}

pub fn ident(column: ColumnRef) -> ExprRef {
    Arc::new(Expression::new(ScalarOperator::Ident(column), None))
}

pub fn cmp(kind: CmpKind, left: ExprRef, right: ExprRef) -> ExprRef {
    Arc::new(Expression::new(ScalarOperator::Cmp(kind), vec![left, right]))
}

/// Conjunction of `conjuncts`; a single conjunct is returned as is.
///
/// # Panics
///
/// In debug builds, if `conjuncts` is empty.
pub fn and(mut conjuncts: Vec<ExprRef>) -> ExprRef {
    if conjuncts.len() == 1 {
        return conjuncts.remove(0);
    }
    Arc::new(Expression::new(
        ScalarOperator::BoolOp(BoolOpKind::And),
        conjuncts,
    ))
}

pub fn null_test(input: ExprRef, is_null: bool) -> ExprRef {
    Arc::new(Expression::new(
        ScalarOperator::NullTest(NullTest::new(is_null)),
        vec![input],
    ))
}

pub fn project_element(column: ColumnRef, value: ExprRef) -> ExprRef {
    Arc::new(Expression::new(
        ScalarOperator::ProjectElement(column),
        vec![value],
    ))
}

pub fn project_list(elements: Vec<ExprRef>) -> ExprRef {
    Arc::new(Expression::new(ScalarOperator::ProjectList, elements))
}

pub fn subquery(column: ColumnRef, relation: ExprRef) -> ExprRef {
    Arc::new(Expression::new(
        ScalarOperator::Subquery(column),
        vec![relation],
    ))
}
