use crate::expression::{ExprRef, Expression};
use crate::operator::OperatorKind;
use crate::properties::ScalarProperties;

/// Read-only view of a candidate expression, used to compute a rule's promise.
///
/// The handle borrows the candidate, so a promise can never keep or modify it.
#[derive(Clone, Copy, Debug)]
pub struct ExprHandle<'a> {
    expr: &'a ExprRef,
}

impl<'a> ExprHandle<'a> {
    pub fn new(expr: &'a ExprRef) -> Self {
        Self { expr }
    }

    pub fn expr(&self) -> &'a Expression {
        self.expr
    }

    pub fn kind(&self) -> OperatorKind {
        self.expr.kind()
    }

    pub fn arity(&self) -> usize {
        self.expr.arity()
    }

    /// Whether the scalar child at `child_idx` contains a subquery.
    ///
    /// A missing child has none.
    pub fn derive_has_subquery(&self, child_idx: usize) -> bool {
        self.expr
            .children()
            .get(child_idx)
            .map(|child| ScalarProperties::derive(child).has_subquery())
            .unwrap_or(false)
    }
}
