//! Expression trees consumed and produced by the rules.
//!
//! An [`Expression`] owns one [`Operator`] and shares its children through
//! [`ExprRef`]s. Expressions are never modified after construction: a rule that
//! rewrites a fragment builds new nodes and clones the `ExprRef`s of the parts it
//! keeps, so the input fragment and its alternatives share those subtrees.
//! Dropping the last reference to a node releases its children.

use std::collections::HashSet;
use std::fmt;
use std::mem::swap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{OptError, OptResult};
use crate::operator::{Operator, OperatorKind};

mod builder;
pub use builder::*;
mod scope;
pub use scope::*;

pub type ExprRef = Arc<Expression>;

pub type ExprChildren = SmallVec<[ExprRef; 3]>;

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Expression {
    operator: Operator,
    children: ExprChildren,
}

impl Expression {
    /// Builds an expression without checking the operator's arity.
    ///
    /// Use [`Expression::try_new`] or [`AllocScope::expr`] when the children come
    /// from untrusted input.
    pub fn new<O, I>(operator: O, children: I) -> Self
    where
        O: Into<Operator>,
        I: IntoIterator<Item = ExprRef>,
    {
        let operator = operator.into();
        let children: ExprChildren = children.into_iter().collect();
        debug_assert!(
            operator.arity().accepts(children.len()),
            "{} built with {} children",
            operator.kind(),
            children.len()
        );
        Self { operator, children }
    }

    pub fn try_new<O, I>(operator: O, children: I) -> OptResult<Self>
    where
        O: Into<Operator>,
        I: IntoIterator<Item = ExprRef>,
    {
        let expr = Self {
            operator: operator.into(),
            children: children.into_iter().collect(),
        };
        expr.check_arity()?;
        Ok(expr)
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn kind(&self) -> OperatorKind {
        self.operator.kind()
    }

    pub fn children(&self) -> &[ExprRef] {
        &self.children
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }

    /// # Panics
    ///
    /// If there is no child `idx`. Callers index children whose presence was
    /// established by a pattern match.
    pub fn child(&self, idx: usize) -> &ExprRef {
        &self.children[idx]
    }

    /// Checks the child count of this node against its operator.
    pub fn check_arity(&self) -> OptResult<()> {
        let expected = self.operator.arity();
        if expected.accepts(self.children.len()) {
            Ok(())
        } else {
            Err(OptError::ArityMismatch {
                operator: self.kind(),
                expected,
                actual: self.children.len(),
            }
            .into())
        }
    }

    /// Checks the arity of every node of the tree.
    pub fn validate(&self) -> OptResult<()> {
        self.check_arity()?;
        self.children.iter().try_for_each(|child| child.validate())
    }

    /// Breadth first iterator over the distinct nodes of the tree, self first.
    pub fn bfs_iterator(self: &Arc<Self>) -> impl Iterator<Item = ExprRef> {
        let mut visited = HashSet::new();
        visited.insert(Arc::as_ptr(self));

        BfsExprIter {
            cur_level: vec![self.clone()],
            next_level: vec![],
            visited,
        }
    }

    /// Number of nodes with the given operator kind, counting shared nodes once.
    pub fn count_kind(self: &Arc<Self>, kind: OperatorKind) -> usize {
        self.bfs_iterator().filter(|e| e.kind() == kind).count()
    }

    pub fn contains_kind(self: &Arc<Self>, kind: OperatorKind) -> bool {
        self.bfs_iterator().any(|e| e.kind() == kind)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator)?;
        if !self.children.is_empty() {
            write!(f, "(")?;
            for (idx, child) in self.children.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Breadth first iterator of an expression tree.
struct BfsExprIter {
    visited: HashSet<*const Expression>,
    cur_level: Vec<ExprRef>,
    next_level: Vec<ExprRef>,
}

impl Iterator for BfsExprIter {
    type Item = ExprRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur_level.is_empty() {
            swap(&mut self.cur_level, &mut self.next_level);
            self.cur_level.reverse();
        }

        if let Some(e) = self.cur_level.pop() {
            for child in &e.children {
                if self.visited.insert(Arc::as_ptr(child)) {
                    self.next_level.push(child.clone());
                }
            }

            Some(e)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ColumnFactory, MdId, DEFAULT_TYPE_MODIFIER};
    use crate::operator::{Datum, LogicalOperator, ScalarOperator};

    #[test]
    fn test_try_new_checks_arity() {
        let one = const_datum(Datum::Int4(1));
        let err = Expression::try_new(LogicalOperator::Select, vec![one]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<OptError>(),
            Some(&OptError::ArityMismatch {
                operator: OperatorKind::Select,
                expected: crate::operator::Arity::Exact(2),
                actual: 1,
            })
        );
    }

    #[test]
    fn test_bfs_visits_shared_node_once() {
        let factory = ColumnFactory::new();
        let col = factory.create_column(MdId::INT4, DEFAULT_TYPE_MODIFIER);
        let shared = ident(col);
        let cmp = Arc::new(Expression::new(
            ScalarOperator::Cmp(crate::metadata::CmpKind::Eq),
            vec![shared.clone(), shared.clone()],
        ));

        let kinds: Vec<OperatorKind> = cmp.bfs_iterator().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![OperatorKind::ScalarCmp, OperatorKind::ScalarIdent]);
        assert_eq!(cmp.count_kind(OperatorKind::ScalarIdent), 1);
        assert!(!cmp.contains_kind(OperatorKind::ScalarConst));
    }

    #[test]
    fn test_bfs_order() {
        let list = project_list(vec![
            const_datum(Datum::Int4(1)),
            and(vec![const_bool(true), const_bool(false)]),
        ]);

        let kinds: Vec<OperatorKind> = list.bfs_iterator().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OperatorKind::ScalarProjectList,
                OperatorKind::ScalarConst,
                OperatorKind::ScalarBoolOp,
                OperatorKind::ScalarConst,
                OperatorKind::ScalarConst,
            ]
        );
    }

    #[test]
    fn test_release_restores_ref_count() {
        let subtree = const_bool(true);
        let before = Arc::strong_count(&subtree);

        let parent = and(vec![subtree.clone(), const_bool(false)]);
        assert_eq!(Arc::strong_count(&subtree), before + 1);

        drop(parent);
        assert_eq!(Arc::strong_count(&subtree), before);
    }
}
