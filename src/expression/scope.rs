use std::cell::Cell;
use std::sync::Arc;

use crate::error::{OptError, OptResult};
use crate::expression::{ExprRef, Expression};
use crate::operator::Operator;

/// Allocation scope of a single rule invocation.
///
/// Every node a rule creates goes through [`AllocScope::expr`], which checks the
/// operator's arity and charges the node against the scope's budget. A scope
/// belongs to one invocation and is not shared between threads.
#[derive(Debug)]
pub struct AllocScope {
    budget: Option<usize>,
    allocated: Cell<usize>,
}

impl AllocScope {
    pub fn new(budget: Option<usize>) -> Self {
        Self {
            budget,
            allocated: Cell::new(0),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Number of nodes created so far.
    pub fn allocated(&self) -> usize {
        self.allocated.get()
    }

    pub fn expr<O, I>(&self, operator: O, children: I) -> OptResult<ExprRef>
    where
        O: Into<Operator>,
        I: IntoIterator<Item = ExprRef>,
    {
        if let Some(budget) = self.budget {
            if self.allocated.get() >= budget {
                return Err(OptError::ResourceExhausted { budget }.into());
            }
        }

        let expr = Expression::try_new(operator, children)?;
        self.allocated.set(self.allocated.get() + 1);
        Ok(Arc::new(expr))
    }

    pub fn leaf<O: Into<Operator>>(&self, operator: O) -> OptResult<ExprRef> {
        self.expr(operator, None)
    }
}
