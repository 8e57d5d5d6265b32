//! Operators of the expression tree.
//!
//! An [`Operator`] is either logical (a relational operation such as Get or
//! Limit) or scalar (a row-level computation such as a constant or a project
//! element). Every operator reports an [`OperatorKind`], the data-free tag used by
//! pattern matching, and each kind declares the number of children an
//! expression built on it must have.

use std::fmt;

use derive_more::Display;
use enum_as_inner::EnumAsInner;
use enumset::EnumSetType;
use strum_macros::{Display as StrumDisplay, EnumIter, IntoStaticStr};

mod dml;
pub use dml::*;
mod get;
pub use get::*;
mod limit;
pub use limit::*;
mod logical;
pub use logical::*;
mod partition;
pub use partition::*;
mod scalar;
pub use scalar::*;

#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner)]
pub enum Operator {
    Logical(LogicalOperator),
    Scalar(ScalarOperator),
}

impl Operator {
    pub fn kind(&self) -> OperatorKind {
        match self {
            Operator::Logical(op) => op.kind(),
            Operator::Scalar(op) => op.kind(),
        }
    }

    pub fn arity(&self) -> Arity {
        self.kind().arity()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Logical(op) => write!(f, "{}", op),
            Operator::Scalar(op) => write!(f, "{}", op),
        }
    }
}

impl From<LogicalOperator> for Operator {
    fn from(op: LogicalOperator) -> Self {
        Operator::Logical(op)
    }
}

impl From<ScalarOperator> for Operator {
    fn from(op: ScalarOperator) -> Self {
        Operator::Scalar(op)
    }
}

/// Number of children an operator requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Arity {
    #[display(fmt = "exactly {}", _0)]
    Exact(usize),
    #[display(fmt = "at least {}", _0)]
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, child_count: usize) -> bool {
        match self {
            Arity::Exact(n) => child_count == *n,
            Arity::AtLeast(n) => child_count >= *n,
        }
    }
}

/// Data-free tag of an operator.
#[derive(Debug, Hash, EnumSetType, StrumDisplay, EnumIter, IntoStaticStr)]
pub enum OperatorKind {
    Get,
    IndexGet,
    Limit,
    Select,
    Project,
    Update,
    InPlaceUpdate,
    Dml,
    Split,
    PartitionSelector,
    Assert,
    RowTrigger,
    ScalarConst,
    ScalarIdent,
    ScalarCmp,
    ScalarBoolOp,
    ScalarNullTest,
    ScalarProjectList,
    ScalarProjectElement,
    ScalarDmlAction,
    ScalarSubquery,
    ScalarAssertConstraintList,
    ScalarAssertConstraint,
}

impl OperatorKind {
    pub fn arity(&self) -> Arity {
        use OperatorKind::*;

        match self {
            Get | ScalarConst | ScalarIdent | ScalarDmlAction => Arity::Exact(0),
            IndexGet | Update | InPlaceUpdate | Dml | PartitionSelector | RowTrigger
            | ScalarNullTest | ScalarProjectElement | ScalarSubquery | ScalarAssertConstraint => {
                Arity::Exact(1)
            }
            Select | Project | Split | Assert | ScalarCmp => Arity::Exact(2),
            Limit => Arity::Exact(3),
            ScalarBoolOp | ScalarProjectList | ScalarAssertConstraintList => Arity::AtLeast(1),
        }
    }

    pub fn is_scalar(&self) -> bool {
        let name: &'static str = self.into();
        name.starts_with("Scalar")
    }

    pub fn is_logical(&self) -> bool {
        !self.is_scalar()
    }
}
