use std::fmt;

use enum_as_inner::EnumAsInner;
use strum_macros::Display;

use crate::metadata::{CmpKind, ColumnRef, MdId};
use crate::operator::OperatorKind;

/// Constant value.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Datum {
    Null(MdId),
    Bool(bool),
    Int4(i32),
    Int8(i64),
    Oid(u32),
    Text(String),
}

impl Datum {
    pub fn type_mdid(&self) -> MdId {
        match self {
            Datum::Null(type_mdid) => *type_mdid,
            Datum::Bool(_) => MdId::BOOL,
            Datum::Int4(_) => MdId::INT4,
            Datum::Int8(_) => MdId::INT8,
            Datum::Oid(_) => MdId::OID,
            Datum::Text(_) => MdId::TEXT,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null(_) => write!(f, "null"),
            Datum::Bool(v) => write!(f, "{}", v),
            Datum::Int4(v) => write!(f, "{}", v),
            Datum::Int8(v) => write!(f, "{}", v),
            Datum::Oid(v) => write!(f, "{}", v),
            Datum::Text(v) => write!(f, "'{}'", v),
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display)]
pub enum BoolOpKind {
    And,
    Or,
    Not,
}

/// `IS NULL` when `is_null` is set, `IS NOT NULL` otherwise.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct NullTest {
    is_null: bool,
}

impl NullTest {
    pub fn new(is_null: bool) -> Self {
        Self { is_null }
    }

    pub fn is_null_test(&self) -> bool {
        self.is_null
    }
}

/// Scalar operator.
#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner)]
pub enum ScalarOperator {
    Const(Datum),
    Ident(ColumnRef),
    Cmp(CmpKind),
    BoolOp(BoolOpKind),
    NullTest(NullTest),
    ProjectList,
    /// Defines the column from the value of its only child.
    ProjectElement(ColumnRef),
    /// Evaluates to the action code of the row a DML step is looking at.
    DmlAction,
    /// Subquery over its relational child, producing the given column.
    Subquery(ColumnRef),
    AssertConstraintList,
    /// Raises the message when its child evaluates to false.
    AssertConstraint(String),
}

impl ScalarOperator {
    pub fn kind(&self) -> OperatorKind {
        match self {
            ScalarOperator::Const(_) => OperatorKind::ScalarConst,
            ScalarOperator::Ident(_) => OperatorKind::ScalarIdent,
            ScalarOperator::Cmp(_) => OperatorKind::ScalarCmp,
            ScalarOperator::BoolOp(_) => OperatorKind::ScalarBoolOp,
            ScalarOperator::NullTest(_) => OperatorKind::ScalarNullTest,
            ScalarOperator::ProjectList => OperatorKind::ScalarProjectList,
            ScalarOperator::ProjectElement(_) => OperatorKind::ScalarProjectElement,
            ScalarOperator::DmlAction => OperatorKind::ScalarDmlAction,
            ScalarOperator::Subquery(_) => OperatorKind::ScalarSubquery,
            ScalarOperator::AssertConstraintList => OperatorKind::ScalarAssertConstraintList,
            ScalarOperator::AssertConstraint(_) => OperatorKind::ScalarAssertConstraint,
        }
    }

    /// Whether this is the constant `true`.
    pub fn is_const_true(&self) -> bool {
        matches!(self, ScalarOperator::Const(Datum::Bool(true)))
    }
}

impl fmt::Display for ScalarOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarOperator::Const(datum) => write!(f, "Const ({})", datum),
            ScalarOperator::Ident(col) => write!(f, "Ident {:?}", col),
            ScalarOperator::Cmp(kind) => write!(f, "Cmp ({})", kind),
            ScalarOperator::BoolOp(kind) => write!(f, "BoolOp ({})", kind),
            ScalarOperator::NullTest(test) if test.is_null_test() => write!(f, "IS NULL"),
            ScalarOperator::NullTest(_) => write!(f, "IS NOT NULL"),
            ScalarOperator::ProjectElement(col) => write!(f, "ProjectElement {:?}", col),
            op => write!(f, "{}", op.kind()),
        }
    }
}
