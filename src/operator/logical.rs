use std::fmt;

use enum_as_inner::EnumAsInner;

use crate::operator::{
    Dml, Get, InPlaceUpdate, IndexGet, Limit, OperatorKind, PartitionSelector, RowTrigger, Split,
    Update,
};

/// Logical relational operator.
///
/// Select, Project and Assert carry no attributes: the predicate, project list
/// and constraint list are their scalar children.
#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner)]
pub enum LogicalOperator {
    Get(Get),
    IndexGet(IndexGet),
    Limit(Limit),
    Select,
    Project,
    Update(Update),
    InPlaceUpdate(InPlaceUpdate),
    Dml(Dml),
    Split(Split),
    PartitionSelector(PartitionSelector),
    Assert,
    RowTrigger(RowTrigger),
}

impl LogicalOperator {
    pub fn kind(&self) -> OperatorKind {
        match self {
            LogicalOperator::Get(_) => OperatorKind::Get,
            LogicalOperator::IndexGet(_) => OperatorKind::IndexGet,
            LogicalOperator::Limit(_) => OperatorKind::Limit,
            LogicalOperator::Select => OperatorKind::Select,
            LogicalOperator::Project => OperatorKind::Project,
            LogicalOperator::Update(_) => OperatorKind::Update,
            LogicalOperator::InPlaceUpdate(_) => OperatorKind::InPlaceUpdate,
            LogicalOperator::Dml(_) => OperatorKind::Dml,
            LogicalOperator::Split(_) => OperatorKind::Split,
            LogicalOperator::PartitionSelector(_) => OperatorKind::PartitionSelector,
            LogicalOperator::Assert => OperatorKind::Assert,
            LogicalOperator::RowTrigger(_) => OperatorKind::RowTrigger,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::Get(get) => write!(f, "Get \"{}\"", get.table().name()),
            LogicalOperator::IndexGet(index_get) => write!(
                f,
                "IndexGet \"{}\" on \"{}\" {}",
                index_get.index_name(),
                index_get.table().name(),
                index_get.scan_direction()
            ),
            LogicalOperator::Limit(limit) => write!(f, "Limit {}", limit.order_spec()),
            LogicalOperator::Dml(dml) => write!(f, "Dml {} \"{}\"", dml.kind, dml.table.name()),
            op => write!(f, "{}", op.kind()),
        }
    }
}

macro_rules! impl_from_logical {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for LogicalOperator {
                fn from(op: $variant) -> Self {
                    LogicalOperator::$variant(op)
                }
            }

            impl From<$variant> for crate::operator::Operator {
                fn from(op: $variant) -> Self {
                    crate::operator::Operator::Logical(LogicalOperator::$variant(op))
                }
            }
        )*
    };
}

impl_from_logical!(
    Get,
    IndexGet,
    Limit,
    Update,
    InPlaceUpdate,
    Dml,
    Split,
    PartitionSelector,
    RowTrigger
);
