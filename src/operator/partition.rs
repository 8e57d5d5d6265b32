use crate::metadata::{ColumnRef, MdId};

/// Routes each row to its leaf partition, exposing the leaf's oid as a column.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct PartitionSelector {
    relation: MdId,
    oid_column: ColumnRef,
}

impl PartitionSelector {
    pub fn new(relation: MdId, oid_column: ColumnRef) -> Self {
        Self {
            relation,
            oid_column,
        }
    }

    pub fn relation(&self) -> MdId {
        self.relation
    }

    pub fn oid_column(&self) -> &ColumnRef {
        &self.oid_column
    }
}
