use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::common::BitSet;
use crate::metadata::{ColumnRef, MdId, TableDescriptor};

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display, Serialize, Deserialize)]
pub enum DmlKind {
    Insert,
    Delete,
    Update,
    InPlaceUpdate,
}

/// Columns locating a stored row.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct RowId {
    pub ctid: ColumnRef,
    pub segment_id: ColumnRef,
}

/// Logical UPDATE.
///
/// The child produces both row images: `delete_columns[i]` holds the old value
/// of table column `i` and `insert_columns[i]` the new one. Unchanged columns
/// use the same column in both lists.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Update {
    pub table: Arc<TableDescriptor>,
    pub delete_columns: Arc<Vec<ColumnRef>>,
    pub insert_columns: Arc<Vec<ColumnRef>>,
    pub row_id: RowId,
    pub tuple_oid: Option<ColumnRef>,
}

/// UPDATE that can overwrite rows where they are stored.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct InPlaceUpdate {
    pub table: Arc<TableDescriptor>,
    pub insert_columns: Arc<Vec<ColumnRef>>,
    pub row_id: RowId,
}

/// DML step applied to each input row according to the value of `action`.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Dml {
    pub kind: DmlKind,
    pub table: Arc<TableDescriptor>,
    pub source_columns: Arc<Vec<ColumnRef>>,
    /// Table positions whose value changes.
    pub modified: BitSet,
    pub action: ColumnRef,
    pub table_oid: Option<ColumnRef>,
    pub row_id: RowId,
    pub tuple_oid: Option<ColumnRef>,
}

/// Turns each input row into a delete row and an insert row.
///
/// Children: relational input and the project list computing `action`.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Split {
    pub delete_columns: Arc<Vec<ColumnRef>>,
    pub insert_columns: Arc<Vec<ColumnRef>>,
    pub row_id: RowId,
    pub action: ColumnRef,
    pub tuple_oid: Option<ColumnRef>,
}

/// Fires the row triggers of `relation` for each input row.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct RowTrigger {
    pub relation: MdId,
    pub kind: DmlKind,
    pub before: bool,
    pub old_columns: Option<Arc<Vec<ColumnRef>>>,
    pub new_columns: Option<Arc<Vec<ColumnRef>>>,
}
