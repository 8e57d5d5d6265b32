use std::sync::Arc;

use strum_macros::Display;

use crate::metadata::{ColumnRef, IndexMetadata, MdId, TableDescriptor};

/// Full scan of a base table.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Get {
    table: Arc<TableDescriptor>,
    output_columns: Arc<Vec<ColumnRef>>,
}

impl Get {
    /// `output_columns` holds one column per table column, in table order.
    pub fn new(table: Arc<TableDescriptor>, output_columns: Arc<Vec<ColumnRef>>) -> Self {
        Self {
            table,
            output_columns,
        }
    }

    pub fn table(&self) -> &Arc<TableDescriptor> {
        &self.table
    }

    pub fn output_columns(&self) -> &Arc<Vec<ColumnRef>> {
        &self.output_columns
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display)]
pub enum IndexScanDirection {
    Forward,
    Backward,
}

/// Scan of a base table through one of its indexes.
///
/// The only child is the index condition.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct IndexGet {
    index_mdid: MdId,
    index_name: String,
    table: Arc<TableDescriptor>,
    output_columns: Arc<Vec<ColumnRef>>,
    scan_direction: IndexScanDirection,
}

impl IndexGet {
    pub fn new(index: &IndexMetadata, get: &Get, scan_direction: IndexScanDirection) -> Self {
        Self {
            index_mdid: index.mdid(),
            index_name: index.name().to_string(),
            table: get.table.clone(),
            output_columns: get.output_columns.clone(),
            scan_direction,
        }
    }

    pub fn index_mdid(&self) -> MdId {
        self.index_mdid
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn table(&self) -> &Arc<TableDescriptor> {
        &self.table
    }

    pub fn output_columns(&self) -> &Arc<Vec<ColumnRef>> {
        &self.output_columns
    }

    pub fn scan_direction(&self) -> IndexScanDirection {
        self.scan_direction
    }
}
