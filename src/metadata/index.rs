use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::metadata::MdId;
use crate::properties::{NullsOrder, SortDirection};

/// Access method of an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum IndexType {
    Btree,
    Hash,
    Bitmap,
    Gist,
    Gin,
    Brin,
}

impl IndexType {
    /// Whether a scan of the index returns rows in key order.
    pub fn supports_ordered_scan(&self) -> bool {
        matches!(self, IndexType::Btree)
    }
}

/// Index metadata.
///
/// Key columns are positions in the owning relation. The per-key sort and nulls
/// directions run parallel to the key list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexMetadata {
    mdid: MdId,
    name: String,
    index_type: IndexType,
    key_columns: Vec<usize>,
    sort_directions: Vec<SortDirection>,
    nulls_directions: Vec<NullsOrder>,
}

impl IndexMetadata {
    /// A b-tree index with every key ascending, nulls last.
    pub fn btree<S: Into<String>>(mdid: MdId, name: S, key_columns: Vec<usize>) -> Self {
        Self::new(mdid, name, IndexType::Btree, key_columns)
    }

    pub fn new<S: Into<String>>(
        mdid: MdId,
        name: S,
        index_type: IndexType,
        key_columns: Vec<usize>,
    ) -> Self {
        let key_count = key_columns.len();
        Self {
            mdid,
            name: name.into(),
            index_type,
            key_columns,
            sort_directions: vec![SortDirection::Asc; key_count],
            nulls_directions: vec![NullsOrder::Last; key_count],
        }
    }

    /// Overrides the direction of key `key_idx`.
    ///
    /// # Panics
    ///
    /// If `key_idx` is not a key position.
    pub fn with_key_direction(
        mut self,
        key_idx: usize,
        sort: SortDirection,
        nulls: NullsOrder,
    ) -> Self {
        self.sort_directions[key_idx] = sort;
        self.nulls_directions[key_idx] = nulls;
        self
    }

    pub fn mdid(&self) -> MdId {
        self.mdid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    pub fn key_columns(&self) -> &[usize] {
        &self.key_columns
    }

    pub fn key_sort_direction_at(&self, key_idx: usize) -> SortDirection {
        self.sort_directions[key_idx]
    }

    pub fn key_nulls_direction_at(&self, key_idx: usize) -> NullsOrder {
        self.nulls_directions[key_idx]
    }
}
