use crate::metadata::MdId;
use crate::properties::DistributionPolicy;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    name: String,
    type_mdid: MdId,
    nullable: bool,
}

impl ColumnDescriptor {
    pub fn new<S: Into<String>>(name: S, type_mdid: MdId, nullable: bool) -> Self {
        Self {
            name: name.into(),
            type_mdid,
            nullable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_mdid(&self) -> MdId {
        self.type_mdid
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Description of a base table as referenced by Get and DML operators.
///
/// Shared by every expression that touches the same table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableDescriptor {
    mdid: MdId,
    name: String,
    columns: Vec<ColumnDescriptor>,
    distribution: DistributionPolicy,
    partitioned: bool,
    index_count: usize,
}

impl TableDescriptor {
    pub fn new<S: Into<String>>(mdid: MdId, name: S, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            mdid,
            name: name.into(),
            columns,
            distribution: DistributionPolicy::Random,
            partitioned: false,
            index_count: 0,
        }
    }

    pub fn with_distribution(mut self, distribution: DistributionPolicy) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_partitioning(mut self, partitioned: bool) -> Self {
        self.partitioned = partitioned;
        self
    }

    pub fn with_index_count(mut self, index_count: usize) -> Self {
        self.index_count = index_count;
        self
    }

    pub fn mdid(&self) -> MdId {
        self.mdid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn distribution(&self) -> &DistributionPolicy {
        &self.distribution
    }

    /// Whether changing the column at `position` may move a row to another segment.
    pub fn is_distribution_column(&self, position: usize) -> bool {
        self.distribution.is_key_column(position)
    }

    pub fn is_partitioned(&self) -> bool {
        self.partitioned
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

/// Relation metadata as served by a [`MetadataAccessor`](crate::metadata::MetadataAccessor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationMetadata {
    mdid: MdId,
    column_count: usize,
    index_mdids: Vec<MdId>,
    partitioned: bool,
}

impl RelationMetadata {
    pub fn new(mdid: MdId, column_count: usize, index_mdids: Vec<MdId>, partitioned: bool) -> Self {
        Self {
            mdid,
            column_count,
            index_mdids,
            partitioned,
        }
    }

    pub fn mdid(&self) -> MdId {
        self.mdid
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn index_count(&self) -> usize {
        self.index_mdids.len()
    }

    pub fn index_id_at(&self, idx: usize) -> Option<MdId> {
        self.index_mdids.get(idx).copied()
    }

    pub fn index_ids(&self) -> &[MdId] {
        &self.index_mdids
    }

    pub fn is_partitioned(&self) -> bool {
        self.partitioned
    }
}
