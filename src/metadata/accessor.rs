use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{OptError, OptResult};
use crate::metadata::{IndexMetadata, MdId, RelationMetadata, TableDescriptor, TypeMetadata};

/// Read-only view of the catalog used by the rules.
///
/// Lookups of unknown ids fail with [`OptError::MetadataNotFound`].
pub trait MetadataAccessor: Send + Sync {
    fn relation_by_id(&self, mdid: MdId) -> OptResult<Arc<RelationMetadata>>;

    fn index_by_id(&self, mdid: MdId) -> OptResult<Arc<IndexMetadata>>;

    fn type_by_id(&self, mdid: MdId) -> OptResult<Arc<TypeMetadata>>;
}

/// In-memory catalog, populated programmatically.
#[derive(Clone, Debug)]
pub struct InMemoryMetadata {
    relations: HashMap<MdId, Arc<RelationMetadata>>,
    indexes: HashMap<MdId, Arc<IndexMetadata>>,
    types: HashMap<MdId, Arc<TypeMetadata>>,
}

impl Default for InMemoryMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMetadata {
    /// Creates a catalog that already knows the builtin types.
    pub fn new() -> Self {
        let types = TypeMetadata::builtins()
            .into_iter()
            .map(|t| (t.mdid(), Arc::new(t)))
            .collect();

        Self {
            relations: HashMap::new(),
            indexes: HashMap::new(),
            types,
        }
    }

    pub fn add_type(&mut self, type_md: TypeMetadata) {
        self.types.insert(type_md.mdid(), Arc::new(type_md));
    }

    /// Registers a table with its indexes.
    ///
    /// Returns the descriptor to reference from Get and DML operators, with its
    /// index count filled in.
    pub fn add_table(
        &mut self,
        table: TableDescriptor,
        indexes: Vec<IndexMetadata>,
    ) -> Arc<TableDescriptor> {
        let index_mdids: Vec<MdId> = indexes.iter().map(IndexMetadata::mdid).collect();
        let relation = RelationMetadata::new(
            table.mdid(),
            table.column_count(),
            index_mdids,
            table.is_partitioned(),
        );
        self.relations.insert(table.mdid(), Arc::new(relation));

        for index in indexes {
            self.indexes.insert(index.mdid(), Arc::new(index));
        }

        let index_count = self.relations[&table.mdid()].index_count();
        Arc::new(table.with_index_count(index_count))
    }
}

impl MetadataAccessor for InMemoryMetadata {
    fn relation_by_id(&self, mdid: MdId) -> OptResult<Arc<RelationMetadata>> {
        self.relations
            .get(&mdid)
            .cloned()
            .ok_or_else(|| OptError::MetadataNotFound(mdid).into())
    }

    fn index_by_id(&self, mdid: MdId) -> OptResult<Arc<IndexMetadata>> {
        self.indexes
            .get(&mdid)
            .cloned()
            .ok_or_else(|| OptError::MetadataNotFound(mdid).into())
    }

    fn type_by_id(&self, mdid: MdId) -> OptResult<Arc<TypeMetadata>> {
        self.types
            .get(&mdid)
            .cloned()
            .ok_or_else(|| OptError::MetadataNotFound(mdid).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{CmpKind, ColumnDescriptor};

    #[test]
    fn test_add_table_sets_index_count() {
        let mut md = InMemoryMetadata::new();
        let table = TableDescriptor::new(
            MdId(1000),
            "t",
            vec![ColumnDescriptor::new("a", MdId::INT4, true)],
        );
        let desc = md.add_table(
            table,
            vec![
                IndexMetadata::btree(MdId(1001), "t_a_idx", vec![0]),
                IndexMetadata::btree(MdId(1002), "t_a_idx2", vec![0]),
            ],
        );

        assert_eq!(desc.index_count(), 2);
        let relation = md.relation_by_id(MdId(1000)).unwrap();
        assert_eq!(relation.index_id_at(1), Some(MdId(1002)));
        assert_eq!(relation.index_id_at(2), None);
        assert_eq!(md.index_by_id(MdId(1001)).unwrap().name(), "t_a_idx");
    }

    #[test]
    fn test_missing_object() {
        let md = InMemoryMetadata::new();
        let err = md.relation_by_id(MdId(42)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<OptError>(),
            Some(&OptError::MetadataNotFound(MdId(42)))
        );
    }

    #[test]
    fn test_builtin_comparators() {
        let md = InMemoryMetadata::new();
        let int4 = md.type_by_id(MdId::INT4).unwrap();
        assert_eq!(int4.comparator_id_for(CmpKind::Gt), Some(MdId(521)));
        assert_eq!(int4.comparator_id_for(CmpKind::Lt), Some(MdId(97)));
    }
}
