#![allow(dead_code)]

use std::sync::Arc;

use rust_opt_xforms::expression::{
    const_datum, ident, project_element, project_list, ExprRef, LogicalExprBuilder,
};
use rust_opt_xforms::metadata::{
    CmpKind, ColumnDescriptor, ColumnFactory, ColumnRef, InMemoryMetadata, IndexMetadata, MdId,
    MetadataAccessor, TableDescriptor, DEFAULT_TYPE_MODIFIER,
};
use rust_opt_xforms::operator::{Datum, InPlaceUpdate, RowId, Update};
use rust_opt_xforms::optimizer::{OptimizerConfig, OptimizerContext};
use rust_opt_xforms::properties::{DistributionPolicy, NullsOrder, OrderSpec};

pub const TABLE_MDID: MdId = MdId(16384);

/// A catalog under construction and the columns of its one table.
pub struct Fixture {
    pub md: InMemoryMetadata,
    pub factory: Arc<ColumnFactory>,
    pub table: Arc<TableDescriptor>,
    /// Output columns of a scan of the table, one per table column.
    pub columns: Arc<Vec<ColumnRef>>,
}

impl Fixture {
    /// Table `t(a int4 not null, b int4, c int4)` with the given indexes.
    pub fn new(
        distribution: DistributionPolicy,
        partitioned: bool,
        indexes: Vec<IndexMetadata>,
    ) -> Self {
        let mut md = InMemoryMetadata::new();
        let table = TableDescriptor::new(
            TABLE_MDID,
            "t",
            vec![
                ColumnDescriptor::new("a", MdId::INT4, false),
                ColumnDescriptor::new("b", MdId::INT4, true),
                ColumnDescriptor::new("c", MdId::INT4, true),
            ],
        )
        .with_distribution(distribution)
        .with_partitioning(partitioned);
        let table = md.add_table(table, indexes);

        let factory = Arc::new(ColumnFactory::new());
        let columns: Vec<ColumnRef> = table
            .columns()
            .iter()
            .map(|col| {
                factory.create_named_column(col.name(), col.type_mdid(), DEFAULT_TYPE_MODIFIER)
            })
            .collect();

        Self {
            md,
            factory,
            table,
            columns: Arc::new(columns),
        }
    }

    pub fn with_indexes(indexes: Vec<IndexMetadata>) -> Self {
        Self::new(DistributionPolicy::Random, false, indexes)
    }

    pub fn col(&self, idx: usize) -> ColumnRef {
        self.columns[idx].clone()
    }

    pub fn scan(&self) -> LogicalExprBuilder {
        LogicalExprBuilder::get(self.table.clone(), self.columns.clone())
    }

    pub fn context(&self) -> OptimizerContext {
        self.context_with(OptimizerConfig::default())
    }

    pub fn context_with(&self, config: OptimizerConfig) -> OptimizerContext {
        OptimizerContext::new(Arc::new(self.md.clone()))
            .with_column_factory(self.factory.clone())
            .with_config(config)
    }

    pub fn asc(&self) -> MdId {
        self.sort_op(CmpKind::Lt)
    }

    pub fn desc(&self) -> MdId {
        self.sort_op(CmpKind::Gt)
    }

    fn sort_op(&self, kind: CmpKind) -> MdId {
        self.md
            .type_by_id(MdId::INT4)
            .unwrap()
            .comparator_id_for(kind)
            .unwrap()
    }

    pub fn row_id(&self) -> RowId {
        RowId {
            ctid: self
                .factory
                .create_named_column("ctid", MdId(27), DEFAULT_TYPE_MODIFIER),
            segment_id: self.factory.create_named_column(
                "gp_segment_id",
                MdId::INT4,
                DEFAULT_TYPE_MODIFIER,
            ),
        }
    }

    /// `UPDATE t SET <col> = 5`, or an update changing nothing with `None`.
    ///
    /// The Project under the update computes the new value.
    pub fn update(&self, changed: Option<usize>) -> ExprRef {
        let new_value = self
            .factory
            .create_column(MdId::INT4, DEFAULT_TYPE_MODIFIER);
        let mut inserts = (*self.columns).clone();
        if let Some(idx) = changed {
            inserts[idx] = new_value.clone();
        }

        let update = Update {
            table: self.table.clone(),
            delete_columns: self.columns.clone(),
            insert_columns: Arc::new(inserts),
            row_id: self.row_id(),
            tuple_oid: None,
        };

        self.scan()
            .project(project_list(vec![project_element(
                new_value,
                const_datum(Datum::Int4(5)),
            )]))
            .update(update)
            .build()
    }

    pub fn in_place_update(&self) -> ExprRef {
        let update = InPlaceUpdate {
            table: self.table.clone(),
            insert_columns: self.columns.clone(),
            row_id: self.row_id(),
        };
        self.scan()
            .project(project_list(vec![project_element(
                self.factory.create_column(MdId::INT4, DEFAULT_TYPE_MODIFIER),
                ident(self.col(1)),
            )]))
            .in_place_update(update)
            .build()
    }
}

pub fn offset() -> ExprRef {
    const_datum(Datum::Int8(0))
}

pub fn count() -> ExprRef {
    const_datum(Datum::Int8(10))
}

pub fn order(items: Vec<(ColumnRef, MdId, NullsOrder)>) -> Arc<OrderSpec> {
    Arc::new(
        items
            .into_iter()
            .fold(OrderSpec::new(), |spec, (col, op, nulls)| spec.with_item(col, op, nulls)),
    )
}
