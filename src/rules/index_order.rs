//! Whether an index scan can deliver rows in a required order.
//!
//! An ordered index yields its keys in the declared direction when scanned
//! forward and in the exact reverse when scanned backward. The ORDER BY columns
//! must therefore be a prefix of the index key, and the required directions must
//! either equal the declared ones on every compared column, or be their reverse
//! on every compared column, for sort direction and null placement alike.

use log::trace;

use crate::common::BitSet;
use crate::error::OptResult;
use crate::metadata::{CmpKind, ColumnRef, IndexMetadata, MetadataAccessor};
use crate::operator::IndexScanDirection;
use crate::properties::{NullsOrder, OrderSpec, SortDirection};

/// Scan direction satisfying `order_spec`, or `None` if no scan of the index does.
///
/// `index_columns` are the key columns of `index` as output by the scanned
/// relation, in key order.
pub fn index_scan_direction(
    md_accessor: &dyn MetadataAccessor,
    order_spec: &OrderSpec,
    index_columns: &[ColumnRef],
    index: &IndexMetadata,
) -> OptResult<Option<IndexScanDirection>> {
    if !index.index_type().supports_ordered_scan() {
        trace!(
            "Index {} of type {} has no key order",
            index.name(),
            index.index_type()
        );
        return Ok(None);
    }

    let order_column_count = order_spec.sort_column_count();
    if index_columns.len() < order_column_count {
        trace!(
            "Index {} has {} usable keys for {} sort columns",
            index.name(),
            index_columns.len(),
            order_column_count
        );
        return Ok(None);
    }

    let mut required_sort = BitSet::new(order_column_count);
    let mut derived_sort = BitSet::new(order_column_count);
    let mut required_nulls = BitSet::new(order_column_count);
    let mut derived_nulls = BitSet::new(order_column_count);

    for (i, item) in order_spec.items().iter().enumerate() {
        let column = item.column();
        if *column != index_columns[i] {
            trace!(
                "Sort column {} is not key {} of index {}",
                column.name(),
                i,
                index.name()
            );
            return Ok(None);
        }

        let type_md = md_accessor.type_by_id(column.type_mdid())?;
        if type_md.comparator_id_for(CmpKind::Gt) == Some(item.sort_op()) {
            required_sort.insert(i);
        }
        if index.key_sort_direction_at(i) == SortDirection::Desc {
            derived_sort.insert(i);
        }
        if item.nulls() == NullsOrder::First {
            required_nulls.insert(i);
        }
        if index.key_nulls_direction_at(i) == NullsOrder::First {
            derived_nulls.insert(i);
        }
    }

    let direction = if required_sort == derived_sort && required_nulls == derived_nulls {
        Some(IndexScanDirection::Forward)
    } else if required_sort.is_complement_of(&derived_sort)
        && required_nulls.is_complement_of(&derived_nulls)
    {
        Some(IndexScanDirection::Backward)
    } else {
        trace!(
            "Index {} directions sort {} nulls {} cannot produce sort {} nulls {}",
            index.name(),
            derived_sort,
            derived_nulls,
            required_sort,
            required_nulls
        );
        None
    };

    Ok(direction)
}

pub fn is_index_applicable_for_order_by(
    md_accessor: &dyn MetadataAccessor,
    order_spec: &OrderSpec,
    index_columns: &[ColumnRef],
    index: &IndexMetadata,
) -> OptResult<bool> {
    Ok(index_scan_direction(md_accessor, order_spec, index_columns, index)?.is_some())
}
