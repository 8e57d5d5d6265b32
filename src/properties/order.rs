use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::metadata::{ColumnRef, MdId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SortDirection {
    #[strum(serialize = "ASC")]
    Asc,
    #[strum(serialize = "DESC")]
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum NullsOrder {
    #[strum(serialize = "NULLS FIRST")]
    First,
    #[strum(serialize = "NULLS LAST")]
    Last,
}

/// One ORDER BY term.
///
/// The direction is given by the sort operator, as the planner hands it over: a
/// term sorted with the type's `>` operator is descending.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderItem {
    column: ColumnRef,
    sort_op: MdId,
    nulls: NullsOrder,
}

impl OrderItem {
    pub fn new(column: ColumnRef, sort_op: MdId, nulls: NullsOrder) -> Self {
        Self {
            column,
            sort_op,
            nulls,
        }
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    pub fn sort_op(&self) -> MdId {
        self.sort_op
    }

    pub fn nulls(&self) -> NullsOrder {
        self.nulls
    }
}

/// Required output ordering, one item per ORDER BY term.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrderSpec {
    items: Vec<OrderItem>,
}

impl OrderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, column: ColumnRef, sort_op: MdId, nulls: NullsOrder) {
        self.items.push(OrderItem::new(column, sort_op, nulls));
    }

    pub fn with_item(mut self, column: ColumnRef, sort_op: MdId, nulls: NullsOrder) -> Self {
        self.append(column, sort_op, nulls);
        self
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn sort_column_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.items
                .iter()
                .map(|item| format!("{:?} op {} {}", item.column, item.sort_op, item.nulls))
                .join(", ")
        )
    }
}
