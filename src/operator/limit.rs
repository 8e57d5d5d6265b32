use std::sync::Arc;

use crate::properties::OrderSpec;

/// Children: relational input, offset scalar, row count scalar.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Limit {
    order_spec: Arc<OrderSpec>,
    global: bool,
    has_count: bool,
    top_limit_under_dml: bool,
}

impl Limit {
    pub fn new(
        order_spec: Arc<OrderSpec>,
        global: bool,
        has_count: bool,
        top_limit_under_dml: bool,
    ) -> Self {
        Self {
            order_spec,
            global,
            has_count,
            top_limit_under_dml,
        }
    }

    pub fn order_spec(&self) -> &Arc<OrderSpec> {
        &self.order_spec
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn has_count(&self) -> bool {
        self.has_count
    }

    pub fn is_top_limit_under_dml(&self) -> bool {
        self.top_limit_under_dml
    }
}
