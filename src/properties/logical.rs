use crate::expression::Expression;
use crate::metadata::ColumnRef;
use crate::operator::{Operator, ScalarOperator};

/// Properties derived from a scalar subtree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScalarProperties {
    has_subquery: bool,
    used_columns: Vec<ColumnRef>,
}

impl ScalarProperties {
    pub fn derive(expr: &Expression) -> Self {
        let mut props = Self::default();
        props.collect(expr);
        props
    }

    fn collect(&mut self, expr: &Expression) {
        match expr.operator() {
            Operator::Scalar(ScalarOperator::Subquery(_)) => {
                // Columns referenced inside the subquery belong to its own scope.
                self.has_subquery = true;
                return;
            }
            Operator::Scalar(ScalarOperator::Ident(col)) => {
                if !self.used_columns.contains(col) {
                    self.used_columns.push(col.clone());
                }
            }
            _ => {}
        }

        for child in expr.children() {
            self.collect(child);
        }
    }

    pub fn has_subquery(&self) -> bool {
        self.has_subquery
    }

    pub fn used_columns(&self) -> &[ColumnRef] {
        &self.used_columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{cmp, const_bool, ident, subquery, LogicalExprBuilder};
    use crate::metadata::{CmpKind, ColumnDescriptor, ColumnFactory, MdId, TableDescriptor};
    use crate::metadata::DEFAULT_TYPE_MODIFIER;
    use std::sync::Arc;

    #[test]
    fn test_derive() {
        let factory = ColumnFactory::new();
        let a = factory.create_column(MdId::INT4, DEFAULT_TYPE_MODIFIER);
        let b = factory.create_column(MdId::INT4, DEFAULT_TYPE_MODIFIER);

        let plain = cmp(CmpKind::Lt, ident(a.clone()), ident(a.clone()));
        let props = ScalarProperties::derive(&plain);
        assert!(!props.has_subquery());
        assert_eq!(props.used_columns(), &[a.clone()]);

        let table = Arc::new(TableDescriptor::new(
            MdId(1),
            "t",
            vec![ColumnDescriptor::new("b", MdId::INT4, true)],
        ));
        let inner = LogicalExprBuilder::get(table, Arc::new(vec![b.clone()]))
            .select(cmp(CmpKind::Eq, ident(b.clone()), ident(a.clone())))
            .build();
        let correlated = cmp(
            CmpKind::Eq,
            ident(a.clone()),
            subquery(b, inner),
        );
        let props = ScalarProperties::derive(&correlated);
        assert!(props.has_subquery());
        assert_eq!(props.used_columns(), &[a]);

        assert!(!ScalarProperties::derive(&const_bool(true)).has_subquery());
    }
}
