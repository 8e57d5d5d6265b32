use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::metadata::MdId;

/// Comparison kinds a type can provide an operator for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum CmpKind {
    #[strum(serialize = "=")]
    Eq,
    #[strum(serialize = "<>")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    LtEq,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    GtEq,
}

/// Type metadata: the comparison operators registered for a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMetadata {
    mdid: MdId,
    name: String,
    comparators: HashMap<CmpKind, MdId>,
}

impl TypeMetadata {
    pub fn new<S: Into<String>>(mdid: MdId, name: S) -> Self {
        Self {
            mdid,
            name: name.into(),
            comparators: HashMap::new(),
        }
    }

    pub fn with_comparator(mut self, kind: CmpKind, operator: MdId) -> Self {
        self.comparators.insert(kind, operator);
        self
    }

    pub fn mdid(&self) -> MdId {
        self.mdid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the operator implementing `kind`, if the type has one.
    pub fn comparator_id_for(&self, kind: CmpKind) -> Option<MdId> {
        self.comparators.get(&kind).copied()
    }

    /// Types every catalog knows about, with their comparison operators.
    pub fn builtins() -> Vec<TypeMetadata> {
        let with_ordering = |mdid: MdId, name: &str, ops: [u32; 6]| {
            TypeMetadata::new(mdid, name)
                .with_comparator(CmpKind::Eq, MdId(ops[0]))
                .with_comparator(CmpKind::NotEq, MdId(ops[1]))
                .with_comparator(CmpKind::Lt, MdId(ops[2]))
                .with_comparator(CmpKind::LtEq, MdId(ops[3]))
                .with_comparator(CmpKind::Gt, MdId(ops[4]))
                .with_comparator(CmpKind::GtEq, MdId(ops[5]))
        };

        vec![
            with_ordering(MdId::BOOL, "bool", [91, 85, 58, 1694, 59, 1695]),
            with_ordering(MdId::INT8, "int8", [410, 411, 412, 414, 413, 415]),
            with_ordering(MdId::INT4, "int4", [96, 518, 97, 523, 521, 525]),
            with_ordering(MdId::TEXT, "text", [98, 531, 664, 665, 666, 667]),
            with_ordering(MdId::OID, "oid", [607, 608, 609, 611, 610, 612]),
        ]
    }
}
