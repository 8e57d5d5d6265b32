use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use derive_more::{Display, From};

use crate::metadata::MdId;

pub const DEFAULT_TYPE_MODIFIER: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display(fmt = "{}", _0)]
pub struct ColumnId(pub u32);

#[derive(Debug)]
struct Column {
    id: ColumnId,
    name: String,
    type_mdid: MdId,
    type_modifier: i32,
}

/// Handle to a query column slot.
///
/// Two handles are equal only when they come from the same
/// [`ColumnFactory::create_column`] call; neither names nor ids are compared,
/// since ids are only unique within one factory. Cloning a handle shares the
/// slot.
#[derive(Clone)]
pub struct ColumnRef(Arc<Column>);

impl ColumnRef {
    pub fn id(&self) -> ColumnId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn type_mdid(&self) -> MdId {
        self.0.type_mdid
    }

    pub fn type_modifier(&self) -> i32 {
        self.0.type_modifier
    }
}

impl PartialEq for ColumnRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ColumnRef {}

impl Hash for ColumnRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state)
    }
}

impl fmt::Debug for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.0.name, self.0.id)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.0.name, self.0.id)
    }
}

/// Allocates column handles with fresh identities.
///
/// Shared by every rule invocation of an optimization pass, possibly from
/// several threads at once.
#[derive(Debug, Default)]
pub struct ColumnFactory {
    next_id: AtomicU32,
}

impl ColumnFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a computed column named after its id.
    pub fn create_column(&self, type_mdid: MdId, type_modifier: i32) -> ColumnRef {
        let id = self.next_id();
        Self::build(id, format!("ColRef_{:04}", id.0), type_mdid, type_modifier)
    }

    pub fn create_named_column<S: Into<String>>(
        &self,
        name: S,
        type_mdid: MdId,
        type_modifier: i32,
    ) -> ColumnRef {
        let id = self.next_id();
        Self::build(id, name.into(), type_mdid, type_modifier)
    }

    fn next_id(&self) -> ColumnId {
        ColumnId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn build(id: ColumnId, name: String, type_mdid: MdId, type_modifier: i32) -> ColumnRef {
        ColumnRef(Arc::new(Column {
            id,
            name,
            type_mdid,
            type_modifier,
        }))
    }
}
