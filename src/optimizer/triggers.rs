use std::collections::HashSet;

use crate::metadata::MdId;
use crate::operator::DmlKind;

/// Answers whether a relation has before row triggers for a DML kind.
pub trait TriggerLookup: Send + Sync {
    fn before_triggers_exist(&self, relation: MdId, kind: DmlKind) -> bool;
}

/// No relation has triggers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTriggers;

impl TriggerLookup for NoTriggers {
    fn before_triggers_exist(&self, _relation: MdId, _kind: DmlKind) -> bool {
        false
    }
}

/// Fixed set of registered triggers.
#[derive(Clone, Debug, Default)]
pub struct StaticTriggers {
    before: HashSet<(MdId, DmlKind)>,
}

impl StaticTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_before(mut self, relation: MdId, kind: DmlKind) -> Self {
        self.before.insert((relation, kind));
        self
    }
}

impl TriggerLookup for StaticTriggers {
    fn before_triggers_exist(&self, relation: MdId, kind: DmlKind) -> bool {
        self.before.contains(&(relation, kind))
    }
}
