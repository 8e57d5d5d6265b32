use serde::{Deserialize, Serialize};

use crate::hints::MotionHint;

/// Planner hints that change which alternatives the rules produce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerHint {
    /// Check NOT NULL and CHECK constraints on rows written by a split update.
    pub enforce_constraints_on_dml: bool,
    pub motion_hints: Vec<MotionHint>,
}

/// Optimizer-wide configuration, read-only during an optimization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub hint: OptimizerHint,
    /// Maximum number of expressions a single rule invocation may create.
    pub xform_node_budget: Option<usize>,
}

impl OptimizerConfig {
    pub fn with_enforce_constraints_on_dml(mut self, enforce: bool) -> Self {
        self.hint.enforce_constraints_on_dml = enforce;
        self
    }

    pub fn with_motion_hint(mut self, hint: MotionHint) -> Self {
        self.hint.motion_hints.push(hint);
        self
    }

    pub fn with_xform_node_budget(mut self, budget: usize) -> Self {
        self.xform_node_budget = Some(budget);
        self
    }

    pub fn enforce_constraints_on_dml(&self) -> bool {
        self.hint.enforce_constraints_on_dml
    }
}
