//! Planner hints carried in the optimizer configuration.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum MotionType {
    Broadcast,
    Redistribute,
}

/// Requests a specific motion for the relations named by `aliases`.
///
/// Aliases are kept sorted so that two hints naming the same relations compare
/// equal regardless of the order they were written in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMotionHint")]
pub struct MotionHint {
    aliases: Vec<String>,
    motion_type: MotionType,
}

#[derive(Deserialize)]
struct RawMotionHint {
    aliases: Vec<String>,
    motion_type: MotionType,
}

impl From<RawMotionHint> for MotionHint {
    fn from(raw: RawMotionHint) -> Self {
        MotionHint::new(raw.aliases, raw.motion_type)
    }
}

impl MotionHint {
    pub fn new<I, S>(aliases: I, motion_type: MotionType) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        aliases.sort();
        Self {
            aliases,
            motion_type,
        }
    }

    pub fn alias_names(&self) -> &[String] {
        &self.aliases
    }

    pub fn motion_type(&self) -> MotionType {
        self.motion_type
    }
}

impl fmt::Display for MotionHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MotionHint:  {}({})",
            self.motion_type,
            self.aliases.iter().join(",")
        )
    }
}
