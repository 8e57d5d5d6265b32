use serde::{Deserialize, Serialize};

/// How the rows of a table are spread across segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionPolicy {
    /// Hashed on the columns at the given table positions.
    Hashed(Vec<usize>),
    Random,
    Replicated,
    /// All rows on the coordinator.
    Singleton,
}

impl DistributionPolicy {
    /// Whether the column at `position` takes part in choosing a row's segment.
    pub fn is_key_column(&self, position: usize) -> bool {
        match self {
            DistributionPolicy::Hashed(keys) => keys.contains(&position),
            DistributionPolicy::Random
            | DistributionPolicy::Replicated
            | DistributionPolicy::Singleton => false,
        }
    }
}
