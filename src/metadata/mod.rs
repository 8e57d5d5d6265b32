//! Metadata consumed by the rules.
//!
//! Everything in here is immutable for the duration of one optimization pass and
//! shared through `Arc`, so it can be read from several worker threads without
//! locking. The one mutable piece, [`ColumnFactory`], hands out fresh column ids
//! with an atomic counter.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

mod accessor;
pub use accessor::*;
mod column;
pub use column::*;
mod index;
pub use index::*;
mod table;
pub use table::*;
mod types;
pub use types::*;

/// Identifier of a catalog object (relation, index, type or operator).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
pub struct MdId(pub u32);

impl MdId {
    pub const BOOL: MdId = MdId(16);
    pub const INT8: MdId = MdId(20);
    pub const INT4: MdId = MdId(23);
    pub const TEXT: MdId = MdId(25);
    pub const OID: MdId = MdId(26);

    pub fn oid(&self) -> u32 {
        self.0
    }
}
