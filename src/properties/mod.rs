//! Properties of expressions and of the data they produce.

mod distribution;
pub use distribution::*;
mod order;
pub use order::*;
mod logical;
pub use logical::*;
