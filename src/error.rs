use thiserror::Error;

use crate::metadata::MdId;
use crate::operator::{Arity, OperatorKind};

/// Result type shared by every fallible operation of the rule layer.
///
/// Typed failures are raised as [`OptError`] and can be recovered from the
/// `anyhow::Error` with `downcast_ref::<OptError>()`.
pub type OptResult<T> = anyhow::Result<T>;

/// Failures that abort the current optimization attempt.
///
/// A rule that simply does not apply never produces one of these, it leaves
/// its result empty instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptError {
    #[error("operator {operator} expects {expected} children, got {actual}")]
    ArityMismatch {
        operator: OperatorKind,
        expected: Arity,
        actual: usize,
    },
    #[error("expected {expected} operator, found {found}")]
    UnexpectedOperator {
        expected: OperatorKind,
        found: OperatorKind,
    },
    #[error("metadata object {0} not found")]
    MetadataNotFound(MdId),
    #[error("update column images differ in length: {deletes} deleted vs {inserts} inserted")]
    ColumnListMismatch { deletes: usize, inserts: usize },
    #[error("builder did not produce the {0} column")]
    MissingOutputColumn(&'static str),
    #[error("allocation scope exhausted after {budget} expressions")]
    ResourceExhausted { budget: usize },
}
