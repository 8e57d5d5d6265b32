//! ## Background
//!
//! A cost based optimizer explores the space of equivalent plans by applying transformation
//! rules to plan fragments. Each rule recognizes a fragment shape and produces zero or more
//! alternatives, logical or physical, which the search engine records and later costs. Which
//! rules run, and when, is the business of the search engine. This crate is the layer below
//! it: the expression model the rules work on, the pattern language they are keyed by, and
//! the rules themselves.
//!
//! ## Design
//!
//! ### Expressions
//!
//! An [`expression::Expression`] owns one [`operator::Operator`] and shares its children
//! through `Arc`. Expressions are immutable once built, so an alternative can reuse any
//! subtree of its input by cloning the handle, and the input and its alternatives can be
//! inspected from several worker threads at once.
//!
//! ### Rules
//!
//! A [`rules::Rule`] declares a [`rules::Pattern`], a promise computed from derived
//! properties and a transform. [`rules::apply_rule`] chains the three. Two families of rules
//! are provided:
//!
//! * index scans under an ordered limit, which replace a table scan with a scan of an index
//!   delivering the required order, forward or backward;
//! * DML lowering, which turns a logical update into a DML step, splitting rows into a delete
//!   and an insert when a distribution key column changes.
//!
//! Everything a rule consults besides its input comes from the
//! [`optimizer::OptimizerContext`] passed to it.
//!
//! ## Reference
//!
//! 1. Graefe, G., 1995. The cascades framework for query optimization. IEEE Data Eng. Bull., 18(3),
//! pp.19-29.
//! 2. Soliman, M. A., et al. "Orca: a modular query optimizer architecture for big data."
//! Proceedings of the 2014 ACM SIGMOD international conference on Management of data. 2014.

pub mod common;
pub mod error;
pub mod expression;
pub mod hints;
pub mod metadata;
pub mod operator;
pub mod optimizer;
pub mod properties;
pub mod rules;
