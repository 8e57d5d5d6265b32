//! Transformation rules.
//!
//! A rule declares a [`Pattern`] describing the fragments it understands, a
//! cheap [`Promise`] computed from derived properties, and a transform producing
//! alternatives for a matching, promising fragment. The search engine decides
//! which rules run and when; [`apply_rule`] is the single entry it calls.

use enum_dispatch::enum_dispatch;
use log::{debug, trace};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::error::OptResult;
use crate::expression::ExprRef;
use crate::optimizer::OptimizerContext;

mod handle;
pub use handle::*;
mod in_place_update_to_dml;
pub use in_place_update_to_dml::*;
mod index_order;
pub use index_order::*;
mod limit_to_index_get;
pub use limit_to_index_get::*;
mod pattern;
pub use pattern::*;
mod project_select_below_limit_to_index_get;
pub use project_select_below_limit_to_index_get::*;
mod update_to_dml;
pub use update_to_dml::*;
mod utils;
pub use utils::{conjuncts, index_key_columns};

/// Stable identifier of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr)]
#[repr(u32)]
pub enum RuleId {
    LimitToIndexGet = 0,
    ProjectSelectBelowLimitToIndexGet = 1,
    UpdateToDml = 2,
    InPlaceUpdateToDml = 3,
}

/// How worthwhile running a rule on a candidate is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Promise {
    /// The transform must not run.
    None,
    Low,
    High,
}

#[enum_dispatch]
pub trait Rule {
    fn id(&self) -> RuleId;

    fn name(&self) -> &'static str {
        self.id().into()
    }

    fn pattern(&self) -> &Pattern;

    fn promise(&self, handle: &ExprHandle<'_>) -> Promise;

    /// Adds the alternatives of `expr` to `result`.
    ///
    /// Only called when `expr` matches the pattern and the promise is not
    /// [`Promise::None`]. Adding nothing is a valid outcome.
    fn transform(
        &self,
        ctx: &OptimizerContext,
        expr: &ExprRef,
        result: &mut RuleResult,
    ) -> OptResult<()>;
}

#[enum_dispatch(Rule)]
#[derive(Clone, Debug)]
pub enum RuleImpl {
    LimitToIndexGetRule,
    ProjectSelectBelowLimitToIndexGetRule,
    UpdateToDmlRule,
    InPlaceUpdateToDmlRule,
}

impl RuleImpl {
    pub fn from_id(id: RuleId) -> Self {
        match id {
            RuleId::LimitToIndexGet => LimitToIndexGetRule::new().into(),
            RuleId::ProjectSelectBelowLimitToIndexGet => {
                ProjectSelectBelowLimitToIndexGetRule::new().into()
            }
            RuleId::UpdateToDml => UpdateToDmlRule::new().into(),
            RuleId::InPlaceUpdateToDml => InPlaceUpdateToDmlRule::new().into(),
        }
    }
}

/// One instance of every rule, in id order.
pub fn all_rules() -> Vec<RuleImpl> {
    RuleId::iter().map(RuleImpl::from_id).collect()
}

/// Alternatives produced by one rule invocation.
#[derive(Debug, Default)]
pub struct RuleResult {
    alternatives: Vec<ExprRef>,
}

impl RuleResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alternative after checking the arity of all its nodes.
    pub fn add(&mut self, expr: ExprRef) -> OptResult<()> {
        expr.validate()?;
        self.alternatives.push(expr);
        Ok(())
    }

    pub fn results(&self) -> impl Iterator<Item = &ExprRef> {
        self.alternatives.iter()
    }

    pub fn alternatives(&self) -> &[ExprRef] {
        &self.alternatives
    }

    pub fn into_alternatives(self) -> Vec<ExprRef> {
        self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// Runs `rule` on `expr`: pattern check, promise, then transform.
///
/// A pattern mismatch or a [`Promise::None`] gives an empty result. An input
/// whose nodes have the wrong number of children is rejected.
pub fn apply_rule<R: Rule + ?Sized>(
    rule: &R,
    ctx: &OptimizerContext,
    expr: &ExprRef,
) -> OptResult<RuleResult> {
    expr.validate()?;

    let mut result = RuleResult::new();
    if !rule.pattern().matches(expr) {
        trace!("Rule {} does not match {}", rule.name(), expr.operator());
        return Ok(result);
    }

    let promise = rule.promise(&ExprHandle::new(expr));
    if promise == Promise::None {
        trace!("Rule {} not promising for {}", rule.name(), expr.operator());
        return Ok(result);
    }

    rule.transform(ctx, expr, &mut result)?;
    debug!(
        "Rule {} produced {} alternatives for {}",
        rule.name(),
        result.len(),
        expr.operator()
    );
    Ok(result)
}
