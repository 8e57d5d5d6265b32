use crate::error::OptResult;
use crate::expression::ExprRef;
use crate::operator::{LogicalOperator, Operator, OperatorKind};
use crate::optimizer::OptimizerContext;
use crate::rules::limit_to_index_get::{add_index_scans, limit_promise};
use crate::rules::utils::{conjuncts, expect_kind, expect_logical};
use crate::rules::{ExprHandle, NodeMatch, Pattern, Promise, Rule, RuleId, RuleResult};

/// Index scan alternatives for a limit over a filtered or projected table scan.
///
/// ```text
/// Limit(Select(Get, pred), ..)  => Limit(IndexGet(pred on keys) [Select(rest)], ..)
/// Limit(Project(Get, list), ..) => Limit(Project(IndexGet(true), list), ..)
/// ```
#[derive(Clone, Debug)]
pub struct ProjectSelectBelowLimitToIndexGetRule {
    pattern: Pattern,
}

impl ProjectSelectBelowLimitToIndexGetRule {
    pub fn new() -> Self {
        Self {
            pattern: Pattern::operator(
                OperatorKind::Limit,
                vec![
                    Pattern::node(
                        NodeMatch::ProjectOrSelect,
                        vec![Pattern::operator(OperatorKind::Get, vec![]), Pattern::Tree],
                    ),
                    Pattern::Leaf,
                    Pattern::Leaf,
                ],
            ),
        }
    }
}

impl Default for ProjectSelectBelowLimitToIndexGetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ProjectSelectBelowLimitToIndexGetRule {
    fn id(&self) -> RuleId {
        RuleId::ProjectSelectBelowLimitToIndexGet
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn promise(&self, handle: &ExprHandle<'_>) -> Promise {
        limit_promise(handle)
    }

    fn transform(
        &self,
        ctx: &OptimizerContext,
        expr: &ExprRef,
        result: &mut RuleResult,
    ) -> OptResult<()> {
        let limit = expect_logical!(expr, Limit, as_limit)?;
        let decoration = expr.child(0);
        let get = expect_logical!(decoration.child(0), Get, as_get)?;

        match decoration.operator() {
            Operator::Logical(LogicalOperator::Select) => {
                let predicates = conjuncts(decoration.child(1));
                add_index_scans(ctx, expr, limit, get, &predicates, None, result)
            }
            _ => {
                expect_kind(decoration, OperatorKind::Project)?;
                add_index_scans(ctx, expr, limit, get, &[], Some(decoration.child(1)), result)
            }
        }
    }
}
