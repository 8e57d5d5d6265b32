//! Expression-shaped templates deciding whether a rule applies.
//!
//! Matching is structural only. Derived properties are the business of a rule's
//! promise.

use enumset::{enum_set, EnumSet};
use strum::IntoEnumIterator;

use crate::expression::Expression;
use crate::operator::OperatorKind;

/// Named set of operator kinds accepted by a [`Pattern::Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeMatch {
    ProjectOrSelect,
    AnyLogical,
    AnyScalar,
}

impl NodeMatch {
    pub fn kinds(&self) -> EnumSet<OperatorKind> {
        match self {
            NodeMatch::ProjectOrSelect => enum_set!(OperatorKind::Project | OperatorKind::Select),
            NodeMatch::AnyLogical => OperatorKind::iter().filter(|k| k.is_logical()).collect(),
            NodeMatch::AnyScalar => OperatorKind::iter().filter(|k| k.is_scalar()).collect(),
        }
    }

    pub fn accepts(&self, kind: OperatorKind) -> bool {
        self.kinds().contains(kind)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Any single expression. Its children are not looked at.
    Leaf,
    /// Any expression together with its whole subtree.
    Tree,
    /// Any operator accepted by the node match, with matching children.
    Node(NodeMatch, Vec<Pattern>),
    /// Exactly this operator kind, with matching children.
    Operator(OperatorKind, Vec<Pattern>),
}

impl Pattern {
    pub fn operator(kind: OperatorKind, children: Vec<Pattern>) -> Self {
        Pattern::Operator(kind, children)
    }

    pub fn node(node_match: NodeMatch, children: Vec<Pattern>) -> Self {
        Pattern::Node(node_match, children)
    }

    pub fn matches(&self, expr: &Expression) -> bool {
        matches(self, expr)
    }
}

pub fn matches(pattern: &Pattern, expr: &Expression) -> bool {
    match pattern {
        Pattern::Leaf | Pattern::Tree => true,
        Pattern::Node(node_match, children) => {
            node_match.accepts(expr.kind()) && children_match(children, expr)
        }
        Pattern::Operator(kind, children) => {
            *kind == expr.kind() && children_match(children, expr)
        }
    }
}

fn children_match(patterns: &[Pattern], expr: &Expression) -> bool {
    patterns.len() == expr.arity()
        && patterns
            .iter()
            .zip(expr.children())
            .all(|(pattern, child)| matches(pattern, child))
}
