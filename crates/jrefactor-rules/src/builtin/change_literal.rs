//! Rewrites string literals with a given value

use crate::rule::Rule;
use jrefactor_core::lst::{CompilationUnit, Literal, LiteralKind, NodeId, NodeRef, Tree};
use jrefactor_core::visitor::collect_literals;
use jrefactor_core::{Result, ScopedEdit};

pub const CHANGE_STRING_LITERAL: &str = "java/change-string-literal";

/// Replaces every string literal whose value is `from` by one whose value is
/// `to`
///
/// Only the literal token changes; its surrounding whitespace and comments
/// stay as they were.
#[derive(Debug, Clone)]
pub struct ChangeStringLiteral {
    pub from: String,
    pub to: String,
}

impl ChangeStringLiteral {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Rule for ChangeStringLiteral {
    fn id(&self) -> &str {
        CHANGE_STRING_LITERAL
    }

    fn description(&self) -> &str {
        "Change the value of matching string literals"
    }

    fn scan(&self, unit: &CompilationUnit) -> Result<Vec<ScopedEdit>> {
        if self.from == self.to {
            return Ok(Vec::new());
        }

        let mut edits = Vec::new();
        for class in &unit.classes {
            for literal in collect_literals(NodeRef::ClassDecl(class)) {
                if literal.string_value().as_deref() != Some(self.from.as_str()) {
                    continue;
                }
                let replacement = Literal {
                    id: NodeId::next(),
                    fmt: literal.fmt.clone(),
                    kind: LiteralKind::String,
                    source: Literal::quote(&self.to),
                };
                edits.push(ScopedEdit::replace(literal.id, Tree::from(replacement), true));
            }
        }
        Ok(edits)
    }
}
