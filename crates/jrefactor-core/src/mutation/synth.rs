//! Construction of new nodes from edit descriptions
//!
//! Synthesized nodes carry single-space separators between their own
//! tokens. The leading prefix of the node as a whole is left empty; the
//! engine replaces it with what style inference computes at the insertion
//! point.

use super::FieldSpec;
use crate::error::RefactorError;
use crate::lst::{
    Formatting, Identifier, Initializer, Modifier, NamedVariable, NodeId, Padded, Statement,
    TypeTree, VariableDecls,
};
use crate::parser::{parse_expression, parse_statement};
use crate::result::Result;
use std::sync::Arc;

/// Field declaration for `field`, spelling its type as `type_text`
pub fn field_declaration(field: &FieldSpec, type_text: &str) -> Result<VariableDecls> {
    if !is_identifier(&field.name) {
        return Err(RefactorError::malformed(format!(
            "'{}' is not a valid field name",
            field.name
        )));
    }
    if type_text.trim().is_empty() {
        return Err(RefactorError::malformed("field type must not be empty"));
    }

    let modifiers: Vec<Arc<Modifier>> = field
        .modifiers
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let fmt = if i == 0 {
                Formatting::synthesized("")
            } else {
                Formatting::space()
            };
            Arc::new(Modifier::new(*kind, fmt))
        })
        .collect();

    let type_fmt = if modifiers.is_empty() {
        Formatting::synthesized("")
    } else {
        Formatting::space()
    };

    let initializer = match field.initializer.as_deref() {
        Some(source) => {
            let value = parse_expression(source.trim())?;
            Some(Initializer {
                eq: Formatting::space(),
                value: value.with_formatting(Formatting::space()),
            })
        }
        None => None,
    };

    let variable = NamedVariable {
        id: NodeId::next(),
        fmt: Formatting::space(),
        name: Arc::new(Identifier::new(field.name.clone(), Formatting::synthesized(""))),
        initializer,
    };

    Ok(VariableDecls {
        id: NodeId::next(),
        fmt: Formatting::synthesized(""),
        modifiers,
        type_expr: Arc::new(TypeTree::new(type_text.trim(), type_fmt)),
        vars: vec![Padded::tight(Arc::new(variable))],
        terminator: Some(Formatting::synthesized("")),
    })
}

/// Statement parsed from a source fragment, stripped of surrounding trivia
pub fn statement_from_source(source: &str) -> Result<Statement> {
    let statement = parse_statement(source.trim())?;
    Ok(statement.with_formatting(Formatting::synthesized("")))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lst::{ModifierKind, NodeRef};
    use crate::printer::print_node;

    #[test]
    fn test_field_tokens_are_space_separated() {
        let field = FieldSpec::new("java.util.List", "list")
            .with_modifiers([ModifierKind::Private, ModifierKind::Final])
            .with_initializer("  new ArrayList<>() ");
        let decl = Arc::new(field_declaration(&field, "List").unwrap());

        assert_eq!(
            print_node(NodeRef::VariableDecls(&decl)),
            "private final List list = new ArrayList<>();"
        );
    }

    #[test]
    fn test_field_without_modifiers() {
        let field = FieldSpec::new("int", "count");
        let decl = Arc::new(field_declaration(&field, "int").unwrap());
        assert_eq!(print_node(NodeRef::VariableDecls(&decl)), "int count;");
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let field = FieldSpec::new("int", "1abc");
        assert!(field_declaration(&field, "int").is_err());
    }

    #[test]
    fn test_statement_fragment_is_stripped() {
        let statement = statement_from_source("\n   call(x);  // tail\n").unwrap();
        assert_eq!(statement.fmt().prefix, "");
        assert!(statement.fmt().is_synthesized());
    }
}
