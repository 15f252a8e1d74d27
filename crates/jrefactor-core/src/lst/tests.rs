use super::*;
use std::sync::Arc;

fn ident(name: &str, prefix: &str) -> Arc<Identifier> {
    Arc::new(Identifier::new(name, Formatting::parsed(prefix)))
}

fn call_statement(name: &str, prefix: &str) -> Statement {
    Statement::Expression(Arc::new(ExpressionStatement {
        id: NodeId::next(),
        fmt: Formatting::parsed(prefix),
        expression: Expression::MethodInvocation(Arc::new(MethodInvocation {
            id: NodeId::next(),
            fmt: Formatting::empty(),
            select: None,
            name: ident(name, ""),
            args: Container::empty(),
        })),
        terminator: Formatting::empty(),
    }))
}

fn block(statements: Vec<Statement>) -> Arc<Block> {
    Arc::new(Block {
        id: NodeId::next(),
        fmt: Formatting::parsed(" "),
        statements,
        end: Formatting::parsed("\n"),
    })
}

#[test]
fn test_pieces_of_expression_statement() {
    let statement = call_statement("test", "\n  ");
    let texts: Vec<String> = statement
        .as_node()
        .pieces()
        .into_iter()
        .map(|piece| match piece {
            Piece::Text(text) => text.to_string(),
            Piece::Node(node) => format!("<{}>", node.kind()),
        })
        .collect();
    assert_eq!(texts, vec!["<MethodInvocation>", ";"]);
}

#[test]
fn test_children_follow_source_order() {
    let body = block(vec![call_statement("a", "\n"), call_statement("b", "\n")]);
    let node = NodeRef::Block(&body);
    let children = node.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].id(), body.statements[0].id());
    assert_eq!(children[1].id(), body.statements[1].id());
}

#[test]
fn test_with_child_shares_siblings() {
    let body = block(vec![call_statement("a", "\n"), call_statement("b", "\n")]);
    let replacement = call_statement("c", "\n");
    let rebuilt = Tree::Block(Arc::clone(&body))
        .with_child(1, Tree::from(replacement.clone()))
        .unwrap()
        .into_block()
        .unwrap();

    assert_eq!(rebuilt.id, body.id);
    assert!(rebuilt.statements[0].as_node().same_node(body.statements[0].as_node()));
    assert_eq!(rebuilt.statements[1].id(), replacement.id());
}

#[test]
fn test_with_child_rejects_wrong_kind() {
    let body = block(vec![call_statement("a", "\n")]);
    let err = Tree::Block(body)
        .with_child(0, Tree::from(ident("x", "")))
        .unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::MalformedTree);
}

#[test]
fn test_with_child_rejects_bad_index() {
    let body = block(vec![call_statement("a", "\n")]);
    let err = Tree::Block(body)
        .with_child(3, Tree::from(call_statement("b", "\n")))
        .unwrap_err();
    assert!(err.to_string().contains("no child at index 3"));
}

#[test]
fn test_with_formatting_keeps_identity() {
    let statement = call_statement("a", "\n    ");
    let tree = Tree::from(statement.clone());
    let moved = tree.with_formatting(Formatting::synthesized("\n\t"));
    assert_eq!(moved.id(), statement.id());
    assert_eq!(moved.formatting().prefix, "\n\t");

    let fresh = tree.with_fresh_id();
    assert_ne!(fresh.id(), statement.id());
}

#[test]
fn test_type_tree_simple_name() {
    let ty = TypeTree::new("java.util.Map<String, java.util.List<Integer>>", Formatting::empty());
    assert_eq!(ty.simple_name(), "Map");
    assert_eq!(TypeTree::new("int[]", Formatting::empty()).simple_name(), "int");
}

#[test]
fn test_string_literal_value_round_trip() {
    let source = Literal::quote("say \"hi\"\n");
    let literal = Literal {
        id: NodeId::next(),
        fmt: Formatting::empty(),
        kind: LiteralKind::String,
        source,
    };
    assert_eq!(literal.string_value().as_deref(), Some("say \"hi\"\n"));
}

fn call_chain(links: usize) -> Expression {
    let mut expr = Expression::Identifier(ident("builder", ""));
    for _ in 0..links {
        expr = Expression::MethodInvocation(Arc::new(MethodInvocation {
            id: NodeId::next(),
            fmt: Formatting::empty(),
            select: Some(Padded::tight(expr)),
            name: ident("next", ""),
            args: Container::empty(),
        }));
    }
    expr
}

#[test]
fn test_dropping_deep_chains_does_not_overflow() {
    drop(call_chain(200_000));

    let mut body = block(Vec::new());
    for _ in 0..100_000 {
        body = block(vec![Statement::Block(body)]);
    }
    drop(body);
}

#[test]
fn test_dropping_one_version_keeps_shared_subtrees() {
    let shared = call_chain(3);
    let statement = |prefix: &str| {
        Statement::Expression(Arc::new(ExpressionStatement {
            id: NodeId::next(),
            fmt: Formatting::parsed(prefix),
            expression: shared.clone(),
            terminator: Formatting::empty(),
        }))
    };
    let old = block(vec![statement("\n")]);
    let new = block(vec![statement("\n    ")]);
    drop(old);

    let Statement::Expression(kept) = &new.statements[0] else {
        panic!("expected expression statement");
    };
    assert!(kept.expression.as_node().same_node(shared.as_node()));
    assert_eq!(
        crate::printer::print_node(kept.expression.as_node()),
        "builder.next().next().next()"
    );
}

fn string_literal(source: &str) -> Literal {
    Literal {
        id: NodeId::next(),
        fmt: Formatting::empty(),
        kind: LiteralKind::String,
        source: source.to_string(),
    }
}

#[test]
fn test_string_value_decodes_java_escapes() {
    let literal = string_literal(r#""A\b\f\101\7\s\'\\\uuu0042""#);
    assert_eq!(
        literal.string_value().as_deref(),
        Some("A\u{8}\u{c}A\u{7} '\\B")
    );

    let pair = string_literal(r#""\uD83D\uDE00!""#);
    assert_eq!(pair.string_value().as_deref(), Some("\u{1F600}!"));

    let octal = string_literal(r#""\0\12\3778""#);
    assert_eq!(octal.string_value().as_deref(), Some("\0\n\u{ff}8"));
}

#[test]
fn test_quote_escapes_control_characters() {
    assert_eq!(Literal::quote("a\u{8}b\u{1}"), r#""a\bb\u0001""#);
    let round = string_literal(&Literal::quote("tab\tbell\u{7}"));
    assert_eq!(round.string_value().as_deref(), Some("tab\tbell\u{7}"));
}
