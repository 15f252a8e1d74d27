//! Integration tests for scoped edits, identity and structural sharing

use jrefactor_core::lst::{Statement, TypeTree};
use jrefactor_core::visitor::collect_literals;
use jrefactor_core::{
    ErrorKind, FieldSpec, Formatting, ImportSpec, InsertPosition, MutationEngine, NodeRef,
    ScopedEdit, StyleConfiguration, StyleInference, Tree, parse_compilation_unit,
    parse_expression, print_trimmed, render,
};
use std::sync::Arc;

fn engine() -> MutationEngine {
    MutationEngine::new(StyleInference::new(&StyleConfiguration::default()))
}

const TWO_CLASSES: &str = "class A {\n    int a;\n}\n\nclass B {\n    int b;\n}\n";

const METHOD: &str = "class A {\n    void m() {\n        a();\n        b();\n    }\n}";

#[test]
fn test_untouched_input_prints_unchanged() {
    let source = "// lead\npackage p;\n\nimport a.B;\n\n/** Doc */\npublic class A   extends B {\n\tprivate int x=1 ;\n\n\tvoid m( int y ) { while(y>0) y--; }\n}\n\n";
    let unit = parse_compilation_unit(source).unwrap();
    assert_eq!(render(&unit), source);
}

#[test]
fn test_disjoint_edits_commute() {
    let unit = parse_compilation_unit(TWO_CLASSES).unwrap();
    let on_a = ScopedEdit::add_field(unit.classes[0].id, FieldSpec::new("int", "x"));
    let on_b = ScopedEdit::add_field(unit.classes[1].id, FieldSpec::new("java.lang.String", "y"));
    let engine = engine();

    let ab = engine
        .apply_all(&unit, &[on_a.clone(), on_b.clone()])
        .unwrap();
    let ba = engine.apply_all(&unit, &[on_b, on_a]).unwrap();

    assert_eq!(render(&ab), render(&ba));
    assert_eq!(
        render(&ab),
        "class A {\n    int x;\n    int a;\n}\n\nclass B {\n    String y;\n    int b;\n}\n"
    );
}

#[test]
fn test_disjoint_edits_with_imports_commute() {
    let unit = parse_compilation_unit(TWO_CLASSES).unwrap();
    let on_a = ScopedEdit::add_field(unit.classes[0].id, FieldSpec::new("java.util.List", "x"));
    let on_b = ScopedEdit::add_field(unit.classes[1].id, FieldSpec::new("java.util.Map", "y"));
    let engine = engine();

    let ab = engine
        .apply_all(&unit, &[on_a.clone(), on_b.clone()])
        .unwrap();
    let ba = engine.apply_all(&unit, &[on_b, on_a]).unwrap();

    assert_eq!(render(&ab), render(&ba));
    assert_eq!(
        render(&ab),
        "import java.util.List;\nimport java.util.Map;\n\nclass A {\n    List x;\n    int a;\n}\n\nclass B {\n    Map y;\n    int b;\n}\n"
    );
}

#[test]
fn test_stale_anchor_is_rejected() {
    let unit = parse_compilation_unit(TWO_CLASSES).unwrap();
    let old_a = unit.classes[0].id;
    let engine = engine();

    let applied = engine
        .apply(&unit, &ScopedEdit::add_field(old_a, FieldSpec::new("int", "x")))
        .unwrap();
    assert_ne!(applied.anchor, Some(old_a));

    let err = engine
        .apply(
            &applied.unit,
            &ScopedEdit::add_field(old_a, FieldSpec::new("int", "z")),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AnchorNotFound);
    assert!(err.is_recoverable());
}

#[test]
fn test_untouched_subtrees_are_shared() {
    let unit = parse_compilation_unit(TWO_CLASSES).unwrap();
    let applied = engine()
        .apply(
            &unit,
            &ScopedEdit::add_field(unit.classes[0].id, FieldSpec::new("int", "x")),
        )
        .unwrap();

    assert!(Arc::ptr_eq(&unit.classes[1], &applied.unit.classes[1]));
    assert!(!Arc::ptr_eq(&unit.classes[0], &applied.unit.classes[0]));
    assert_eq!(applied.unit.id, unit.id);

    let old_field = &unit.classes[0].body.statements[0];
    let new_field = &applied.unit.classes[0].body.statements[1];
    assert_eq!(old_field.id(), new_field.id());
    assert_eq!(render(&unit), TWO_CLASSES);
}

#[test]
fn test_insert_remove_and_positions() {
    let unit = parse_compilation_unit(METHOD).unwrap();
    let method = unit.classes[0].method_named("m").unwrap();
    let body = method.body_block().unwrap();
    let first = body.statements[0].id();
    let engine = engine();

    let inserted = engine
        .apply(
            &unit,
            &ScopedEdit::insert_statement(method.id, InsertPosition::After(first), "x = 1;"),
        )
        .unwrap();
    assert_eq!(
        render(&inserted.unit),
        "class A {\n    void m() {\n        a();\n        x = 1;\n        b();\n    }\n}"
    );

    let removed = engine
        .apply(&unit, &ScopedEdit::remove_statement(first))
        .unwrap();
    assert_eq!(
        render(&removed.unit),
        "class A {\n    void m() {\n        b();\n    }\n}"
    );
    assert_eq!(removed.anchor, None);
}

#[test]
fn test_insert_into_nested_empty_body() {
    let unit = parse_compilation_unit("class A {\n    int x;\n\n    void m() {}\n}").unwrap();
    let method = unit.classes[0].method_named("m").unwrap().id;
    let applied = engine()
        .apply(
            &unit,
            &ScopedEdit::insert_statement(method, InsertPosition::Start, "run();"),
        )
        .unwrap();
    assert_eq!(
        render(&applied.unit),
        "class A {\n    int x;\n\n    void m() {\n        run();\n    }\n}"
    );
}

#[test]
fn test_comment_stays_with_its_statement() {
    let source = "class A {\n    void m() {\n        // explains a\n        a();\n    }\n}";
    let unit = parse_compilation_unit(source).unwrap();
    let method = unit.classes[0].method_named("m").unwrap().id;
    let applied = engine()
        .apply(
            &unit,
            &ScopedEdit::insert_statement(method, InsertPosition::Start, "setup();"),
        )
        .unwrap();
    assert_eq!(
        render(&applied.unit),
        "class A {\n    void m() {\n        setup();\n        // explains a\n        a();\n    }\n}"
    );
}

#[test]
fn test_replace_keeps_prefix_when_asked() {
    let unit = parse_compilation_unit("class A {\n    int x =   1;\n}").unwrap();
    let literal = collect_literals(NodeRef::CompilationUnit(&unit))[0].id;
    let engine = engine();

    let kept = engine
        .replace(&unit, literal, Tree::from(parse_expression("2").unwrap()))
        .unwrap();
    assert_eq!(render(&kept), "class A {\n    int x =   2;\n}");

    let replacement = parse_expression("3").unwrap().with_formatting(Formatting::space());
    let raw = engine
        .apply(
            &unit,
            &ScopedEdit::replace(literal, Tree::from(replacement), false),
        )
        .unwrap();
    assert_eq!(render(&raw.unit), "class A {\n    int x = 3;\n}");
}

#[test]
fn test_replace_with_wrong_kind_is_malformed() {
    let unit = parse_compilation_unit("class A {\n    int x = 1;\n}").unwrap();
    let literal = collect_literals(NodeRef::CompilationUnit(&unit))[0].id;
    let wrong = Tree::from(TypeTree::new("int", Formatting::empty()));
    let err = engine().replace(&unit, literal, wrong).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedTree);
}

#[test]
fn test_add_import_edit() {
    let unit = parse_compilation_unit("package p;\n\nimport a.B;\n\nclass A {}\n").unwrap();
    let engine = engine();
    let edit = ScopedEdit::add_import(unit.id, ImportSpec::new_static("a.B.helper"));
    let applied = engine.apply(&unit, &edit).unwrap();
    assert_eq!(
        render(&applied.unit),
        "package p;\n\nimport a.B;\nimport static a.B.helper;\n\nclass A {}\n"
    );

    let again = engine.apply(&applied.unit, &edit).unwrap();
    assert!(again.inserted.is_empty());
    assert!(Arc::ptr_eq(&again.unit, &applied.unit));
}

#[test]
fn test_print_trimmed_keeps_statement_spacing() {
    let source = "class A {\n    void m() {\n        while ( true ) { }\n        while(true) test();\n    }\n}";
    let unit = parse_compilation_unit(source).unwrap();
    let body = unit.classes[0].method_named("m").unwrap().body_block().unwrap();
    let printed: Vec<String> = body
        .statements
        .iter()
        .map(|s: &Statement| print_trimmed(s.as_node()))
        .collect();
    assert_eq!(printed, vec!["while ( true ) { }", "while(true) test();"]);
}

#[test]
fn test_parse_error_in_fragment_leaves_tree() {
    let unit = parse_compilation_unit(METHOD).unwrap();
    let method = unit.classes[0].method_named("m").unwrap().id;
    let err = engine()
        .apply(
            &unit,
            &ScopedEdit::insert_statement(method, InsertPosition::End, "for (;;) {}"),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(render(&unit), METHOD);
}
