//! Integration tests for indentation inference and configured fallbacks

use jrefactor_core::{
    ConfigLoader, FieldSpec, IndentStyle, InsertPosition, MutationEngine, ScopedEdit,
    StyleInference, parse_compilation_unit, render,
};
use std::fs;
use tempfile::TempDir;

fn insert_into_m(engine: &MutationEngine, source: &str) -> String {
    let unit = parse_compilation_unit(source).unwrap();
    let method = unit.classes[0].method_named("m").unwrap().id;
    let edit = ScopedEdit::insert_statement(method, InsertPosition::End, "go();");
    render(&engine.apply(&unit, &edit).unwrap().unit)
}

#[test]
fn test_configured_tabs_used_without_evidence() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".jrefactor.toml"),
        "[style]\nindentStyle = \"tabs\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load(None, Some(temp.path())).unwrap();
    assert_eq!(config.style.indent_style, IndentStyle::Tabs);

    let engine = MutationEngine::new(StyleInference::new(&config.style));
    let unit = parse_compilation_unit("class A {\n}").unwrap();
    let applied = engine
        .apply(
            &unit,
            &ScopedEdit::add_field(unit.classes[0].id, FieldSpec::new("int", "x")),
        )
        .unwrap();
    assert_eq!(render(&applied.unit), "class A {\n\tint x;\n}");
}

#[test]
fn test_evidence_beats_configuration() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("jrefactor.yaml"),
        "style:\n  indentStyle: tabs\n",
    )
    .unwrap();
    let config = ConfigLoader::load(None, Some(temp.path())).unwrap();
    let engine = MutationEngine::new(StyleInference::new(&config.style));

    insta::assert_snapshot!(
        insert_into_m(&engine, "class A {\n   void m() {\n   }\n}"),
        @r"
    class A {
       void m() {
          go();
       }
    }
    "
    );
}

#[test]
fn test_nested_depth_uses_inferred_unit() {
    let engine = MutationEngine::default();
    let source = "class A {\n  int x;\n\n  class B {\n    void m() {\n    }\n  }\n}";
    let unit = parse_compilation_unit(source).unwrap();
    let method = match unit.classes[0].body.statements[1].as_node() {
        jrefactor_core::NodeRef::ClassDecl(class) => class.method_named("m").unwrap().id,
        other => panic!("expected nested class, found {}", other.kind()),
    };

    let applied = engine
        .apply(
            &unit,
            &ScopedEdit::insert_statement(method, InsertPosition::Start, "go();"),
        )
        .unwrap();
    assert_eq!(
        render(&applied.unit),
        "class A {\n  int x;\n\n  class B {\n    void m() {\n      go();\n    }\n  }\n}"
    );
}
