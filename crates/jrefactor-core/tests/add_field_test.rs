//! Integration tests for adding fields to classes

use jrefactor_core::lst::ModifierKind;
use jrefactor_core::{
    FieldSpec, InsertPosition, MutationEngine, ScopedEdit, StyleConfiguration, StyleInference,
    parse_compilation_unit, render,
};

fn engine() -> MutationEngine {
    MutationEngine::new(StyleInference::new(&StyleConfiguration::default()))
}

fn list_field() -> FieldSpec {
    FieldSpec::new("java.util.List", "list")
        .with_modifiers([ModifierKind::Private])
        .with_initializer("new ArrayList<>()")
}

fn add_to_first_class(source: &str, field: FieldSpec) -> String {
    let unit = parse_compilation_unit(source).unwrap();
    let edit = ScopedEdit::add_field(unit.classes[0].id, field);
    let applied = engine().apply(&unit, &edit).unwrap();
    render(&applied.unit)
}

#[test]
fn test_field_into_empty_class_adds_import() {
    assert_eq!(
        add_to_first_class("class A {\n}", list_field()),
        "import java.util.List;\n\nclass A {\n    private List list = new ArrayList<>();\n}"
    );
}

#[test]
fn test_field_inherits_tab_indentation() {
    assert_eq!(
        add_to_first_class("class A {\n\tint x;\n}", list_field()),
        "import java.util.List;\n\nclass A {\n\tprivate List list = new ArrayList<>();\n\tint x;\n}"
    );
}

#[test]
fn test_field_inherits_two_space_indentation() {
    let source = "package p;\n\nclass A {\n  int x;\n\n  void m() {\n  }\n}\n";
    let field = FieldSpec::new("int", "count").at(InsertPosition::End);
    assert_eq!(
        add_to_first_class(source, field),
        "package p;\n\nclass A {\n  int x;\n\n  void m() {\n  }\n  int count;\n}\n"
    );
}

#[test]
fn test_field_inherits_unusual_indentation() {
    let source = "class A {\n           int x;\n}";
    assert_eq!(
        add_to_first_class(source, FieldSpec::new("int", "y")),
        "class A {\n           int y;\n           int x;\n}"
    );
}

#[test]
fn test_import_is_not_duplicated() {
    let unit = parse_compilation_unit("class A {\n}").unwrap();
    let engine = engine();

    let first = engine
        .apply(&unit, &ScopedEdit::add_field(unit.classes[0].id, list_field()))
        .unwrap();
    let class = first.unit.classes[0].id;
    let second = engine
        .apply(
            &first.unit,
            &ScopedEdit::add_field(class, FieldSpec::new("java.util.List", "other")),
        )
        .unwrap();

    let printed = render(&second.unit);
    assert_eq!(printed.matches("import java.util.List;").count(), 1);
    assert_eq!(second.unit.imports.len(), 1);
}

#[test]
fn test_wildcard_and_java_lang_need_no_import() {
    let source = "import java.util.*;\n\nclass A {\n    int x;\n}";
    let unit = parse_compilation_unit(source).unwrap();
    let edits = [
        ScopedEdit::add_field(unit.classes[0].id, FieldSpec::new("java.util.Map", "map")),
    ];
    let next = engine().apply_all(&unit, &edits).unwrap();
    assert_eq!(next.imports.len(), 1);

    let printed = add_to_first_class(source, FieldSpec::new("java.lang.String", "name"));
    assert_eq!(
        printed,
        "import java.util.*;\n\nclass A {\n    String name;\n    int x;\n}"
    );
}

#[test]
fn test_conflicting_simple_name_uses_qualified_type() {
    let source = "import java.awt.List;\n\nclass A {\n    int x;\n}";
    assert_eq!(
        add_to_first_class(source, FieldSpec::new("java.util.List", "items")),
        "import java.awt.List;\n\nclass A {\n    java.util.List items;\n    int x;\n}"
    );
}

#[test]
fn test_field_anchored_on_class_body() {
    let unit = parse_compilation_unit("class A {\n    int x;\n}").unwrap();
    let body = unit.classes[0].body.id;
    let applied = engine()
        .apply(
            &unit,
            &ScopedEdit::add_field(body, FieldSpec::new("long", "y").at(InsertPosition::End)),
        )
        .unwrap();
    assert_eq!(render(&applied.unit), "class A {\n    int x;\n    long y;\n}");
    assert_eq!(applied.inserted.len(), 1);
}

#[test]
fn test_field_into_single_line_class() {
    assert_eq!(
        add_to_first_class("class A {}", FieldSpec::new("int", "x")),
        "class A {\n    int x;\n}"
    );
}

#[test]
fn test_private_field_before_existing_member() {
    let field = || FieldSpec::new("java.util.List", "list").with_modifiers([ModifierKind::Private]);
    let source = "import java.util.List;\n\nclass A {\n\tList l;\n}";
    assert!(
        add_to_first_class(source, field()).ends_with("{\n\tprivate List list;\n\tList l;\n}")
    );

    let source = "import java.util.List;\n\nclass A {\n  List l;\n}";
    assert!(add_to_first_class(source, field()).ends_with("{\n  private List list;\n  List l;\n}"));
}

#[test]
fn test_crlf_file_keeps_crlf_line_breaks() {
    let source = "class A {\r\n    int x;\r\n}\r\n";
    assert_eq!(
        add_to_first_class(source, FieldSpec::new("int", "y").at(InsertPosition::End)),
        "class A {\r\n    int x;\r\n    int y;\r\n}\r\n"
    );
    assert_eq!(
        add_to_first_class(source, list_field()),
        "import java.util.List;\r\n\r\nclass A {\r\n    private List list = new ArrayList<>();\r\n    int x;\r\n}\r\n"
    );
}
