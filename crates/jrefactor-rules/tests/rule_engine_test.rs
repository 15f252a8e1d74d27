//! Integration tests for rules and the rule runner

use jrefactor_core::lst::ModifierKind;
use jrefactor_core::{FieldSpec, ImportSpec, parse_compilation_unit, render};
use jrefactor_rules::{AddField, AddImport, ChangeStringLiteral, Rule, RuleRunner};

#[test]
fn test_rules_are_idempotent() {
    let unit = parse_compilation_unit(
        "package app;\n\nclass Main {\n    void run() {\n        log(\"start\");\n    }\n}\n",
    )
    .unwrap();
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(AddImport::new(ImportSpec::new("java.util.Map"))),
        Box::new(AddField::new(
            "Main",
            FieldSpec::new("java.util.Map<String, Integer>", "counts")
                .with_modifiers([ModifierKind::Private, ModifierKind::Final])
                .with_initializer("new HashMap<>()"),
        )),
        Box::new(ChangeStringLiteral::new("start", "begin")),
    ];
    let runner = RuleRunner::default();

    let first = runner.run(&unit, &rules);
    assert!(first.is_ok());
    let printed = render(&first.unit);
    assert_eq!(
        printed,
        "package app;\n\nimport java.util.Map;\n\nclass Main {\n    private final Map<String, Integer> counts = new HashMap<>();\n    void run() {\n        log(\"begin\");\n    }\n}\n"
    );

    let second = runner.run(&first.unit, &rules);
    assert!(second.applied.is_empty());
    assert_eq!(render(&second.unit), printed);
}

#[test]
fn test_change_literal_preserves_everything_else() {
    let source = "class A {\n    /* keep */ String a =  /* inline */\"old\" ;\n    String b = \"older\";\n}\n";
    let unit = parse_compilation_unit(source).unwrap();
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(ChangeStringLiteral::new("old", "it's \"new\""))];
    let outcome = RuleRunner::default().run(&unit, &rules);
    assert_eq!(
        render(&outcome.unit),
        "class A {\n    /* keep */ String a =  /* inline */\"it's \\\"new\\\"\" ;\n    String b = \"older\";\n}\n"
    );
}
