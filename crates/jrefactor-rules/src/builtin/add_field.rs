//! Adds a field to every class with a given name

use crate::rule::Rule;
use jrefactor_core::lst::{ClassDecl, CompilationUnit, NodeRef};
use jrefactor_core::visitor::collect;
use jrefactor_core::{FieldSpec, Result, ScopedEdit};

pub const ADD_FIELD: &str = "java/add-field";

#[derive(Debug, Clone)]
pub struct AddField {
    pub class_name: String,
    pub field: FieldSpec,
}

impl AddField {
    pub fn new(class_name: impl Into<String>, field: FieldSpec) -> Self {
        Self {
            class_name: class_name.into(),
            field,
        }
    }

    fn declares_field(&self, class: &ClassDecl) -> bool {
        class
            .fields()
            .any(|decl| decl.names().any(|name| name == self.field.name))
    }
}

impl Rule for AddField {
    fn id(&self) -> &str {
        ADD_FIELD
    }

    fn description(&self) -> &str {
        "Add a field to a class, importing its type when needed"
    }

    fn scan(&self, unit: &CompilationUnit) -> Result<Vec<ScopedEdit>> {
        let mut edits = Vec::new();
        for top in &unit.classes {
            let matches = collect(NodeRef::ClassDecl(top), |node| {
                matches!(node, NodeRef::ClassDecl(class) if class.name.name == self.class_name)
            });
            for node in matches {
                let NodeRef::ClassDecl(class) = node else {
                    continue;
                };
                if self.declares_field(class) {
                    tracing::debug!(
                        class = %self.class_name,
                        field = %self.field.name,
                        "Field already declared"
                    );
                    continue;
                }
                edits.push(ScopedEdit::add_field(class.id, self.field.clone()));
            }
        }
        Ok(edits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jrefactor_core::parse_compilation_unit;

    #[test]
    fn test_targets_nested_classes_by_name() {
        let unit = parse_compilation_unit(
            "class Outer {\n    class Target {\n    }\n}\n\nclass Target {\n}\n",
        )
        .unwrap();
        let rule = AddField::new("Target", FieldSpec::new("int", "x"));
        assert_eq!(rule.scan(&unit).unwrap().len(), 2);
    }

    #[test]
    fn test_existing_field_is_left_alone() {
        let unit = parse_compilation_unit("class A {\n    int y, x;\n}").unwrap();
        let rule = AddField::new("A", FieldSpec::new("long", "x"));
        assert!(rule.scan(&unit).unwrap().is_empty());
    }
}
