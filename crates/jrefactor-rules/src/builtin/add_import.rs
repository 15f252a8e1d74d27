//! Ensures a compilation unit imports a name

use crate::rule::Rule;
use jrefactor_core::lst::CompilationUnit;
use jrefactor_core::{ImportSpec, Result, ScopedEdit};

pub const ADD_IMPORT: &str = "java/add-import";

#[derive(Debug, Clone)]
pub struct AddImport {
    pub import: ImportSpec,
}

impl AddImport {
    pub fn new(import: ImportSpec) -> Self {
        Self { import }
    }
}

impl Rule for AddImport {
    fn id(&self) -> &str {
        ADD_IMPORT
    }

    fn description(&self) -> &str {
        "Add an import unless the file already has it"
    }

    fn scan(&self, unit: &CompilationUnit) -> Result<Vec<ScopedEdit>> {
        let present = unit.imports.iter().any(|import| {
            import.is_static() == self.import.is_static
                && import.qualified_name() == self.import.qualified_name.trim()
        });
        if present {
            return Ok(Vec::new());
        }
        Ok(vec![ScopedEdit::add_import(unit.id, self.import.clone())])
    }
}
