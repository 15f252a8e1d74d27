//! Declarative rule lists
//!
//! Rules can be described in JSON and turned into rule objects:
//!
//! ```json
//! [
//!   { "rule": "add-field", "className": "A",
//!     "field": { "modifiers": ["private"], "type": "java.util.List", "name": "items" } },
//!   { "rule": "add-import", "name": "java.util.Map" },
//!   { "rule": "change-string-literal", "from": "a", "to": "b" }
//! ]
//! ```

use crate::builtin::{AddField, AddImport, ChangeStringLiteral};
use crate::rule::Rule;
use anyhow::Context;
use jrefactor_core::lst::ModifierKind;
use jrefactor_core::{FieldSpec, ImportSpec, InsertPosition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// Field part of an `add-field` rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTemplate {
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub initializer: Option<String>,
    /// Append after the existing members instead of before them
    #[serde(default)]
    pub at_end: bool,
}

impl FieldTemplate {
    pub fn to_field(&self) -> Result<FieldSpec, SpecError> {
        let modifiers = self
            .modifiers
            .iter()
            .map(|m| {
                ModifierKind::from_keyword(m).ok_or_else(|| SpecError::UnknownModifier(m.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut field = FieldSpec::new(&self.type_name, &self.name).with_modifiers(modifiers);
        if let Some(init) = &self.initializer {
            field = field.with_initializer(init);
        }
        if self.at_end {
            field = field.at(InsertPosition::End);
        }
        Ok(field)
    }
}

/// One entry of a rule list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RuleSpec {
    AddField {
        class_name: String,
        field: FieldTemplate,
    },
    AddImport {
        name: String,
        #[serde(default)]
        is_static: bool,
    },
    ChangeStringLiteral {
        from: String,
        to: String,
    },
}

impl RuleSpec {
    pub fn build(&self) -> Result<Box<dyn Rule>, SpecError> {
        Ok(match self {
            RuleSpec::AddField { class_name, field } => {
                Box::new(AddField::new(class_name, field.to_field()?))
            }
            RuleSpec::AddImport { name, is_static } => Box::new(AddImport::new(ImportSpec {
                qualified_name: name.clone(),
                is_static: *is_static,
            })),
            RuleSpec::ChangeStringLiteral { from, to } => {
                Box::new(ChangeStringLiteral::new(from, to))
            }
        })
    }
}

/// Parse a JSON rule list into rules
pub fn rules_from_json(text: &str) -> anyhow::Result<Vec<Box<dyn Rule>>> {
    let specs: Vec<RuleSpec> = serde_json::from_str(text).context("invalid rule list")?;
    specs
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.build().with_context(|| format!("rule #{i}")))
        .collect()
}

/// Read a JSON rule list from `path`
pub fn load_rules(path: &Path) -> anyhow::Result<Vec<Box<dyn Rule>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rule list '{}'", path.display()))?;
    rules_from_json(&text).with_context(|| format!("in '{}'", path.display()))
}
