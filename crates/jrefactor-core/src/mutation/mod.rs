//! Scoped edits
//!
//! A transformation is expressed as an anchor identity plus a semantic
//! description of the change. The engine resolves the anchor in the current
//! tree, synthesizes new nodes, lets style inference format them, and
//! rebuilds the path to the root with structural sharing. The input tree is
//! never modified; a failed edit returns an error and no tree.

mod engine;
mod imports;
mod synth;

pub use engine::MutationEngine;
pub use imports::{TypeReference, plan_type_reference};
pub use synth::{field_declaration, statement_from_source};

use crate::lst::{CompilationUnit, ModifierKind, NodeId, Tree};
use std::sync::Arc;

/// Where a statement goes inside a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    #[default]
    Start,
    End,
    Before(NodeId),
    After(NodeId),
}

/// A field to add to a class body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub modifiers: Vec<ModifierKind>,
    /// Type name, fully qualified when it needs an import; may carry type
    /// arguments such as `java.util.List<String>`
    pub type_name: String,
    pub name: String,
    /// Initializer source fragment, without the `=`
    pub initializer: Option<String>,
    pub position: InsertPosition,
}

impl FieldSpec {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            modifiers: Vec::new(),
            type_name: type_name.into(),
            name: name.into(),
            initializer: None,
            position: InsertPosition::Start,
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = ModifierKind>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    pub fn at(mut self, position: InsertPosition) -> Self {
        self.position = position;
        self
    }
}

/// An import to add to a compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportSpec {
    pub qualified_name: String,
    pub is_static: bool,
}

impl ImportSpec {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            is_static: false,
        }
    }

    pub fn new_static(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            is_static: true,
        }
    }
}

/// What a scoped edit does at its anchor
#[derive(Debug, Clone)]
pub enum EditDescriptor {
    /// Anchor: a class declaration or its body
    AddField(FieldSpec),
    /// Anchor: the compilation unit
    AddImport(ImportSpec),
    /// Anchor: a block, or a class or method whose body is used
    InsertStatement {
        position: InsertPosition,
        source: String,
    },
    /// Anchor: the statement to remove
    RemoveStatement,
    /// Anchor: the node to replace
    ReplaceNode { replacement: Tree, keep_prefix: bool },
}

impl EditDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            EditDescriptor::AddField(_) => "add-field",
            EditDescriptor::AddImport(_) => "add-import",
            EditDescriptor::InsertStatement { .. } => "insert-statement",
            EditDescriptor::RemoveStatement => "remove-statement",
            EditDescriptor::ReplaceNode { .. } => "replace-node",
        }
    }
}

/// An anchor identity paired with the change to make there
#[derive(Debug, Clone)]
pub struct ScopedEdit {
    pub anchor: NodeId,
    pub descriptor: EditDescriptor,
}

impl ScopedEdit {
    pub fn new(anchor: NodeId, descriptor: EditDescriptor) -> Self {
        Self { anchor, descriptor }
    }

    pub fn add_field(anchor: NodeId, field: FieldSpec) -> Self {
        Self::new(anchor, EditDescriptor::AddField(field))
    }

    pub fn add_import(anchor: NodeId, import: ImportSpec) -> Self {
        Self::new(anchor, EditDescriptor::AddImport(import))
    }

    pub fn insert_statement(
        anchor: NodeId,
        position: InsertPosition,
        source: impl Into<String>,
    ) -> Self {
        Self::new(
            anchor,
            EditDescriptor::InsertStatement {
                position,
                source: source.into(),
            },
        )
    }

    pub fn remove_statement(anchor: NodeId) -> Self {
        Self::new(anchor, EditDescriptor::RemoveStatement)
    }

    pub fn replace(anchor: NodeId, replacement: Tree, keep_prefix: bool) -> Self {
        Self::new(
            anchor,
            EditDescriptor::ReplaceNode {
                replacement,
                keep_prefix,
            },
        )
    }
}

/// Result of applying one scoped edit
#[derive(Debug, Clone)]
pub struct Applied {
    pub unit: Arc<CompilationUnit>,
    /// Identity of the anchor in the new tree; `None` when the edit removed it
    pub anchor: Option<NodeId>,
    /// Identities of synthesized nodes, imports included
    pub inserted: Vec<NodeId>,
}
