//! Applying scoped edits
//!
//! Every edit resolves its anchor to a path from the root, produces a new
//! node at some step of that path, and rebuilds the path upward with
//! [`Tree::with_child`]. Untouched subtrees are shared with the input.
//!
//! Identity: the anchor and every rebuilt node between it and the edit site
//! get fresh identities, so an identity taken before the edit no longer
//! resolves to changed content. Ancestors above the anchor keep theirs, as
//! does the compilation unit itself. Nodes whose prefix is merely shifted
//! keep their identity.

use super::imports::{plan_type_reference, with_import};
use super::synth::{field_declaration, statement_from_source};
use super::{Applied, EditDescriptor, FieldSpec, ImportSpec, InsertPosition, ScopedEdit};
use crate::error::RefactorError;
use crate::lst::{Block, CompilationUnit, NodeId, NodeRef, Statement, Tree};
use crate::result::Result;
use crate::style::StyleInference;
use crate::visitor::{NodePath, find_path};
use std::sync::Arc;

/// Applies scoped edits to immutable trees
#[derive(Debug, Clone, Default)]
pub struct MutationEngine {
    style: StyleInference,
}

impl MutationEngine {
    pub fn new(style: StyleInference) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StyleInference {
        &self.style
    }

    /// Apply one edit, returning the new tree
    ///
    /// On error the input is untouched and nothing is returned.
    pub fn apply(&self, unit: &Arc<CompilationUnit>, edit: &ScopedEdit) -> Result<Applied> {
        tracing::debug!(anchor = %edit.anchor, edit = edit.descriptor.name(), "Applying edit");

        let root = NodeRef::CompilationUnit(unit);
        let path = find_path(root, edit.anchor)
            .ok_or_else(|| RefactorError::anchor_not_found(edit.anchor))?;

        match &edit.descriptor {
            EditDescriptor::AddField(field) => self.add_field(unit, &path, field),
            EditDescriptor::AddImport(import) => add_import(unit, &path, import),
            EditDescriptor::InsertStatement { position, source } => {
                let statement = statement_from_source(source)?;
                let block_path = body_path(&path)?;
                self.insert(&block_path, path.len() - 1, *position, statement)
            }
            EditDescriptor::RemoveStatement => remove(&path),
            EditDescriptor::ReplaceNode {
                replacement,
                keep_prefix,
            } => replace(&path, replacement, *keep_prefix),
        }
    }

    /// Apply edits in order, each against the result of the previous one
    pub fn apply_all(
        &self,
        unit: &Arc<CompilationUnit>,
        edits: &[ScopedEdit],
    ) -> Result<Arc<CompilationUnit>> {
        let mut current = unit.clone();
        for edit in edits {
            current = self.apply(&current, edit)?.unit;
        }
        Ok(current)
    }

    /// Replace the node with identity `target`, keeping its prefix
    pub fn replace(
        &self,
        unit: &Arc<CompilationUnit>,
        target: NodeId,
        replacement: Tree,
    ) -> Result<Arc<CompilationUnit>> {
        let edit = ScopedEdit::replace(target, replacement, true);
        Ok(self.apply(unit, &edit)?.unit)
    }

    fn add_field(
        &self,
        unit: &Arc<CompilationUnit>,
        path: &NodePath<'_>,
        field: &FieldSpec,
    ) -> Result<Applied> {
        let block_path = match path.target() {
            Some(NodeRef::ClassDecl(_)) => body_path(path)?,
            Some(NodeRef::Block(_)) if matches!(path.parent(), Some(NodeRef::ClassDecl(_))) => {
                path.clone()
            }
            other => {
                return Err(RefactorError::malformed(format!(
                    "a field can only be added to a class, found {}",
                    describe(other)
                )));
            }
        };

        let plan = plan_type_reference(unit, &field.type_name);
        let decl = field_declaration(field, &plan.text)?;
        let statement = Statement::Variables(Arc::new(decl));
        let mut applied = self.insert(&block_path, path.len() - 1, field.position, statement)?;

        if let Some(import) = plan.import {
            let unit = applied.unit.clone();
            let root = NodeRef::CompilationUnit(&unit);
            let root_path = find_path(root, unit.id).ok_or_else(|| {
                RefactorError::internal_error("compilation unit not on its own path")
            })?;
            let with = add_import(&unit, &root_path, &ImportSpec::new(import))?;
            applied.unit = with.unit;
            applied.inserted.extend(with.inserted);
        }
        Ok(applied)
    }

    /// Insert `statement` into the block targeted by `block_path`; the
    /// anchor of the edit sits at step `anchor` of that path
    fn insert(
        &self,
        block_path: &NodePath<'_>,
        anchor: usize,
        position: InsertPosition,
        statement: Statement,
    ) -> Result<Applied> {
        let Some(NodeRef::Block(block)) = block_path.target() else {
            return Err(RefactorError::malformed("insertion target is not a block"));
        };
        let index = resolve_position(block, position)?;

        let prefix = self.style.insertion_prefix(block_path, index);
        let closing = self.style.closing_prefix(block_path);
        let statement = statement.with_formatting(prefix);
        let inserted = statement.id();

        let mut next = Block::clone(block);
        next.id = NodeId::next();
        next.statements.insert(index, statement);
        if let Some(end) = closing {
            next.end = end;
        }

        let level = block_path.len() - 1;
        let (unit, anchor_id) = rebuild(block_path, level, Tree::from(next), anchor)?;
        Ok(Applied {
            unit,
            anchor: anchor_id,
            inserted: vec![inserted],
        })
    }
}

fn add_import(
    unit: &Arc<CompilationUnit>,
    path: &NodePath<'_>,
    import: &ImportSpec,
) -> Result<Applied> {
    if path.len() != 1 {
        return Err(RefactorError::malformed(format!(
            "imports are added to the compilation unit, found {}",
            describe(path.target())
        )));
    }
    match with_import(unit, import)? {
        Some((next, id)) => Ok(Applied {
            unit: Arc::new(next),
            anchor: Some(unit.id),
            inserted: vec![id],
        }),
        None => Ok(Applied {
            unit: unit.clone(),
            anchor: Some(unit.id),
            inserted: Vec::new(),
        }),
    }
}

fn remove(path: &NodePath<'_>) -> Result<Applied> {
    let Some(target) = path.target() else {
        return Err(RefactorError::malformed("empty path"));
    };
    let Some(NodeRef::Block(block)) = path.parent() else {
        return Err(RefactorError::malformed(format!(
            "only statements inside a block can be removed, found {}",
            target.kind()
        )));
    };
    let index = block
        .position_of(target.id())
        .ok_or_else(|| RefactorError::anchor_not_found(target.id()))?;

    let mut next = Block::clone(block);
    next.id = NodeId::next();
    next.statements.remove(index);

    let level = path.len() - 2;
    let (unit, _) = rebuild(path, level, Tree::from(next), level)?;
    Ok(Applied {
        unit,
        anchor: None,
        inserted: Vec::new(),
    })
}

fn replace(path: &NodePath<'_>, replacement: &Tree, keep_prefix: bool) -> Result<Applied> {
    let Some(target) = path.target() else {
        return Err(RefactorError::malformed("empty path"));
    };
    let replacement = if keep_prefix {
        let fmt = replacement
            .formatting()
            .with_prefix(target.formatting().prefix.clone());
        replacement.with_formatting(fmt)
    } else {
        replacement.clone()
    };
    let inserted = replacement.id();

    let level = path.len() - 1;
    let (unit, anchor) = rebuild(path, level, replacement, level)?;
    Ok(Applied {
        unit,
        anchor,
        inserted: vec![inserted],
    })
}

/// Rebuild `path` from the root down to step `level`, whose node becomes
/// `node`
///
/// Rebuilt ancestors at or below step `anchor` get fresh identities; the
/// root keeps its own. Returns the new root and the identity now at the
/// anchor step.
fn rebuild(
    path: &NodePath<'_>,
    level: usize,
    node: Tree,
    anchor: usize,
) -> Result<(Arc<CompilationUnit>, Option<NodeId>)> {
    let steps = path.steps();
    let mut anchor_id = (level == anchor).then(|| node.id());
    let mut current = node;

    for i in (1..=level).rev() {
        let mut parent = steps[i - 1].node.to_tree().with_child(steps[i].index, current)?;
        if i - 1 >= anchor && i - 1 > 0 {
            parent = parent.with_fresh_id();
        }
        if i - 1 == anchor {
            anchor_id = Some(parent.id());
        }
        current = parent;
    }

    Ok((current.into_compilation_unit()?, anchor_id))
}

/// Path to the body block of the class, method or block at the target
fn body_path<'a>(path: &NodePath<'a>) -> Result<NodePath<'a>> {
    let target = path.target();
    match target {
        Some(NodeRef::Block(_)) => Ok(path.clone()),
        Some(node @ NodeRef::ClassDecl(class)) => {
            let index = node.children().len() - 1;
            Ok(path.child(NodeRef::Block(&class.body), index))
        }
        Some(node @ NodeRef::MethodDecl(method)) => match method.body_block() {
            Some(body) => {
                let index = node.children().len() - 1;
                Ok(path.child(NodeRef::Block(body), index))
            }
            None => Err(RefactorError::malformed(format!(
                "method '{}' has no body",
                method.name.name
            ))),
        },
        other => Err(RefactorError::malformed(format!(
            "statements can only be inserted into a block, found {}",
            describe(other)
        ))),
    }
}

fn resolve_position(block: &Block, position: InsertPosition) -> Result<usize> {
    Ok(match position {
        InsertPosition::Start => 0,
        InsertPosition::End => block.statements.len(),
        InsertPosition::Before(id) => block
            .position_of(id)
            .ok_or_else(|| RefactorError::anchor_not_found(id))?,
        InsertPosition::After(id) => {
            block
                .position_of(id)
                .ok_or_else(|| RefactorError::anchor_not_found(id))?
                + 1
        }
    })
}

fn describe(node: Option<NodeRef<'_>>) -> String {
    node.map_or_else(|| "nothing".to_string(), |n| n.kind().to_string())
}
