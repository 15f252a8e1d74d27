//! Traversal and lookup over the tree
//!
//! All traversals use an explicit stack.

use crate::lst::{Literal, NodeId, NodeKind, NodeRef};
use std::sync::Arc;

/// What a visitor wants after seeing a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFlow {
    Continue,
    SkipChildren,
    Stop,
}

/// Pre-order visitor over borrowed nodes
pub trait Visitor<'a> {
    fn visit(&mut self, node: NodeRef<'a>, depth: usize) -> VisitFlow;
}

impl<'a, F> Visitor<'a> for F
where
    F: FnMut(NodeRef<'a>, usize) -> VisitFlow,
{
    fn visit(&mut self, node: NodeRef<'a>, depth: usize) -> VisitFlow {
        self(node, depth)
    }
}

/// Drive `visitor` over `root` and its descendants in source order
pub fn walk<'a, V>(root: NodeRef<'a>, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        match visitor.visit(node, depth) {
            VisitFlow::Stop => return,
            VisitFlow::SkipChildren => {}
            VisitFlow::Continue => {
                for child in node.children().into_iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }
    }
}

/// One step of a root-to-node path
#[derive(Debug, Clone, Copy)]
pub struct PathStep<'a> {
    pub node: NodeRef<'a>,
    /// Position of `node` among its parent's children (0 for the root)
    pub index: usize,
}

/// Chain of nodes from the root down to a target node
#[derive(Debug, Clone)]
pub struct NodePath<'a> {
    steps: Vec<PathStep<'a>>,
}

impl<'a> NodePath<'a> {
    pub fn steps(&self) -> &[PathStep<'a>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn root(&self) -> Option<NodeRef<'a>> {
        self.steps.first().map(|s| s.node)
    }

    pub fn target(&self) -> Option<NodeRef<'a>> {
        self.steps.last().map(|s| s.node)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let n = self.steps.len();
        (n >= 2).then(|| self.steps[n - 2].node)
    }

    /// Path to the `len`-th node of this path
    pub fn truncated(&self, len: usize) -> NodePath<'a> {
        NodePath {
            steps: self.steps[..len.min(self.steps.len())].to_vec(),
        }
    }

    /// Path extended by one child of the target
    pub fn child(&self, node: NodeRef<'a>, index: usize) -> NodePath<'a> {
        let mut steps = self.steps.clone();
        steps.push(PathStep { node, index });
        NodePath { steps }
    }

    /// Number of blocks on the path, the target included
    ///
    /// A class body is at depth 1, a method body inside it at depth 2.
    pub fn block_depth(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.node.kind() == NodeKind::Block)
            .count()
    }
}

/// Path from `root` to the node with identity `id`
pub fn find_path<'a>(root: NodeRef<'a>, id: NodeId) -> Option<NodePath<'a>> {
    struct Seen<'a> {
        step: PathStep<'a>,
        parent: Option<usize>,
    }

    let mut seen: Vec<Seen<'a>> = Vec::new();
    let mut stack = vec![(PathStep { node: root, index: 0 }, None)];

    while let Some((step, parent)) = stack.pop() {
        let slot = seen.len();
        seen.push(Seen { step, parent });

        if step.node.id() == id {
            let mut steps = Vec::new();
            let mut cursor = Some(slot);
            while let Some(i) = cursor {
                steps.push(seen[i].step);
                cursor = seen[i].parent;
            }
            steps.reverse();
            return Some(NodePath { steps });
        }

        for (index, node) in step.node.children().into_iter().enumerate().rev() {
            stack.push((PathStep { node, index }, Some(slot)));
        }
    }

    None
}

pub fn collect<'a>(
    root: NodeRef<'a>,
    mut predicate: impl FnMut(NodeRef<'a>) -> bool,
) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    walk(root, &mut |node: NodeRef<'a>, _depth: usize| {
        if predicate(node) {
            out.push(node);
        }
        VisitFlow::Continue
    });
    out
}

/// All literals under `root` in source order
pub fn collect_literals<'a>(root: NodeRef<'a>) -> Vec<&'a Arc<Literal>> {
    let mut out = Vec::new();
    walk(root, &mut |node: NodeRef<'a>, _depth: usize| {
        if let NodeRef::Literal(literal) = node {
            out.push(literal);
        }
        VisitFlow::Continue
    });
    out
}
