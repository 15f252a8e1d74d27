//! Printer for converting trees back to source text
//!
//! Output is the concatenation, in source order, of every node's prefix,
//! token text and suffix. A tree produced by the parser therefore prints as
//! its exact input. Traversal uses an explicit work stack, so deeply nested
//! input cannot overflow the call stack.

use crate::lst::{CompilationUnit, Formatting, NodeRef, Piece};
use std::sync::Arc;

enum Work<'a> {
    Text(&'a str),
    Node(NodeRef<'a>),
}

/// Accumulates printed text
pub struct Printer {
    buffer: String,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096),
        }
    }

    /// Print `root`, substituting `root_fmt` for its own formatting when given
    pub fn print(&mut self, root: NodeRef<'_>, root_fmt: Option<&Formatting>) {
        let fmt = root_fmt.unwrap_or_else(|| root.formatting());
        self.buffer.push_str(&fmt.prefix);

        let mut stack = vec![Work::Text(&fmt.suffix)];
        push_pieces(&mut stack, root);

        while let Some(work) = stack.pop() {
            match work {
                Work::Text(text) => self.buffer.push_str(text),
                Work::Node(node) => {
                    let fmt = node.formatting();
                    self.buffer.push_str(&fmt.prefix);
                    stack.push(Work::Text(&fmt.suffix));
                    push_pieces(&mut stack, node);
                }
            }
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

fn push_pieces<'a>(stack: &mut Vec<Work<'a>>, node: NodeRef<'a>) {
    for piece in node.pieces().into_iter().rev() {
        stack.push(match piece {
            Piece::Text(text) => Work::Text(text),
            Piece::Node(child) => Work::Node(child),
        });
    }
}

/// Print a whole compilation unit
pub fn render(unit: &Arc<CompilationUnit>) -> String {
    print_node(NodeRef::CompilationUnit(unit))
}

/// Print any subtree with its own formatting
pub fn print_node(node: NodeRef<'_>) -> String {
    let mut printer = Printer::new();
    printer.print(node, None);
    printer.finish()
}

/// Print a subtree with an overriding root formatting
pub fn render_with(node: NodeRef<'_>, fmt: &Formatting) -> String {
    let mut printer = Printer::new();
    printer.print(node, Some(fmt));
    printer.finish()
}

/// Print a subtree as it would read on its own: without its prefix, and
/// with its indentation removed from every following line
pub fn print_trimmed(node: NodeRef<'_>) -> String {
    let own = node.formatting();
    let printed = render_with(node, &own.with_prefix(""));

    let Some(indent) = own.indent().filter(|indent| !indent.is_empty()) else {
        return printed;
    };

    let mut out = String::with_capacity(printed.len());
    for (i, line) in printed.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(line.strip_prefix(indent).unwrap_or(line));
        } else {
            out.push_str(line);
        }
    }
    out
}
