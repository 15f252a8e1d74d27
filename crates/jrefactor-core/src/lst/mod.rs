//! Lossless syntax tree
//!
//! The tree is immutable and structurally shared: nodes live behind `Arc`,
//! and every edit produces a new root that reuses all untouched subtrees.
//! Printing a tree that came straight from the parser reproduces the input
//! byte-for-byte, because each node carries the whitespace and comments
//! preceding it in its [`Formatting`].
//!
//! Whitespace ownership:
//! - text before a node's first token is that node's prefix
//! - the first child of a node has an empty prefix (the parent owns it),
//!   except at file level: leading trivia of the file is the prefix of the
//!   first declaration, so the compilation unit's own prefix stays empty
//! - whitespace before a closing delimiter, terminator or separator is held
//!   by the enclosing node (`Block::end`, `terminator`, `Padded::after`)
//! - trailing trivia of the file is the compilation unit's suffix

mod formatting;
mod id;
mod nodes;
mod teardown;
mod tree;
mod trivia;

pub use formatting::{Formatting, FormattingOrigin, line_break_in};
pub use id::NodeId;
pub use nodes::*;
pub use tree::{NodeKind, NodeRef, Piece, Tree};
pub use trivia::{TriviaKind, TriviaPiece, split_trivia};

#[cfg(test)]
mod tests;
