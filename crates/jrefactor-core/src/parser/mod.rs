//! Java front end producing lossless syntax trees
//!
//! Covers the subset of Java the tree models: packages, imports, class and
//! interface declarations, fields, methods, constructors, and the statements
//! and expressions listed on [`crate::lst::Statement`] and
//! [`crate::lst::Expression`]. Everything the tree cannot represent is a
//! parse error rather than a lossy approximation.

mod lexer;
mod grammar;

pub use lexer::{Token, TokenKind, lex};
pub use grammar::{parse_compilation_unit, parse_expression, parse_statement};

use crate::error::RefactorError;
use rowan::TextRange;
use std::fmt;

/// A lexer or parser error with the offending span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

impl ParseError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.message, self.range)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for RefactorError {
    fn from(err: ParseError) -> Self {
        RefactorError::parse_error(err.message, u32::from(err.range.start()))
    }
}
