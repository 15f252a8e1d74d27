//! Trivia inside formatting prefixes
//!
//! Prefixes are stored as opaque text. This module decomposes them on demand
//! into whitespace runs, line breaks and comments, which style inference and
//! the import manager use to reason about indentation and file headers.

/// Kind of a trivia piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    /// Spaces and tabs
    Whitespace,
    /// `\n`, `\r\n` or a lone `\r`
    Newline,
    /// `// ...` up to (not including) the line break
    CommentLine,
    /// `/* ... */`, possibly unterminated at the end of the prefix
    CommentBlock,
}

/// A borrowed slice of a prefix with its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaPiece<'a> {
    pub kind: TriviaKind,
    pub text: &'a str,
}

impl<'a> TriviaPiece<'a> {
    /// Check if this is a comment
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::CommentLine | TriviaKind::CommentBlock)
    }

    /// Check if this is whitespace (including line breaks)
    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TriviaKind::Whitespace | TriviaKind::Newline)
    }

    pub fn is_newline(&self) -> bool {
        self.kind == TriviaKind::Newline
    }

    /// Get the comment content (without `//` or `/* */`)
    pub fn comment_content(&self) -> Option<&'a str> {
        match self.kind {
            TriviaKind::CommentLine => Some(self.text.trim_start_matches("//").trim()),
            TriviaKind::CommentBlock => Some(
                self.text
                    .trim_start_matches("/*")
                    .trim_end_matches("*/")
                    .trim(),
            ),
            _ => None,
        }
    }
}

/// Split a prefix into trivia pieces; concatenating the pieces' text gives
/// back the input exactly
pub fn split_trivia(text: &str) -> Vec<TriviaPiece<'_>> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut pieces = Vec::new();
    let mut i = 0usize;

    while i < len {
        let start = i;
        let kind = match bytes[i] {
            b'\n' => {
                i += 1;
                TriviaKind::Newline
            }
            b'\r' => {
                i += 1;
                if i < len && bytes[i] == b'\n' {
                    i += 1;
                }
                TriviaKind::Newline
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'/' => {
                while i < len && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
                TriviaKind::CommentLine
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'*' => {
                i += 2;
                while i < len && !(bytes[i] == b'*' && i + 1 < len && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i = (i + 2).min(len);
                TriviaKind::CommentBlock
            }
            _ => {
                // Anything else the parser put in a prefix is treated as
                // whitespace; advance by whole characters to stay on UTF-8
                // boundaries.
                while i < len && !matches!(bytes[i], b'\n' | b'\r' | b'/') {
                    i += text[i..].chars().next().map_or(1, char::len_utf8);
                }
                if i == start {
                    i += 1;
                }
                TriviaKind::Whitespace
            }
        };
        pieces.push(TriviaPiece {
            kind,
            text: &text[start..i],
        });
    }

    pieces
}
