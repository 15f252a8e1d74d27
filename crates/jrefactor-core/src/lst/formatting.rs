//! Formatting attached to tree nodes
//!
//! A node's `prefix` is the verbatim whitespace and comment text that
//! precedes its first token. It is opaque text, copied byte-for-byte when the
//! node is reused, and only ever changed by constructing a new `Formatting`.

use super::trivia::{TriviaPiece, split_trivia};

/// Where a formatting value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormattingOrigin {
    /// Captured from the input by the parser
    #[default]
    Parsed,
    /// Computed for a node that did not exist in the input
    Synthesized,
}

/// Whitespace and comments surrounding a node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formatting {
    /// Text emitted before the node's first token
    pub prefix: String,
    /// Text emitted after the node's last token (end-of-file trivia on the
    /// compilation unit, empty elsewhere unless a caller sets it)
    pub suffix: String,
    pub origin: FormattingOrigin,
}

impl Formatting {
    /// Empty formatting, e.g. for the first child of a node
    pub fn empty() -> Self {
        Self::default()
    }

    /// Formatting captured verbatim from source
    pub fn parsed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: String::new(),
            origin: FormattingOrigin::Parsed,
        }
    }

    /// Formatting computed for a synthesized node
    pub fn synthesized(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: String::new(),
            origin: FormattingOrigin::Synthesized,
        }
    }

    /// A single space, the usual separator between tokens of new nodes
    pub fn space() -> Self {
        Self::synthesized(" ")
    }

    /// Copy of this formatting with another prefix
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: self.suffix.clone(),
            origin: self.origin,
        }
    }

    /// Copy of this formatting with another suffix
    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        Self {
            prefix: self.prefix.clone(),
            suffix: suffix.into(),
            origin: self.origin,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.origin == FormattingOrigin::Synthesized
    }

    pub fn has_newline(&self) -> bool {
        self.prefix.contains('\n')
    }

    /// Number of line breaks in the prefix
    pub fn newline_count(&self) -> usize {
        self.prefix.matches('\n').count()
    }

    /// Whether the prefix carries any comment
    pub fn has_comments(&self) -> bool {
        split_trivia(&self.prefix).iter().any(TriviaPiece::is_comment)
    }

    /// Whether the prefix is only whitespace
    pub fn is_whitespace(&self) -> bool {
        self.prefix.chars().all(char::is_whitespace)
    }

    /// Whitespace run following the last line break of the prefix
    ///
    /// Returns `None` when the prefix does not start a new line.
    pub fn indent(&self) -> Option<&str> {
        let start = self.prefix.rfind('\n')? + 1;
        let rest = &self.prefix[start..];
        let end = rest
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// Leading whitespace run of the prefix (column of a node at start of file)
    pub fn leading_whitespace(&self) -> &str {
        let end = self
            .prefix
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(self.prefix.len());
        &self.prefix[..end]
    }

    /// Line break sequence (`\n` or `\r\n`) of the first line break in the
    /// prefix
    pub fn line_break(&self) -> Option<&'static str> {
        line_break_in(&self.prefix)
    }
}

/// Line break sequence of the first line break in `text`
pub fn line_break_in(text: &str) -> Option<&'static str> {
    let at = text.find('\n')?;
    Some(if text[..at].ends_with('\r') {
        "\r\n"
    } else {
        "\n"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_after_last_newline() {
        let fmt = Formatting::parsed("\n\n\t\tList l;");
        assert_eq!(fmt.indent(), Some("\t\t"));
        assert_eq!(fmt.newline_count(), 2);

        let same_line = Formatting::parsed(" ");
        assert_eq!(same_line.indent(), None);
        assert!(!same_line.has_newline());
    }

    #[test]
    fn test_indent_stops_at_comment() {
        let fmt = Formatting::parsed("\n  /* note */ ");
        assert_eq!(fmt.indent(), Some("  "));
        assert!(fmt.has_comments());
        assert!(!fmt.is_whitespace());
    }

    #[test]
    fn test_with_prefix_keeps_suffix_and_origin() {
        let fmt = Formatting::parsed("").with_suffix("\n");
        let moved = fmt.with_prefix("\n\n");
        assert_eq!(moved.prefix, "\n\n");
        assert_eq!(moved.suffix, "\n");
        assert!(!moved.is_synthesized());
        assert!(Formatting::space().is_synthesized());
    }

    #[test]
    fn test_line_break_sequence() {
        assert_eq!(Formatting::parsed("\r\n    ").line_break(), Some("\r\n"));
        assert_eq!(Formatting::parsed(" // note\n").line_break(), Some("\n"));
        assert_eq!(Formatting::space().line_break(), None);
    }
}
