//! Trivia-preserving lexer
//!
//! Each token carries the verbatim whitespace and comments that precede it
//! as its `prefix`; the final `Eof` token carries the trailing trivia of the
//! input. Concatenating `prefix + text` over all tokens reproduces the input
//! exactly.

use super::ParseError;
use rowan::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword
    Word,
    Int,
    Long,
    Float,
    Double,
    Char,
    Str,
    Punct,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub prefix: String,
    /// Span of `text`, excluding the prefix
    pub range: TextRange,
}

impl Token {
    pub fn is(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::Punct) && self.text == text
    }
}

/// Punctuators, longest first
const PUNCTUATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", ">>>", "...", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "->", "::", "(", ")", "{", "}", "[",
    "]", ";", ",", ".", "=", "<", ">", "!", "~", "?", ":", "+", "-", "*", "/", "&", "|", "^",
    "%", "@",
];

/// Lex `input` into tokens, ending with an `Eof` token
pub fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    loop {
        let trivia_start = i;
        i = skip_trivia(input, i)?;
        let prefix = input[trivia_start..i].to_string();

        if i >= len {
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                prefix,
                range: span(len, len),
            });
            break;
        }

        let start = i;
        let Some((current, size)) = next_char(input, i) else {
            break;
        };

        let (kind, end) = if current.is_alphabetic() || current == '_' || current == '$' {
            (TokenKind::Word, read_word(input, start))
        } else if current.is_ascii_digit()
            || (current == '.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        {
            lex_number(input, start)
        } else if current == '"' {
            (TokenKind::Str, lex_quoted(input, start, b'"')?)
        } else if current == '\'' {
            (TokenKind::Char, lex_quoted(input, start, b'\'')?)
        } else if let Some(p) = PUNCTUATORS.iter().find(|p| input[start..].starts_with(**p)) {
            (TokenKind::Punct, start + p.len())
        } else {
            return Err(ParseError::new(
                format!("unexpected character '{current}'"),
                span(start, start + size),
            ));
        };

        tokens.push(Token {
            kind,
            text: input[start..end].to_string(),
            prefix,
            range: span(start, end),
        });
        i = end;
    }

    Ok(tokens)
}

/// Skip whitespace and comments starting at `i`
fn skip_trivia(input: &str, mut i: usize) -> Result<usize, ParseError> {
    let bytes = input.as_bytes();
    let len = bytes.len();

    while i < len {
        match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' => i += 1,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < len && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let start = i;
                match input[i + 2..].find("*/") {
                    Some(offset) => i = i + 2 + offset + 2,
                    None => {
                        return Err(ParseError::new("unterminated block comment", span(start, len)));
                    }
                }
            }
            _ => break,
        }
    }

    Ok(i)
}

fn read_word(input: &str, start: usize) -> usize {
    input[start..]
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '$'))
        .map_or(input.len(), |(offset, _)| start + offset)
}

fn lex_number(input: &str, start: usize) -> (TokenKind, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let hex = input[start..].starts_with("0x") || input[start..].starts_with("0X");
    let mut i = start;
    let mut fractional = false;

    while i < len {
        let b = bytes[i];
        if b.is_ascii_alphanumeric() || b == b'_' {
            i += 1;
        } else if b == b'.'
            && !fractional
            && bytes
                .get(i + 1)
                .is_none_or(|n| n.is_ascii_digit() || !n.is_ascii_alphabetic())
        {
            fractional = true;
            i += 1;
        } else if (b == b'+' || b == b'-')
            && !hex
            && i > start
            && matches!(bytes[i - 1], b'e' | b'E')
        {
            i += 1;
        } else {
            break;
        }
    }

    let text = &input[start..i];
    let last = text.chars().last().unwrap_or('0');
    let kind = match last {
        'l' | 'L' => TokenKind::Long,
        'f' | 'F' if !hex => TokenKind::Float,
        'd' | 'D' if !hex => TokenKind::Double,
        _ if fractional || (!hex && text.contains(['e', 'E'])) => TokenKind::Double,
        _ => TokenKind::Int,
    };
    (kind, i)
}

/// End of a quoted literal starting at `start`
fn lex_quoted(input: &str, start: usize, quote: u8) -> Result<usize, ParseError> {
    let bytes = input.as_bytes();
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => break,
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }

    Err(ParseError::new(
        "unterminated literal",
        span(start, i.min(bytes.len())),
    ))
}

fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input[pos..].chars().next().map(|c| (c, c.len_utf8()))
}

fn span(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(input: &str) -> Vec<(TokenKind, String)> {
        lex(input)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_lossless_reconstruction() {
        let input = "class A {\n\t// note\n\tint x = 0x1F; /* done */\n}\n\n";
        let tokens = lex(input).unwrap();
        let rebuilt: String = tokens
            .iter()
            .map(|t| format!("{}{}", t.prefix, t.text))
            .collect();
        assert_eq!(rebuilt, input);
        assert_eq!(tokens.last().unwrap().prefix, "\n\n");
    }

    #[test]
    fn test_longest_punctuator_wins() {
        let texts: Vec<_> = kinds_and_texts("a >>>= b >> c")
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(texts, vec!["a", ">>>=", "b", ">>", "c", ""]);
    }

    #[test]
    fn test_number_kinds() {
        let kinds: Vec<_> = kinds_and_texts("1 2L 3.5 4f 1e10 0xFF")
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int,
                TokenKind::Long,
                TokenKind::Double,
                TokenKind::Float,
                TokenKind::Double,
                TokenKind::Int,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_with_escapes() {
        let tokens = lex(r#"s = "a \"b\" c";"#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].text, r#""a \"b\" c""#);
        assert_eq!(tokens[2].prefix, " ");
    }

    #[test]
    fn test_unterminated_comment_is_an_error() {
        let err = lex("class A { /* open").unwrap_err();
        assert_eq!(u32::from(err.range.start()), 10);
    }
}
