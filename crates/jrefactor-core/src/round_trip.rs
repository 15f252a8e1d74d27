//! Round-trip validation
//!
//! Checks that `print(parse(source)) == source` for untouched input, and
//! compares the printed form of a mutated tree against an expected text.
//!
//! ```rust,ignore
//! use jrefactor_core::round_trip::RoundTripValidator;
//!
//! let result = RoundTripValidator::new().validate("class A {\n}\n");
//! assert!(result.is_valid());
//! ```

use crate::lst::CompilationUnit;
use crate::parser::parse_compilation_unit;
use crate::printer::render;
use std::sync::Arc;

/// Outcome of one round-trip check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Text the tree is compared against
    pub original: String,
    /// Printed tree, empty when parsing failed
    pub printed: String,
    /// Byte offset of the first mismatch
    pub first_difference: Option<usize>,
    pub parse_error: Option<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Human-readable list of problems
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if let Some(error) = &self.parse_error {
            issues.push(format!("Parsing failed: {error}"));
        }
        if let Some(offset) = self.first_difference {
            issues.push(format!(
                "Printed text differs from the original at byte {offset}"
            ));
        }
        issues
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RoundTripValidator;

impl RoundTripValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parse `source`, print it back and compare byte-for-byte
    pub fn validate(&self, source: &str) -> ValidationResult {
        match parse_compilation_unit(source) {
            Ok(unit) => self.validate_after(&unit, source),
            Err(err) => {
                tracing::debug!(error = %err, "Round trip stopped at parse");
                ValidationResult {
                    is_valid: false,
                    original: source.to_string(),
                    printed: String::new(),
                    first_difference: None,
                    parse_error: Some(err.to_string()),
                }
            }
        }
    }

    /// Compare the printed form of `unit` with `expected`
    pub fn validate_after(&self, unit: &Arc<CompilationUnit>, expected: &str) -> ValidationResult {
        let printed = render(unit);
        let first_difference = first_difference(expected, &printed);
        if let Some(offset) = first_difference {
            tracing::debug!(offset, "Round trip mismatch");
        }
        ValidationResult {
            is_valid: first_difference.is_none(),
            original: expected.to_string(),
            printed,
            first_difference,
            parse_error: None,
        }
    }
}

fn first_difference(a: &str, b: &str) -> Option<usize> {
    if a == b {
        return None;
    }
    let common = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    Some(common)
}
