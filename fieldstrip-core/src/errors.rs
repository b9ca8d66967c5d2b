//! errors.rs - Custom error types for the fieldstrip-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `fieldstrip-core` library.
///
/// New variants may be added in future versions, so downstream matches
/// must keep a wildcard arm.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StripError {
    #[error("Failed to compile field rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule validation failed:\n{0}")]
    InvalidRule(String),

    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl StripError {
    /// Builds a [`StripError::Parse`] from a byte offset into `source`.
    pub fn parse_at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_col(source, offset);
        StripError::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Converts a byte offset into a 1-based (line, column) pair. Columns count chars.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..floor_char_boundary(source, offset)];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        let src = "{\n  \"a\": 1,\n  \"b\"";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 4), (2, 3));
        assert_eq!(line_col(src, src.len()), (3, 6));
    }

    #[test]
    fn parse_error_message_carries_position() {
        let err = StripError::parse_at("ab\ncd", 4, "unterminated string");
        assert_eq!(
            err.to_string(),
            "Parse error at line 2, column 2: unterminated string"
        );
    }
}
