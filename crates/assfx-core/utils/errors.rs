//! Error and warning types for script parsing.
//!
//! Parsing distinguishes fatal failures ([`ParseError`], returned as `Err`)
//! from recoverable issues ([`ParseWarning`], collected on the parsed script).
//! A warning never aborts the parse: the offending row or block is
//! materialized with best-effort defaults and parsing continues.

use thiserror::Error;

/// Fatal parse failure. The script is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A mandatory section is absent from the script.
    #[error("mandatory section [{0}] is missing")]
    MissingSection(&'static str),
}

/// Recoverable parse issue, collected while parsing continues.
///
/// Warnings carry enough location data to point at the offending input:
/// `line` fields are 1-based source line numbers, `event` fields are
/// 0-based indexes into the parsed event list (tokenization and style
/// resolution happen after the source text has been consumed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    /// An event references a style that the script never defines.
    /// The event falls back to the default style.
    #[error("event {event}: style `{style}` is not defined, using the default style")]
    UnknownStyle {
        /// Name of the missing style.
        style: String,
        /// Index of the event that referenced it.
        event: usize,
    },

    /// An override block is unterminated or has unbalanced parentheses.
    /// The block degrades to literal text.
    #[error("event {event}: malformed override block kept as literal text")]
    MalformedTag {
        /// Index of the event whose text contains the block.
        event: usize,
    },

    /// A `Style:`/`Dialogue:` row has fewer fields than its `Format:`
    /// header declares. Missing fields take default values.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCountMismatch {
        /// Source line of the short row.
        line: usize,
        /// Field count declared by the `Format:` header.
        expected: usize,
        /// Field count actually present.
        found: usize,
    },

    /// A section header names a section this parser does not know.
    /// Everything until the next header is skipped.
    #[error("line {line}: unknown section [{name}] skipped")]
    UnknownSection {
        /// The unrecognized section name.
        name: String,
        /// Source line of the header.
        line: usize,
    },

    /// A row inside a known section matched no known row kind.
    #[error("line {line}: unparseable row skipped")]
    UnparseableRow {
        /// Source line of the row.
        line: usize,
    },

    /// A field value failed to parse; the default for that field is used.
    #[error("line {line}: invalid value `{value}` for {field}, using default")]
    BadField {
        /// Source line of the row.
        line: usize,
        /// Name of the field that failed.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::MissingSection("Events");
        assert_eq!(err.to_string(), "mandatory section [Events] is missing");
    }

    #[test]
    fn warning_display_mentions_location() {
        let warning = ParseWarning::FieldCountMismatch {
            line: 12,
            expected: 10,
            found: 7,
        };
        assert_eq!(warning.to_string(), "line 12: expected 10 fields, found 7");

        let warning = ParseWarning::UnknownStyle {
            style: "Romaji".to_string(),
            event: 3,
        };
        assert!(warning.to_string().contains("Romaji"));
    }
}
