//! Error type shared by the scanner, parser, and merge engine.

use std::num::ParseIntError;

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum AdifError {
    /// An error originating from the underlying reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended while scanning for a delimiter character.
    ///
    /// Inside the record loop this is the normal end-of-file signal;
    /// everywhere else it indicates a truncated file.
    #[error("hit end of input before finding {0:?}")]
    UnexpectedEof(char),

    /// The input ended inside a payload whose length the tag declared.
    #[error("input ended {remaining} characters short of a declared field length of {declared}")]
    TruncatedField {
        /// Length declared by the tag specifier.
        declared: usize,
        /// Characters still owed when the input ended.
        remaining: usize,
    },

    /// The input contained a byte sequence that is not valid UTF-8.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,

    /// A tag had more than three colon-separated parts.
    #[error("invalid tag specifier: <{0}>")]
    InvalidSpecifier(String),

    /// A tag's declared length was not a non-negative integer.
    #[error("invalid length in tag <{spec}>: {source}")]
    InvalidLength {
        /// Tag text without the angle brackets.
        spec: String,
        /// Underlying integer parse failure.
        source: ParseIntError,
    },

    /// A field did not parse as an ADIF date (`YYYYMMDD`).
    #[error("invalid ADIF date {value:?}: {source}")]
    InvalidDate {
        /// Offending field text.
        value: String,
        /// Underlying chrono parse failure.
        source: chrono::ParseError,
    },

    /// A field did not parse as an ADIF time (`HHMM` or `HHMMSS`).
    #[error("invalid ADIF time {value:?}: {source}")]
    InvalidTime {
        /// Offending field text.
        value: String,
        /// Underlying chrono parse failure.
        source: chrono::ParseError,
    },

    /// The `created_timestamp` header did not parse as `YYYYMMDD HHMMSS`.
    #[error("invalid created_timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// Offending header text.
        value: String,
        /// Underlying chrono parse failure.
        source: chrono::ParseError,
    },

    /// Two records shared a match key but disagreed on the fields that
    /// compose it. This is a bug in the match-key derivation, not a data
    /// problem.
    #[error("records differ despite sharing match key {key:?}; this is a bug")]
    MatchKeyCollision {
        /// The colliding match key.
        key: String,
    },
}

/// Convenience `Result` alias using [`AdifError`].
pub type Result<T> = std::result::Result<T, AdifError>;
