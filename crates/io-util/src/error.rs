//! Error model shared by the tokenizer, AST parser, and schema validator.
//!
//! Each layer gets its own closed, `thiserror`-derived enum so a caller can
//! match on exactly the error shapes that layer can produce. Every variant
//! also answers a stable, kebab-case error code through [`CodedError`]
//! (`invalid-char`, `out-of-range`, ...), independent of the human-readable
//! message, which may vary.
//!
//! Errors abort the operation that raised them immediately: nothing here
//! is retried, and nothing here writes to a sink. A `Result` is the only
//! channel an error travels through.

use crate::Position;
use thiserror::Error;

/// A stable, documentation-referenceable error code plus optional source
/// position, independent of the variant's `Display` message.
pub trait CodedError {
    fn code(&self) -> &'static str;
    fn position(&self) -> Option<Position>;
}

/// Lexical errors raised while tokenizing source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("{message} at {position}")]
    InvalidChar { message: String, position: Position },

    #[error("incomplete escape sequence at {position}")]
    IncompleteEscapeSequence { position: Position },

    #[error("unterminated string literal at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid escape sequence: {message} at {position}")]
    InvalidEscape { message: String, position: Position },
}

impl CodedError for LexError {
    fn code(&self) -> &'static str {
        match self {
            LexError::InvalidChar { .. } => "invalid-char",
            LexError::IncompleteEscapeSequence { .. } => "incomplete-escape-sequence",
            LexError::UnterminatedString { .. } => "invalid-char",
            LexError::InvalidEscape { .. } => "invalid-char",
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            LexError::InvalidChar { position, .. }
            | LexError::IncompleteEscapeSequence { position }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. } => Some(*position),
        }
    }
}

/// Structural errors raised while assembling the token stream into a tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unclosed bracket at {position}")]
    OpenBracket { position: Position },

    #[error("mismatched bracket '{found}' at {position}")]
    InvalidBracket { found: String, position: Position },

    #[error("expecting a separator at {position}")]
    ExpectingASeparator { position: Position },

    #[error("invalid key at {position}")]
    InvalidHeaderItem { position: Position },

    #[error("multiple header sections found at {position}")]
    MultipleHeadersFound { position: Position },
}

impl CodedError for ParseError {
    fn code(&self) -> &'static str {
        match self {
            ParseError::OpenBracket { .. } => "open-bracket",
            ParseError::InvalidBracket { .. } => "invalid-bracket",
            ParseError::ExpectingASeparator { .. } => "expecting-a-separator",
            ParseError::InvalidHeaderItem { .. } => "invalid-header-item",
            ParseError::MultipleHeadersFound { .. } => "multiple-headers-found",
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            ParseError::OpenBracket { position }
            | ParseError::InvalidBracket { position, .. }
            | ParseError::ExpectingASeparator { position }
            | ParseError::InvalidHeaderItem { position }
            | ParseError::MultipleHeadersFound { position } => Some(*position),
        }
    }
}

/// Typing, bounds, choice, and schema errors raised by the validators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid type '{name}' at {path}")]
    InvalidType { name: String, path: String },

    #[error("invalid value at {path}: {message}")]
    InvalidValue { path: String, message: String },

    #[error("not a string at {path}")]
    NotAString { path: String },

    #[error("not a number at {path}")]
    NotANumber { path: String },

    #[error("not an integer at {path}")]
    NotAnInteger { path: String },

    #[error("null not allowed at {path}")]
    NullNotAllowed { path: String },

    #[error("value required at {path}")]
    ValueRequired { path: String },

    #[error("value at {path} is out of range")]
    OutOfRange { path: String },

    #[error("invalid range for {path}: min {min} > max {max}")]
    InvalidRange { path: String, min: String, max: String },

    #[error("value at {path} is below the minimum of {min}")]
    InvalidMinValue { path: String, min: String },

    #[error("value at {path} is above the maximum of {max}")]
    InvalidMaxValue { path: String, max: String },

    #[error("value at {path} is shorter than the minimum length of {min_length}")]
    InvalidMinLength { path: String, min_length: usize },

    #[error("value at {path} is longer than the maximum length of {max_length}")]
    InvalidMaxLength { path: String, max_length: usize },

    #[error("value at {path} is not one of the allowed choices")]
    ValueNotInChoice { path: String },

    #[error("invalid choice set for {path}")]
    InvalidChoice { path: String },

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("invalid array at {path}: {message}")]
    InvalidArray { path: String, message: String },

    #[error("invalid object at {path}: {message}")]
    InvalidObject { path: String, message: String },

    #[error("unsupported number type '{name}' at {path}")]
    UnsupportedNumberType { name: String, path: String },
}

impl CodedError for SchemaError {
    fn code(&self) -> &'static str {
        use SchemaError::*;
        match self {
            InvalidType { .. } => "invalid-type",
            InvalidValue { .. } => "invalid-value",
            NotAString { .. } => "not-a-string",
            NotANumber { .. } => "not-a-number",
            NotAnInteger { .. } => "not-an-integer",
            NullNotAllowed { .. } => "null-not-allowed",
            ValueRequired { .. } => "value-required",
            OutOfRange { .. } => "out-of-range",
            InvalidRange { .. } => "invalid-range",
            InvalidMinValue { .. } => "invalid-min-value",
            InvalidMaxValue { .. } => "invalid-max-value",
            InvalidMinLength { .. } => "invalid-min-length",
            InvalidMaxLength { .. } => "invalid-max-length",
            ValueNotInChoice { .. } => "value-not-in-choice",
            InvalidChoice { .. } => "invalid-choice",
            InvalidSchema { .. } => "invalid-schema",
            InvalidArray { .. } => "invalid-array",
            InvalidObject { .. } => "invalid-object",
            UnsupportedNumberType { .. } => "unsupported-number-type",
        }
    }

    // Schema errors are reported against a dotted member path rather than
    // a source position; the node that failed validation may originate
    // from a default value with no position of its own.
    fn position(&self) -> Option<Position> {
        None
    }
}

/// Aggregate error returned by the `internet-object` facade, covering all
/// three phases behind a single type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl CodedError for IoError {
    fn code(&self) -> &'static str {
        match self {
            IoError::Lex(e) => e.code(),
            IoError::Parse(e) => e.code(),
            IoError::Schema(e) => e.code(),
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            IoError::Lex(e) => e.position(),
            IoError::Parse(e) => e.position(),
            IoError::Schema(e) => e.position(),
        }
    }
}
