//! io-util: shared foundation types for the Internet Object workspace.
//!
//! Everything here is small on purpose: a source [`Position`], and the
//! per-layer [`error`] enums the tokenizer, parser, and schema validator
//! raise. There is no diagnostic collector and no source map. Each
//! operation returns its first error and stops, so there is nothing to
//! batch or print from inside the core (the command-line front end and
//! any reporting it does are out of scope).

mod position;

pub mod error;

pub use error::{CodedError, IoError, LexError, ParseError, SchemaError};
pub use position::Position;

/// The ordered string-keyed map schema-validated objects are represented
/// with. A plain `HashMap` would not preserve the declared member order
/// that the schema layer relies on when formatting or re-walking a
/// validated document, so this re-exports `indexmap`'s map directly
/// rather than wrapping it.
pub type OrderedMap<V> = indexmap::IndexMap<String, V>;
