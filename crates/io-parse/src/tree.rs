//! The parser tree: the shape the AST parser assembles tokens into before
//! the schema layer ever sees them.
//!
//! A [`Node`] is either a container (`object`/`array`), a key-value pair,
//! or a primitive leaf. Containers hold an ordered `Vec<Node>` rather than
//! a map: object member order must survive into the schema layer (schema
//! member order matters), and arrays are naturally ordered, so one
//! representation serves both.

use std::fmt;

use io_lex::{Token, TokenValue};
use io_util::Position;
use num_bigint::BigInt;

/// Which bracket pair produced a [`Node::Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Object,
    Array,
}

/// A node in the tree the AST parser assembles.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Container(ContainerNode),
    KeyValue(KeyValueNode),
    Primitive(PrimitiveNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContainerNode {
    pub kind: ContainerKind,
    pub children: Vec<Node>,
}

/// A `key: value` pair. `value` starts `None` the instant a `:` converts a
/// primitive into a key and is filled by the very next value-bearing
/// token.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValueNode {
    pub key: String,
    pub value: Option<Box<Node>>,
}

/// A scalar leaf: string, number, boolean, null, or byte sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveNode {
    pub value: PrimitiveValue,
    pub position: Position,
}

/// The decoded scalar payload a [`PrimitiveNode`] carries. Coarser than
/// [`TokenValue`] only in that it can never be [`TokenValue::Separator`],
/// since the section separator never survives into the tree (see
/// [`crate::split_sections`]).
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveValue {
    Str(String),
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Bool(bool),
    Null,
    Bytes(Vec<u8>),
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Str(s) => f.write_str(s),
            PrimitiveValue::Int(i) => write!(f, "{i}"),
            PrimitiveValue::BigInt(b) => write!(f, "{b}"),
            PrimitiveValue::Float(v) => write!(f, "{v}"),
            PrimitiveValue::Bool(b) => write!(f, "{b}"),
            PrimitiveValue::Null => f.write_str("null"),
            PrimitiveValue::Bytes(bytes) => write!(f, "{}", base64_display(bytes)),
        }
    }
}

fn base64_display(bytes: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    STANDARD.encode(bytes)
}

impl PrimitiveValue {
    /// Builds the leaf value a lexical [`Token`] carries. Panics on a
    /// section-separator token; callers split on those before building a
    /// tree (see [`crate::split_sections`]).
    pub fn from_token(token: &Token) -> Self {
        match &token.value {
            TokenValue::Str(s) => PrimitiveValue::Str(s.clone()),
            TokenValue::Int(i) => PrimitiveValue::Int(*i),
            TokenValue::BigInt(b) => PrimitiveValue::BigInt(b.clone()),
            TokenValue::Float(v) => PrimitiveValue::Float(*v),
            TokenValue::Bool(b) => PrimitiveValue::Bool(*b),
            TokenValue::Null => PrimitiveValue::Null,
            TokenValue::Bytes(b) => PrimitiveValue::Bytes(b.clone()),
            TokenValue::Separator => unreachable!("section separators are split out before tree construction"),
        }
    }
}

impl Node {
    pub fn primitive(value: PrimitiveValue, position: Position) -> Self {
        Node::Primitive(PrimitiveNode { value, position })
    }

    /// `true` for the subtype (`open-string`) literal whose text lexed to
    /// the empty string, the positional-gap filler a skipped comma slot
    /// produces.
    pub fn is_comma_gap_filler(&self) -> bool {
        matches!(self, Node::Primitive(p) if matches!(&p.value, PrimitiveValue::Str(s) if s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_match_source_text() {
        assert_eq!(PrimitiveValue::Int(42).to_string(), "42");
        assert_eq!(PrimitiveValue::Bool(true).to_string(), "true");
        assert_eq!(PrimitiveValue::Null.to_string(), "null");
        assert_eq!(PrimitiveValue::Str("key".into()).to_string(), "key");
    }

    #[test]
    fn empty_open_string_is_recognized_as_gap_filler() {
        let node = Node::primitive(PrimitiveValue::Str(String::new()), Position::START);
        assert!(node.is_comma_gap_filler());
        let node = Node::primitive(PrimitiveValue::Str("x".into()), Position::START);
        assert!(!node.is_comma_gap_filler());
    }
}
