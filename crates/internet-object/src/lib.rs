//! internet-object: the facade crate. Composes the tokenizer, AST
//! parser, and schema validator behind a single [`parse_document`] entry
//! point.
//!
//! A document is at most two `---`-separated sections: an optional header
//! followed by the data section. A third section is a structural error,
//! not a validation one, so it surfaces as
//! [`io_util::ParseError::MultipleHeadersFound`] before the schema layer
//! is ever consulted.

use indexmap::IndexMap;

use io_lex::Token;
use io_parse::{AstParser, ContainerKind, Node};
pub use io_schema::{Definitions, MemberDef, Schema, Value};
pub use io_util::{CodedError, IoError, LexError, ParseError, Position, SchemaError};

/// Tokenizes, parses, and, if a [`Schema`] is supplied, validates `text`
/// into a single [`Value`].
///
/// Without a schema, the parsed tree is converted into a [`Value`]
/// directly: primitives map across unchanged, containers become
/// `Array`/`Object`, and a bare top-level key-value pair (the parser's
/// single-child collapse) becomes a one-entry `Object`. This schema-less
/// path exists only so callers without a schema still get a usable value
/// back, rather than the raw parser tree.
pub fn parse_document(text: &str, schema: Option<&Schema>, defs: Option<&dyn Definitions>) -> Result<Value, IoError> {
    let tokens = io_lex::tokenize(text)?;
    let data_node = parse_data_section(&tokens)?;

    match schema {
        Some(schema) => Ok(io_schema::validate_document(&data_node, schema, defs)?),
        None => Ok(node_to_value(&data_node)),
    }
}

/// Splits `tokens` into header/data sections, enforcing the at-most-two-
/// sections rule, and parses the data section into a tree. The header
/// section (if present) is parsed too, purely to surface its own
/// structural errors early. Building a `Definitions` view over it is out
/// of scope for this crate, so the parsed header node itself is
/// discarded.
fn parse_data_section(tokens: &[Token]) -> Result<Node, ParseError> {
    let sections = io_parse::split_sections(tokens);
    match sections.len() {
        1 => AstParser::parse_tokens(sections[0]),
        2 => {
            AstParser::parse_tokens(sections[0])?;
            AstParser::parse_tokens(sections[1])
        }
        _ => {
            let position = sections[2].first().map(|t| t.position).unwrap_or(Position::START);
            Err(ParseError::MultipleHeadersFound { position })
        }
    }
}

fn node_to_value(node: &Node) -> Value {
    match node {
        Node::Primitive(p) => primitive_to_value(&p.value),
        Node::KeyValue(kv) => {
            let mut map = IndexMap::new();
            let value = kv.value.as_deref().map(node_to_value).unwrap_or(Value::Null);
            map.insert(kv.key.clone(), value);
            Value::Object(map)
        }
        Node::Container(c) => match c.kind {
            ContainerKind::Array => Value::Array(c.children.iter().map(node_to_value).collect()),
            ContainerKind::Object => {
                let mut map = IndexMap::new();
                let mut next_index = 0usize;
                for child in &c.children {
                    match child {
                        Node::KeyValue(kv) => {
                            let value = kv.value.as_deref().map(node_to_value).unwrap_or(Value::Null);
                            map.insert(kv.key.clone(), value);
                        }
                        other => {
                            map.insert(next_index.to_string(), node_to_value(other));
                            next_index += 1;
                        }
                    }
                }
                Value::Object(map)
            }
        },
    }
}

fn primitive_to_value(value: &io_parse::PrimitiveValue) -> Value {
    use io_parse::PrimitiveValue as P;
    match value {
        P::Str(s) => Value::String(s.clone()),
        P::Int(i) => Value::Integer(*i),
        P::BigInt(b) => Value::BigInt(b.clone()),
        P::Float(f) => Value::Float(*f),
        P::Bool(b) => Value::Bool(*b),
        P::Null => Value::Null,
        P::Bytes(b) => Value::Bytes(b.clone()),
    }
}
