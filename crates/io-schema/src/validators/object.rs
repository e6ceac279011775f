//! `object` validation.

use indexmap::IndexMap;
use io_parse::Node;
use io_util::SchemaError;

use crate::definitions::Definitions;
use crate::registry::parse_member;
use crate::types::{MemberDef, Schema, Value};

pub fn validate(node: &Node, member: &MemberDef, path: &str, defs: Option<&dyn Definitions>) -> Result<Value, SchemaError> {
    let schema = member
        .members
        .as_ref()
        .ok_or_else(|| SchemaError::InvalidSchema { message: format!("object member '{path}' has no nested schema ('members')") })?;
    validate_members(node, schema, path, defs)
}

/// The shared member-by-member validation loop, factored out so the
/// facade crate can validate a document against a bare [`Schema`]
/// at the root without first wrapping it in an owning `MemberDef` (whose
/// pattern cache makes it deliberately non-`Clone`).
pub fn validate_members(node: &Node, schema: &Schema, path: &str, defs: Option<&dyn Definitions>) -> Result<Value, SchemaError> {
    let Node::Container(c) = node else {
        return Err(SchemaError::InvalidObject { path: path.to_string(), message: "not an object".into() });
    };

    let mut by_key: IndexMap<&str, Option<&Node>> = IndexMap::new();
    let mut positional: Vec<&Node> = Vec::new();
    for child in &c.children {
        match child {
            Node::KeyValue(kv) => {
                by_key.insert(kv.key.as_str(), kv.value.as_deref());
            }
            other => positional.push(other),
        }
    }

    if let Some(unknown) = by_key.keys().find(|k| schema.get(k).is_none()) {
        return Err(SchemaError::InvalidObject { path: path.to_string(), message: format!("unknown member '{unknown}'") });
    }
    if positional.len() > schema.len() {
        return Err(SchemaError::InvalidObject { path: path.to_string(), message: "too many positional values".into() });
    }

    let mut result = IndexMap::new();
    let mut positional_iter = positional.into_iter();
    for (name, member_def) in schema.iter() {
        let child_path = format!("{path}.{name}");
        let candidate: Option<&Node> = match by_key.get(name.as_str()) {
            Some(v) => *v,
            None => positional_iter.next(),
        };
        if let Some(value) = parse_member(candidate, member_def, &child_path, defs)? {
            result.insert(name.clone(), value);
        }
    }
    Ok(Value::Object(result))
}
