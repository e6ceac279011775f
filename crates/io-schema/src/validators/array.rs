//! `array` validation.

use io_parse::{ContainerKind, Node};
use io_util::SchemaError;

use crate::definitions::Definitions;
use crate::registry::parse_member;
use crate::types::{MemberDef, Value};

pub fn validate(node: &Node, member: &MemberDef, path: &str, defs: Option<&dyn Definitions>) -> Result<Value, SchemaError> {
    let Node::Container(c) = node else {
        return Err(SchemaError::InvalidArray { path: path.to_string(), message: "not a sequence".into() });
    };
    if c.kind != ContainerKind::Array {
        return Err(SchemaError::InvalidArray { path: path.to_string(), message: "not a sequence".into() });
    }

    if let Some(max_length) = member.max_length {
        if c.children.len() > max_length {
            return Err(SchemaError::InvalidMaxLength { path: path.to_string(), max_length });
        }
    }
    if let Some(min_length) = member.min_length {
        if c.children.len() < min_length {
            return Err(SchemaError::InvalidMinLength { path: path.to_string(), min_length });
        }
    }

    let of = member
        .of
        .as_deref()
        .ok_or_else(|| SchemaError::InvalidSchema { message: format!("array member '{path}' has no element definition ('of')") })?;

    let mut values = Vec::with_capacity(c.children.len());
    for (idx, child) in c.children.iter().enumerate() {
        let child_path = format!("{path}[{idx}]");
        match parse_member(Some(child), of, &child_path, defs)? {
            Some(value) => values.push(value),
            None => values.push(Value::Null),
        }
    }
    Ok(Value::Array(values))
}
