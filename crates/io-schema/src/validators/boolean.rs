//! `bool` validation.

use io_parse::{Node, PrimitiveValue};
use io_util::SchemaError;

use crate::types::{MemberDef, Value};

pub fn validate(node: &Node, member: &MemberDef, path: &str) -> Result<Value, SchemaError> {
    match node {
        Node::Primitive(p) => match p.value {
            PrimitiveValue::Bool(b) => Ok(Value::Bool(b)),
            _ => Err(SchemaError::InvalidValue { path: path.to_string(), message: "not a boolean".into() }),
        },
        _ => Err(SchemaError::InvalidValue { path: path.to_string(), message: "not a boolean".into() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use io_util::Position;

    #[test]
    fn accepts_bool_primitives() {
        let m = MemberDef::new("bool", "flag");
        let node = Node::primitive(PrimitiveValue::Bool(true), Position::START);
        assert_eq!(validate(&node, &m, "flag").unwrap(), Value::Bool(true));
    }

    #[test]
    fn rejects_non_bool_primitives() {
        let m = MemberDef::new("bool", "flag");
        let node = Node::primitive(PrimitiveValue::Int(1), Position::START);
        assert!(validate(&node, &m, "flag").is_err());
    }
}
