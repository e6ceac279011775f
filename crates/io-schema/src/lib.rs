//! io-schema: the type/schema validator. Takes the tree an AST parser
//! produced and a declared [`Schema`], and produces a coerced, bounds-
//! and choice-checked [`Value`].
//!
//! Validation is a pure function of `(Node, MemberDef)` plus an optional
//! [`Definitions`] collaborator for variable substitution. Nothing here
//! keeps state across calls except the per-`MemberDef` compiled-pattern
//! cache.

mod common;
mod definitions;
mod edge_cases;
mod registry;
mod types;
mod validators;

pub use definitions::Definitions;
pub use registry::{parse_member, validate_document};
pub use types::{MemberDef, Schema, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use io_parse::{ContainerKind, ContainerNode, KeyValueNode, Node, PrimitiveValue};
    use io_util::Position;

    #[test]
    fn validates_a_small_record_against_a_schema() {
        let schema = Schema::new()
            .push("name", MemberDef::new("string", "name"))
            .push("age", MemberDef::new("int", "age").nullable(true));

        let node = Node::Container(ContainerNode {
            kind: ContainerKind::Object,
            children: vec![
                Node::KeyValue(KeyValueNode {
                    key: "name".into(),
                    value: Some(Box::new(Node::primitive(PrimitiveValue::Str("Alice".into()), Position::START))),
                }),
                Node::KeyValue(KeyValueNode {
                    key: "age".into(),
                    value: Some(Box::new(Node::primitive(PrimitiveValue::Null, Position::START))),
                }),
            ],
        });

        let root = MemberDef::new("object", "$").with_members(schema);
        let value = parse_member(Some(&node), &root, "$", None).unwrap().unwrap();
        let Value::Object(map) = value else { panic!("expected an object") };
        assert_eq!(map.get("name"), Some(&Value::String("Alice".into())));
        assert_eq!(map.get("age"), Some(&Value::Null));
    }
}
