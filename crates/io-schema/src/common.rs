//! The common validation pipeline every type-def runs before its own
//! type-specific checks: optional/default, null, and choices.

use io_parse::{Node, PrimitiveValue};
use io_util::SchemaError;

use crate::types::{MemberDef, Value};

/// What the common pipeline decided before any type-specific validation
/// runs.
pub enum CommonOutcome {
    /// Validation is already finished; use this value as-is.
    Resolved(Value),
    /// The member is optional, absent, and has no configured default:
    /// there is nothing to assign.
    Absent,
    /// Proceed to type-specific validation against `node`.
    Proceed,
}

/// Runs the optional/default, null, and choices checks against an
/// already-substituted node. `path` names this value for diagnostics,
/// usually `member.path`, but array
/// elements and object members pass down a computed per-position path
/// instead (`MemberDef` carries no `Clone` impl, since its pattern cache
/// must stay unique, so nested validation threads the path separately
/// rather than cloning a re-pathed `MemberDef`).
pub fn do_common_type_check(member: &MemberDef, node: Option<&Node>, path: &str) -> Result<CommonOutcome, SchemaError> {
    let node = match node {
        None => {
            return if member.optional {
                Ok(match &member.default {
                    Some(default) => CommonOutcome::Resolved(default.clone()),
                    None => CommonOutcome::Absent,
                })
            } else {
                Err(SchemaError::ValueRequired { path: path.to_string() })
            };
        }
        Some(n) => n,
    };

    if is_null(node) {
        return if member.null {
            Ok(CommonOutcome::Resolved(Value::Null))
        } else {
            Err(SchemaError::NullNotAllowed { path: path.to_string() })
        };
    }

    if let Some(choices) = &member.choices {
        if let Some(raw) = raw_value(node) {
            if !choices.contains(&raw) {
                return Err(SchemaError::ValueNotInChoice { path: path.to_string() });
            }
        }
    }

    Ok(CommonOutcome::Proceed)
}

fn is_null(node: &Node) -> bool {
    matches!(node, Node::Primitive(p) if p.value == PrimitiveValue::Null)
}

/// The node's value as decoded by the tokenizer, before any type-specific
/// coercion. What the choices comparison is checked against.
/// `None` for containers and key-value pairs, which `choices` never
/// applies to.
fn raw_value(node: &Node) -> Option<Value> {
    let Node::Primitive(p) = node else { return None };
    Some(match &p.value {
        PrimitiveValue::Str(s) => Value::String(s.clone()),
        PrimitiveValue::Int(i) => Value::Integer(*i),
        PrimitiveValue::BigInt(b) => Value::BigInt(b.clone()),
        PrimitiveValue::Float(f) => Value::Float(*f),
        PrimitiveValue::Bool(b) => Value::Bool(*b),
        PrimitiveValue::Null => Value::Null,
        PrimitiveValue::Bytes(b) => Value::Bytes(b.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use io_util::Position;

    fn member() -> MemberDef {
        MemberDef::new("string", "name")
    }

    fn string_node(s: &str) -> Node {
        Node::primitive(PrimitiveValue::Str(s.to_string()), Position::START)
    }

    #[test]
    fn absent_required_member_fails() {
        let err = do_common_type_check(&member(), None, "name").unwrap_err();
        assert_eq!(err, SchemaError::ValueRequired { path: "name".into() });
    }

    #[test]
    fn absent_optional_member_without_default_is_absent() {
        let m = member().optional(true);
        assert!(matches!(do_common_type_check(&m, None, "name").unwrap(), CommonOutcome::Absent));
    }

    #[test]
    fn absent_optional_member_with_default_resolves_to_default() {
        let m = member().optional(true).with_default(Value::String("x".into()));
        match do_common_type_check(&m, None, "name").unwrap() {
            CommonOutcome::Resolved(Value::String(s)) => assert_eq!(s, "x"),
            _ => panic!("expected a resolved default value"),
        }
    }

    #[test]
    fn explicit_null_fails_when_not_nullable() {
        let node = Node::primitive(PrimitiveValue::Null, Position::START);
        let err = do_common_type_check(&member(), Some(&node), "name").unwrap_err();
        assert_eq!(err, SchemaError::NullNotAllowed { path: "name".into() });
    }

    #[test]
    fn explicit_null_resolves_when_nullable() {
        let m = member().nullable(true);
        let node = Node::primitive(PrimitiveValue::Null, Position::START);
        assert!(matches!(do_common_type_check(&m, Some(&node), "name").unwrap(), CommonOutcome::Resolved(Value::Null)));
    }

    #[test]
    fn value_outside_choices_fails() {
        let m = member().with_choices(vec![Value::String("red".into()), Value::String("blue".into())]);
        let node = string_node("green");
        let err = do_common_type_check(&m, Some(&node), "name").unwrap_err();
        assert_eq!(err, SchemaError::ValueNotInChoice { path: "name".into() });
    }

    #[test]
    fn value_inside_choices_proceeds() {
        let m = member().with_choices(vec![Value::String("red".into())]);
        let node = string_node("red");
        assert!(matches!(do_common_type_check(&m, Some(&node), "name").unwrap(), CommonOutcome::Proceed));
    }

    #[test]
    fn present_non_null_value_proceeds() {
        let node = string_node("anything");
        assert!(matches!(do_common_type_check(&member(), Some(&node), "name").unwrap(), CommonOutcome::Proceed));
    }
}
