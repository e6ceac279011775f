//! Type-name dispatch: routes a schema member's node to its registered
//! validator after running the common substitution/optional/null/choices
//! pipeline.

use io_parse::Node;
use io_util::SchemaError;

use crate::common::{do_common_type_check, CommonOutcome};
use crate::definitions::{substitute, Definitions};
use crate::types::{MemberDef, Schema, Value};
use crate::validators::{array, boolean, number, object, string};

const STRING_TYPES: &[&str] = &["string", "email", "url"];
const NUMBER_TYPES: &[&str] = &[
    "int", "uint", "float", "number", "int8", "int16", "int32", "uint8", "uint16", "uint32", "int64", "uint64", "float32",
    "float64", "bigint",
];

/// Validates one schema member against an optional input node. `path`
/// names this member for diagnostics: the top-level caller passes
/// `member.path`; array/object validators pass a computed
/// per-element/per-member path for nested members.
///
/// Returns `Ok(None)` exactly when the member is optional, absent, and has
/// no configured default. Callers should omit the key/slot rather than
/// insert a value.
pub fn parse_member(
    node: Option<&Node>,
    member: &MemberDef,
    path: &str,
    defs: Option<&dyn Definitions>,
) -> Result<Option<Value>, SchemaError> {
    let substituted = node.map(|n| substitute(n, defs));

    match do_common_type_check(member, substituted, path)? {
        CommonOutcome::Resolved(value) => Ok(Some(value)),
        CommonOutcome::Absent => Ok(None),
        CommonOutcome::Proceed => {
            let node = substituted.expect("Proceed is only returned when a node is present");
            dispatch(node, member, path, defs).map(Some)
        }
    }
}

/// Validates a whole document against a root [`Schema`] with no enclosing
/// `MemberDef`. The entry point the facade crate uses, since the facade
/// never owns a schema long enough to wrap it in one.
pub fn validate_document(node: &Node, schema: &Schema, defs: Option<&dyn Definitions>) -> Result<Value, SchemaError> {
    object::validate_members(node, schema, "$", defs)
}

fn dispatch(node: &Node, member: &MemberDef, path: &str, defs: Option<&dyn Definitions>) -> Result<Value, SchemaError> {
    let type_name = member.type_name.as_str();
    if STRING_TYPES.contains(&type_name) {
        string::validate(node, member, path)
    } else if NUMBER_TYPES.contains(&type_name) {
        number::validate(node, member, path)
    } else if type_name == "bool" {
        boolean::validate(node, member, path)
    } else if type_name == "array" {
        array::validate(node, member, path, defs)
    } else if type_name == "object" {
        object::validate(node, member, path, defs)
    } else {
        Err(SchemaError::InvalidType { name: member.type_name.clone(), path: path.to_string() })
    }
}
