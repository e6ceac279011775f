//! The `Definitions` collaborator: an opaque name->node mapping consumed
//! during validation for variable substitution. The schema layer never
//! owns or constructs one; it is handed a borrow.

use io_parse::Node;

/// Looks up a previously-bound node by name. Implementations typically
/// back this with the header section of a two-section document, but that
/// wiring lives above this crate; collecting and owning the header's
/// definitions is the facade's job, not the core validator's.
pub trait Definitions {
    fn get_v(&self, name: &str) -> Option<&Node>;
}

/// If `node`'s decoded text names a definition, returns the substituted
/// node; otherwise returns `node` unchanged.
pub fn substitute<'a>(node: &'a Node, defs: Option<&'a dyn Definitions>) -> &'a Node {
    let Some(defs) = defs else { return node };
    let Node::Primitive(p) = node else { return node };
    let io_parse::PrimitiveValue::Str(name) = &p.value else { return node };
    defs.get_v(name).unwrap_or(node)
}
