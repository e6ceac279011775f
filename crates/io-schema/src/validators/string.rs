//! `string` / `email` / `url` validation.

use std::sync::OnceLock;

use io_parse::{Node, PrimitiveValue};
use io_util::SchemaError;
use regex::Regex;

use crate::types::{MemberDef, Value};

// RFC-5322-approximating, not RFC-5322-exact, good enough to reject
// obviously malformed addresses without pulling in a full mail-address
// parser for a leaf type check.
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("built-in email regex is valid"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]+$").expect("built-in url regex is valid")
    })
}

pub fn validate(node: &Node, member: &MemberDef, path: &str) -> Result<Value, SchemaError> {
    let text = match node {
        Node::Primitive(p) => match &p.value {
            PrimitiveValue::Str(s) => s.as_str(),
            _ => return Err(SchemaError::NotAString { path: path.to_string() }),
        },
        _ => return Err(SchemaError::NotAString { path: path.to_string() }),
    };

    match member.type_name.as_str() {
        "string" => {
            if member.pattern.is_some() {
                let re = member.compiled_pattern().map_err(|message| SchemaError::InvalidSchema { message })?;
                if !re.is_match(text) {
                    return Err(SchemaError::InvalidValue {
                        path: path.to_string(),
                        message: "does not match the configured pattern".into(),
                    });
                }
            }
        }
        "email" => {
            if !email_regex().is_match(text) {
                return Err(SchemaError::InvalidValue { path: path.to_string(), message: "not a valid email address".into() });
            }
        }
        "url" => {
            if !url_regex().is_match(text) {
                return Err(SchemaError::InvalidValue { path: path.to_string(), message: "not a valid url".into() });
            }
        }
        other => return Err(SchemaError::InvalidType { name: other.into(), path: path.to_string() }),
    }

    let length = text.chars().count();
    if let Some(max_length) = member.max_length {
        if length > max_length {
            return Err(SchemaError::InvalidMaxLength { path: path.to_string(), max_length });
        }
    }
    // The min-length comparison is `<`, not `>`: a value shorter than
    // `min_length` fails.
    if let Some(min_length) = member.min_length {
        if length < min_length {
            return Err(SchemaError::InvalidMinLength { path: path.to_string(), min_length });
        }
    }

    Ok(Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use io_util::Position;

    fn node(s: &str) -> Node {
        Node::primitive(PrimitiveValue::Str(s.to_string()), Position::START)
    }

    #[test]
    fn plain_string_passes() {
        let m = MemberDef::new("string", "name");
        assert_eq!(validate(&node("hello"), &m, "name").unwrap(), Value::String("hello".into()));
    }

    #[test]
    fn non_string_node_fails() {
        let m = MemberDef::new("string", "name");
        let n = Node::primitive(PrimitiveValue::Int(1), Position::START);
        assert_eq!(validate(&n, &m, "name").unwrap_err(), SchemaError::NotAString { path: "name".into() });
    }

    #[test]
    fn pattern_mismatch_fails() {
        let m = MemberDef::new("string", "code").with_pattern("[A-Z]{3}");
        assert!(validate(&node("abc"), &m, "code").is_err());
        assert!(validate(&node("ABC"), &m, "code").is_ok());
    }

    #[test]
    fn min_length_violation_reports_too_short() {
        let mut m = MemberDef::new("string", "name");
        m.min_length = Some(5);
        let err = validate(&node("ab"), &m, "name").unwrap_err();
        assert_eq!(err, SchemaError::InvalidMinLength { path: "name".into(), min_length: 5 });
    }

    #[test]
    fn max_length_violation_reports_too_long() {
        let mut m = MemberDef::new("string", "name");
        m.max_length = Some(2);
        let err = validate(&node("abc"), &m, "name").unwrap_err();
        assert_eq!(err, SchemaError::InvalidMaxLength { path: "name".into(), max_length: 2 });
    }

    #[test]
    fn email_type_validates_shape() {
        let m = MemberDef::new("email", "contact");
        assert!(validate(&node("a@b.com"), &m, "contact").is_ok());
        assert!(validate(&node("not-an-email"), &m, "contact").is_err());
    }

    #[test]
    fn url_type_validates_shape() {
        let m = MemberDef::new("url", "site");
        assert!(validate(&node("https://example.com"), &m, "site").is_ok());
        assert!(validate(&node("not a url"), &m, "site").is_err());
    }
}
