//! The `int`/`uint`/`float`/`number`/width-qualified/`bigint` family.

use io_parse::{Node, PrimitiveValue};
use io_util::SchemaError;
use num_bigint::{BigInt, Sign};

use crate::types::{MemberDef, Value};

/// `int64`, `uint64`, `float32`, `float64` are registered names but not
/// yet backed by an implementation; they report explicitly as
/// unsupported rather than silently falling back to a different width.
const UNSUPPORTED: &[&str] = &["int64", "uint64", "float32", "float64"];

pub fn validate(node: &Node, member: &MemberDef, path: &str) -> Result<Value, SchemaError> {
    if UNSUPPORTED.contains(&member.type_name.as_str()) {
        return Err(SchemaError::UnsupportedNumberType { name: member.type_name.clone(), path: path.to_string() });
    }

    let Node::Primitive(p) = node else { return Err(SchemaError::NotANumber { path: path.to_string() }) };

    let value = match member.type_name.as_str() {
        "bigint" => Value::BigInt(as_bigint(&p.value, path)?),
        "float" | "number" => Value::Float(as_float(&p.value, path)?),
        "int" => Value::Integer(as_int(&p.value, path)?),
        "uint" => {
            let i = as_int(&p.value, path)?;
            if i < 0 {
                return Err(SchemaError::OutOfRange { path: path.to_string() });
            }
            Value::Integer(i)
        }
        "int8" => Value::Integer(as_width(&p.value, path, 8, true)?),
        "int16" => Value::Integer(as_width(&p.value, path, 16, true)?),
        "int32" => Value::Integer(as_width(&p.value, path, 32, true)?),
        "uint8" => Value::Integer(as_width(&p.value, path, 8, false)?),
        "uint16" => Value::Integer(as_width(&p.value, path, 16, false)?),
        "uint32" => Value::Integer(as_width(&p.value, path, 32, false)?),
        other => return Err(SchemaError::InvalidType { name: other.into(), path: path.to_string() }),
    };

    apply_min_max(&value, member, path)?;
    Ok(value)
}

fn as_int(raw: &PrimitiveValue, path: &str) -> Result<i64, SchemaError> {
    match raw {
        PrimitiveValue::Int(i) => Ok(*i),
        PrimitiveValue::BigInt(b) => {
            b.to_string().parse().map_err(|_| SchemaError::OutOfRange { path: path.to_string() })
        }
        PrimitiveValue::Float(_) => Err(SchemaError::NotAnInteger { path: path.to_string() }),
        _ => Err(SchemaError::NotANumber { path: path.to_string() }),
    }
}

fn as_width(raw: &PrimitiveValue, path: &str, bits: u32, signed: bool) -> Result<i64, SchemaError> {
    let i = as_int(raw, path)?;
    let (lo, hi): (i128, i128) = if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    };
    if (i as i128) < lo || (i as i128) > hi {
        return Err(SchemaError::OutOfRange { path: path.to_string() });
    }
    Ok(i)
}

fn as_float(raw: &PrimitiveValue, path: &str) -> Result<f64, SchemaError> {
    let f = match raw {
        PrimitiveValue::Float(f) => *f,
        PrimitiveValue::Int(i) => *i as f64,
        PrimitiveValue::BigInt(b) => bigint_to_f64(b),
        _ => return Err(SchemaError::NotANumber { path: path.to_string() }),
    };
    if !f.is_finite() {
        return Err(SchemaError::NotANumber { path: path.to_string() });
    }
    Ok(f)
}

fn as_bigint(raw: &PrimitiveValue, path: &str) -> Result<BigInt, SchemaError> {
    match raw {
        PrimitiveValue::BigInt(b) => Ok(b.clone()),
        PrimitiveValue::Int(i) => Ok(BigInt::from(*i)),
        PrimitiveValue::Float(_) => Err(SchemaError::NotAnInteger { path: path.to_string() }),
        _ => Err(SchemaError::NotANumber { path: path.to_string() }),
    }
}

/// Lossy on magnitudes past `f64`'s ~15-digit precision; acceptable here
/// since this is only used for `min`/`max` bound comparisons, never for
/// the validated value itself.
fn bigint_to_f64(b: &BigInt) -> f64 {
    b.to_string().parse().unwrap_or(match b.sign() {
        Sign::Minus => f64::NEG_INFINITY,
        _ => f64::INFINITY,
    })
}

fn apply_min_max(value: &Value, member: &MemberDef, path: &str) -> Result<(), SchemaError> {
    let as_f64 = match value {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        Value::BigInt(b) => bigint_to_f64(b),
        _ => return Ok(()),
    };
    if let Some(min) = member.min {
        if as_f64 < min {
            return Err(SchemaError::InvalidMinValue { path: path.to_string(), min: min.to_string() });
        }
    }
    if let Some(max) = member.max {
        if as_f64 > max {
            return Err(SchemaError::InvalidMaxValue { path: path.to_string(), max: max.to_string() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use io_util::Position;

    fn int_node(i: i64) -> Node {
        Node::primitive(PrimitiveValue::Int(i), Position::START)
    }

    fn float_node(f: f64) -> Node {
        Node::primitive(PrimitiveValue::Float(f), Position::START)
    }

    #[test]
    fn unsupported_number_types_fail_immediately() {
        for name in UNSUPPORTED {
            let m = MemberDef::new(*name, "n");
            assert_eq!(
                validate(&int_node(1), &m, "n").unwrap_err(),
                SchemaError::UnsupportedNumberType { name: (*name).into(), path: "n".into() }
            );
        }
    }

    #[test]
    fn int8_rejects_out_of_range() {
        let m = MemberDef::new("int8", "n");
        assert!(validate(&int_node(127), &m, "n").is_ok());
        assert!(validate(&int_node(128), &m, "n").is_err());
        assert!(validate(&int_node(-128), &m, "n").is_ok());
        assert!(validate(&int_node(-129), &m, "n").is_err());
    }

    #[test]
    fn uint8_rejects_negative_and_overflow() {
        let m = MemberDef::new("uint8", "n");
        assert!(validate(&int_node(255), &m, "n").is_ok());
        assert!(validate(&int_node(256), &m, "n").is_err());
        assert!(validate(&int_node(-1), &m, "n").is_err());
    }

    #[test]
    fn uint_rejects_negative() {
        let m = MemberDef::new("uint", "n");
        assert!(validate(&int_node(-1), &m, "n").is_err());
        assert!(validate(&int_node(0), &m, "n").is_ok());
    }

    #[test]
    fn float_accepts_ints_and_floats() {
        let m = MemberDef::new("float", "n");
        assert_eq!(validate(&int_node(3), &m, "n").unwrap(), Value::Float(3.0));
        assert_eq!(validate(&float_node(3.5), &m, "n").unwrap(), Value::Float(3.5));
    }

    #[test]
    fn int_rejects_fractional_values() {
        let m = MemberDef::new("int", "n");
        assert_eq!(validate(&float_node(3.5), &m, "n").unwrap_err(), SchemaError::NotAnInteger { path: "n".into() });
    }

    #[test]
    fn min_max_apply_after_type_specific_range_check() {
        let mut m = MemberDef::new("int", "n");
        m.min = Some(10.0);
        m.max = Some(20.0);
        assert!(validate(&int_node(15), &m, "n").is_ok());
        assert!(validate(&int_node(5), &m, "n").is_err());
        assert!(validate(&int_node(25), &m, "n").is_err());
    }

    #[test]
    fn bigint_accepts_arbitrary_precision_integers() {
        let m = MemberDef::new("bigint", "n");
        let huge = Node::primitive(
            PrimitiveValue::BigInt(BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap()),
            Position::START,
        );
        assert!(validate(&huge, &m, "n").is_ok());
    }
}
