//! The declarative schema model: [`Value`] (what a validated document is
//! made of), [`MemberDef`] (the option bag controlling how one member is
//! validated), and [`Schema`] (an ordered sequence of named members).

use std::sync::OnceLock;

use indexmap::IndexMap;
use num_bigint::BigInt;
use regex::Regex;

/// A fully validated, type-coerced value.
///
/// `Object` uses an `IndexMap` rather than a `HashMap` because member order
/// is declared by the schema and must survive into the result.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    BigInt(BigInt),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Null,
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    /// A coarse kind label used in error messages and choice comparisons.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// The option bag a single schema member is validated against.
///
/// The compiled `pattern` regex is cached lazily in `compiled_pattern`
/// rather than recompiled on every `parse` call. The cache is owned by
/// this `MemberDef` and never shared across documents, so no `Clone`
/// impl is provided.
#[derive(Debug)]
pub struct MemberDef {
    pub type_name: String,
    pub path: String,
    pub optional: bool,
    pub null: bool,
    pub default: Option<Value>,
    pub choices: Option<Vec<Value>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    /// The nested element definition for `array` members.
    pub of: Option<Box<MemberDef>>,
    /// The nested member schema for `object` members.
    pub members: Option<Schema>,

    compiled_pattern: OnceLock<Result<Regex, String>>,
}

impl MemberDef {
    pub fn new(type_name: impl Into<String>, path: impl Into<String>) -> Self {
        MemberDef {
            type_name: type_name.into(),
            path: path.into(),
            optional: false,
            null: false,
            default: None,
            choices: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            of: None,
            members: None,
            compiled_pattern: OnceLock::new(),
        }
    }

    pub fn optional(mut self, yes: bool) -> Self {
        self.optional = yes;
        self
    }

    pub fn nullable(mut self, yes: bool) -> Self {
        self.null = yes;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_choices(mut self, choices: Vec<Value>) -> Self {
        self.choices = Some(choices);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_of(mut self, of: MemberDef) -> Self {
        self.of = Some(Box::new(of));
        self
    }

    pub fn with_members(mut self, members: Schema) -> Self {
        self.members = Some(members);
        self
    }

    /// The anchored, compiled form of `pattern`, compiled at most once and
    /// cached for the lifetime of this `MemberDef`. `^...$` is added
    /// around the source pattern unless it is already present.
    pub fn compiled_pattern(&self) -> Result<&Regex, String> {
        let pattern = self.pattern.as_deref().ok_or_else(|| "no pattern configured".to_string())?;
        self.compiled_pattern
            .get_or_init(|| {
                let anchored = anchor_pattern(pattern);
                Regex::new(&anchored).map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|e| e.clone())
    }
}

fn anchor_pattern(pattern: &str) -> String {
    let needs_start = !pattern.starts_with('^');
    let needs_end = !pattern.ends_with('$');
    match (needs_start, needs_end) {
        (true, true) => format!("^{pattern}$"),
        (true, false) => format!("^{pattern}"),
        (false, true) => format!("{pattern}$"),
        (false, false) => pattern.to_string(),
    }
}

/// An ordered sequence of `(name, MemberDef)` entries.
#[derive(Debug, Default)]
pub struct Schema {
    members: Vec<(String, MemberDef)>,
}

impl Schema {
    pub fn new() -> Self {
        Schema { members: Vec::new() }
    }

    pub fn push(mut self, name: impl Into<String>, member: MemberDef) -> Self {
        self.members.push((name.into(), member));
        self
    }

    pub fn get(&self, name: &str) -> Option<&MemberDef> {
        self.members.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, MemberDef)> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
