//! Declarative expected-shape descriptions
//!
//! An [`ExpectedShape`] lists the keys a mapping must carry and what each
//! value must look like. Keys not listed are ignored by the matcher.

use crate::parsers::Document;
use std::fmt;

/// Primitive type a value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMarker {
    String,
    Dictionary,
    List,
    Boolean,
    Integer,
    Float,
    /// Key must be present; value is unconstrained
    Any,
}

impl TypeMarker {
    pub fn matches(&self, value: &Document) -> bool {
        match self {
            TypeMarker::String => value.is_string(),
            TypeMarker::Dictionary => value.is_mapping(),
            TypeMarker::List => value.is_sequence(),
            TypeMarker::Boolean => value.is_bool(),
            TypeMarker::Integer => value.is_i64() || value.is_u64(),
            TypeMarker::Float => value.is_f64(),
            TypeMarker::Any => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeMarker::String => "string",
            TypeMarker::Dictionary => "dictionary",
            TypeMarker::List => "list",
            TypeMarker::Boolean => "boolean",
            TypeMarker::Integer => "integer",
            TypeMarker::Float => "float",
            TypeMarker::Any => "any value",
        }
    }
}

impl fmt::Display for TypeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a single value must look like
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Value must equal this exactly
    Literal(Document),
    /// Value must have this type
    Type(TypeMarker),
    /// Value must be a mapping matching the nested shape
    Nested(ExpectedShape),
    /// Value must be a list whose every element matches the template
    List(Box<Expectation>),
}

impl Expectation {
    pub fn literal(value: impl Into<Document>) -> Self {
        Expectation::Literal(value.into())
    }

    pub fn list_of(template: Expectation) -> Self {
        Expectation::List(Box::new(template))
    }
}

impl From<TypeMarker> for Expectation {
    fn from(marker: TypeMarker) -> Self {
        Expectation::Type(marker)
    }
}

impl From<ExpectedShape> for Expectation {
    fn from(shape: ExpectedShape) -> Self {
        Expectation::Nested(shape)
    }
}

/// Ordered set of required keys and their expectations.
///
/// Keys are checked in insertion order, so the first reported failure is
/// stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedShape {
    fields: Vec<(String, Expectation)>,
}

impl ExpectedShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` with the given expectation. A repeated key replaces the
    /// earlier expectation in place.
    pub fn field(mut self, key: &str, expectation: impl Into<Expectation>) -> Self {
        let expectation = expectation.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = expectation,
            None => self.fields.push((key.to_string(), expectation)),
        }
        self
    }

    /// Require each of `keys` to be a string
    pub fn strings(self, keys: &[&str]) -> Self {
        keys.iter()
            .fold(self, |shape, key| shape.field(key, TypeMarker::String))
    }

    /// Require each of `keys` to be present with any value
    pub fn present(self, keys: &[&str]) -> Self {
        keys.iter()
            .fold(self, |shape, key| shape.field(key, TypeMarker::Any))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Expectation)> {
        self.fields.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Human-readable type name of a document value, used in error messages
pub fn type_name(value: &Document) -> &'static str {
    match value {
        Document::Null => "null",
        Document::Bool(_) => "boolean",
        Document::Number(n) if n.is_f64() => "float",
        Document::Number(_) => "integer",
        Document::String(_) => "string",
        Document::Sequence(_) => "list",
        Document::Mapping(_) => "dictionary",
        Document::Tagged(_) => "tagged value",
    }
}

/// Compact rendering of a value for error messages
pub fn describe(value: &Document) -> String {
    match value {
        Document::String(s) => format!("'{}'", s),
        Document::Null => "null".to_string(),
        Document::Bool(b) => b.to_string(),
        Document::Number(n) => n.to_string(),
        other => type_name(other).to_string(),
    }
}
