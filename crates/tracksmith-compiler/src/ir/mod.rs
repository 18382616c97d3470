//! Language-agnostic intermediate representation.
//!
//! Lowering turns schema documents into this IR and printers turn the IR into
//! target-language source. Nothing in here knows about Swift or TypeScript.

mod dispatch;
mod record;
mod transform;

pub use dispatch::DispatchEntryIR;
pub use record::{FieldIR, RecordArena, RecordId, RecordIR, Visibility};
pub use transform::{ColumnIR, LineItemsIR, TransformIR};

use serde_json::{Number, Value};

/// Types a generated field can have.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Text,
    Integer,
    Float,
    Array(Box<TypeRef>),
    /// A generated record, by type name.
    Named(String),
    /// Fallback for schema kinds with no mapping.
    Any,
}

impl TypeRef {
    pub fn is_text(&self) -> bool {
        matches!(self, TypeRef::Text)
    }

    /// The record name this type refers to, looking through arrays.
    pub fn record_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Array(inner) => inner.record_name(),
            _ => None,
        }
    }
}

/// A compile-time default value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Text(String),
    Number(Number),
    Bool(bool),
    Array(Vec<Literal>),
    Object(Vec<(String, Literal)>),
    Null,
}

impl Literal {
    /// Builds the literal for a schema `default`, coerced to text when the
    /// field is text-typed.
    pub fn for_type(value: &Value, ty: &TypeRef) -> Self {
        match value {
            Value::String(s) => Literal::Text(s.clone()),
            other if ty.is_text() => Literal::Text(other.to_string()),
            other => Literal::from_value(other),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Bool(*b),
            Value::Number(n) => Literal::Number(n.clone()),
            Value::String(s) => Literal::Text(s.clone()),
            Value::Array(items) => Literal::Array(items.iter().map(Literal::from_value).collect()),
            Value::Object(map) => Literal::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Literal::from_value(v)))
                    .collect(),
            ),
        }
    }
}
