//! Event schema documents.
//!
//! A deliberately small slice of JSON Schema: typed properties, nested
//! objects and arrays, `required`, `default`, plus the `x-api-*` extension
//! keys that drive dispatch generation.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::diagnostic::CompilerError;

/// Default tracker operation name when a schema has no `x-api-name`.
pub const DEFAULT_API_NAME: &str = "trackEvent";
/// Default event-type tag when a schema has no `x-api-event-type`.
pub const DEFAULT_EVENT_TYPE: &str = "event";
/// Default description when a schema has no `x-api-description`.
pub const DEFAULT_API_DESCRIPTION: &str = "Track an event to the analytics platform";

/// A parsed event schema file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchemaDocument {
    /// The root object schema.
    #[serde(flatten)]
    pub root: SchemaNode,

    #[serde(rename = "x-api-name")]
    pub api_name: Option<String>,

    #[serde(rename = "x-api-event-type")]
    pub api_event_type: Option<String>,

    #[serde(rename = "x-api-description")]
    pub api_description: Option<String>,

    /// Overrides the configured line-items property for this schema.
    #[serde(rename = "x-line-items")]
    pub line_items: Option<String>,
}

/// One schema node: the root, a property, or an array's `items`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SchemaNode {
    /// Raw `type` value. Kept raw so unions and typos degrade instead of
    /// failing the parse.
    #[serde(rename = "type")]
    pub kind: Option<Value>,

    pub title: Option<String>,

    /// Properties in document order.
    #[serde(default, deserialize_with = "ordered_properties")]
    pub properties: Vec<(String, SchemaNode)>,

    #[serde(default)]
    pub required: Vec<String>,

    pub items: Option<Box<SchemaNode>>,

    pub default: Option<Value>,

    pub description: Option<String>,

    /// Wire key override; the property name is used when absent.
    pub key: Option<String>,
}

/// The declared kind of a schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    String,
    Integer,
    Number,
    Array,
    Object,
    /// Anything the compiler has no mapping for, described for diagnostics.
    Unrecognized(String),
}

impl SchemaDocument {
    /// Parses a schema document from JSON text.
    pub fn from_json(path: &Path, content: &str) -> Result<Self, CompilerError> {
        serde_json::from_str(content).map_err(|e| CompilerError::InvalidSchema {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn api_name(&self) -> &str {
        self.api_name.as_deref().unwrap_or(DEFAULT_API_NAME)
    }

    pub fn api_event_type(&self) -> &str {
        self.api_event_type.as_deref().unwrap_or(DEFAULT_EVENT_TYPE)
    }

    pub fn api_description(&self) -> &str {
        self.api_description.as_deref().unwrap_or(DEFAULT_API_DESCRIPTION)
    }
}

impl SchemaNode {
    /// Classifies the `type` keyword. A node without `type` but with
    /// `properties` is an object.
    pub fn kind(&self) -> Kind {
        match &self.kind {
            Some(Value::String(s)) => match s.as_str() {
                "string" => Kind::String,
                "integer" => Kind::Integer,
                "number" => Kind::Number,
                "array" => Kind::Array,
                "object" => Kind::Object,
                other => Kind::Unrecognized(other.to_string()),
            },
            Some(other) => Kind::Unrecognized(other.to_string()),
            None if !self.properties.is_empty() => Kind::Object,
            None => Kind::Unrecognized("<missing>".to_string()),
        }
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }
}

/// Deserializes a `properties` object into an ordered list, rejecting
/// repeated names.
fn ordered_properties<'de, D>(deserializer: D) -> Result<Vec<(String, SchemaNode)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PropertiesVisitor;

    impl<'de> Visitor<'de> for PropertiesVisitor {
        type Value = Vec<(String, SchemaNode)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of property names to schemas")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut properties: Vec<(String, SchemaNode)> = Vec::new();
            while let Some((name, node)) = map.next_entry::<String, SchemaNode>()? {
                if properties.iter().any(|(existing, _)| *existing == name) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate property '{}'",
                        name
                    )));
                }
                properties.push((name, node));
            }
            Ok(properties)
        }
    }

    deserializer.deserialize_map(PropertiesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<SchemaDocument, CompilerError> {
        SchemaDocument::from_json(Path::new("test.json"), json)
    }

    #[test]
    fn test_properties_keep_document_order() {
        let doc = parse(
            r#"{ "properties": { "zeta": { "type": "string" }, "alpha": { "type": "integer" }, "mid": { "type": "number" } } }"#,
        )
        .unwrap();
        let names: Vec<&str> = doc.root.properties.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_property_is_rejected() {
        let err = parse(r#"{ "properties": { "a": { "type": "string" }, "a": { "type": "integer" } } }"#)
            .unwrap_err();
        assert!(matches!(err, CompilerError::InvalidSchema { .. }));
        assert!(err.to_string().contains("duplicate property 'a'"));
    }

    #[test]
    fn test_api_metadata_defaults() {
        let doc = parse(r#"{ "title": "Ping", "properties": {} }"#).unwrap();
        assert_eq!(doc.api_name(), DEFAULT_API_NAME);
        assert_eq!(doc.api_event_type(), DEFAULT_EVENT_TYPE);
        assert_eq!(doc.api_description(), DEFAULT_API_DESCRIPTION);

        let doc = parse(
            r#"{ "properties": {}, "x-api-name": "trackPing", "x-api-event-type": "pv", "x-api-description": "Ping" }"#,
        )
        .unwrap();
        assert_eq!(doc.api_name(), "trackPing");
        assert_eq!(doc.api_event_type(), "pv");
        assert_eq!(doc.api_description(), "Ping");
    }

    #[test]
    fn test_kind_classification() {
        let doc = parse(
            r#"{ "properties": {
                "a": { "type": "string" },
                "b": { "type": ["string", "null"] },
                "c": { "type": "boolean" },
                "d": { "properties": { "x": { "type": "integer" } } },
                "e": {}
            } }"#,
        )
        .unwrap();
        let kinds: Vec<Kind> = doc.root.properties.iter().map(|(_, n)| n.kind()).collect();
        assert_eq!(kinds[0], Kind::String);
        assert!(matches!(kinds[1], Kind::Unrecognized(_)));
        assert_eq!(kinds[2], Kind::Unrecognized("boolean".to_string()));
        assert_eq!(kinds[3], Kind::Object);
        assert_eq!(kinds[4], Kind::Unrecognized("<missing>".to_string()));
    }

    #[test]
    fn test_null_default_is_no_default() {
        let doc = parse(r#"{ "properties": { "a": { "type": "string", "default": null } } }"#).unwrap();
        assert!(doc.root.property("a").unwrap().default.is_none());
    }

    #[test]
    fn test_non_object_root_is_invalid() {
        assert!(parse("[1, 2, 3]").is_err());
    }
}
