//! Type resolution for schema properties.

use crate::ir::TypeRef;
use crate::naming::{singular, to_pascal_case};
use crate::schema::{Kind, SchemaNode};

/// A schema construct that was degraded to [`TypeRef::Any`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gap {
    /// Where it happened (e.g., "CheckoutEvent.tags").
    pub location: String,
    pub detail: String,
}

/// Maps schema kinds to IR types, collecting gaps instead of failing.
#[derive(Debug, Default)]
pub struct TypeResolver {
    scope: String,
    gaps: Vec<Gap>,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the record path gaps are reported under.
    pub fn enter(&mut self, scope: &str) {
        self.scope = scope.to_string();
    }

    /// Resolves a property's type. `context` is the property name; arrays
    /// resolve their items under the singular of it and objects without a
    /// title are named after it.
    pub fn resolve(&mut self, node: &SchemaNode, context: &str) -> TypeRef {
        match node.kind() {
            Kind::String => TypeRef::Text,
            Kind::Integer => TypeRef::Integer,
            Kind::Number => TypeRef::Float,
            Kind::Array => match &node.items {
                Some(items) => TypeRef::Array(Box::new(self.resolve(items, singular(context)))),
                None => {
                    self.gap(context, "array without items".to_string());
                    TypeRef::Array(Box::new(TypeRef::Any))
                }
            },
            Kind::Object => TypeRef::Named(record_name(node, context)),
            Kind::Unrecognized(kind) => {
                self.gap(context, format!("unrecognized type {}", kind));
                TypeRef::Any
            }
        }
    }

    pub fn into_gaps(self) -> Vec<Gap> {
        self.gaps
    }

    fn gap(&mut self, context: &str, detail: String) {
        let location = if self.scope.is_empty() {
            context.to_string()
        } else {
            format!("{}.{}", self.scope, context)
        };
        let gap = Gap { location, detail };
        if self.gaps.contains(&gap) {
            return;
        }
        tracing::warn!(location = %gap.location, detail = %gap.detail, "falling back to untyped field");
        self.gaps.push(gap);
    }
}

/// Type name of an object schema: its title, else the PascalCase context.
pub fn record_name(node: &SchemaNode, context: &str) -> String {
    node.title.clone().unwrap_or_else(|| to_pascal_case(context))
}

/// The object schema a property materializes as a nested record, looking
/// through arrays, along with the context name it is resolved under.
pub fn nested_object<'a>(node: &'a SchemaNode, context: &str) -> Option<(&'a SchemaNode, String)> {
    match node.kind() {
        Kind::Object => Some((node, context.to_string())),
        Kind::Array => node
            .items
            .as_deref()
            .and_then(|items| nested_object(items, singular(context))),
        _ => None,
    }
}
