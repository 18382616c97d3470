//! Record generation: schema nodes to [`RecordIR`] values in an arena.

use super::resolve::{nested_object, record_name, TypeResolver};
use crate::diagnostic::CompilerError;
use crate::ir::{FieldIR, Literal, RecordArena, RecordId, RecordIR, Visibility};
use crate::naming::to_camel_case;
use crate::schema::SchemaNode;

/// Builds records depth-first: nested records are in the arena before the
/// record that refers to them.
pub struct RecordGenerator<'a> {
    arena: &'a mut RecordArena,
    resolver: &'a mut TypeResolver,
}

impl<'a> RecordGenerator<'a> {
    pub fn new(arena: &'a mut RecordArena, resolver: &'a mut TypeResolver) -> Self {
        Self { arena, resolver }
    }

    /// Generates the record `name` for `node`. `parent` is the qualified path
    /// of the enclosing record; `None` makes this a root record.
    pub fn generate(
        &mut self,
        name: &str,
        node: &SchemaNode,
        parent: Option<&str>,
    ) -> Result<RecordId, CompilerError> {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, name),
            None => name.to_string(),
        };

        self.resolver.enter(&path);
        let fields: Vec<FieldIR> = node
            .properties
            .iter()
            .map(|(prop, child)| self.field(node, prop, child))
            .collect();

        let mut nested = Vec::new();
        for (prop, child) in &node.properties {
            if let Some((object, context)) = nested_object(child, prop) {
                let nested_name = record_name(object, &context);
                let id = self.generate(&nested_name, object, Some(&path))?;
                if !nested.contains(&id) {
                    nested.push(id);
                }
            }
        }

        let record = RecordIR {
            name: name.to_string(),
            path,
            visibility: if parent.is_none() {
                Visibility::Public
            } else {
                Visibility::Internal
            },
            fields,
            nested,
        };
        record.check_wire_keys()?;
        self.arena.insert(record)
    }

    fn field(&mut self, owner: &SchemaNode, prop: &str, child: &SchemaNode) -> FieldIR {
        let ty = self.resolver.resolve(child, prop);
        let default = child.default.as_ref().map(|v| Literal::for_type(v, &ty));
        FieldIR {
            name: prop.to_string(),
            ident: to_camel_case(prop),
            optional: default.is_none() && !owner.is_required(prop),
            default,
            wire_key: child.key.clone().unwrap_or_else(|| prop.to_string()),
            description: child.description.clone().filter(|d| !d.is_empty()),
            ty,
        }
    }
}
