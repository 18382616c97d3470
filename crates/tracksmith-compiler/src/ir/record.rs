//! Record intermediate representation.

use std::collections::HashMap;

use super::{Literal, TypeRef};
use crate::diagnostic::CompilerError;

/// Index of a record in a [`RecordArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

/// Whether a record is part of the generated module's public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The root record of a schema file.
    Public,
    /// A nested record, embedded inside its parent.
    Internal,
}

/// A generated record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordIR {
    /// Type name (e.g., "CheckoutEvent", "ProductItem").
    pub name: String,

    /// Qualified path from the root (e.g., "CheckoutEvent.ProductItem").
    pub path: String,

    pub visibility: Visibility,

    /// Fields in schema property order.
    pub fields: Vec<FieldIR>,

    /// Directly nested records, in the order they were first referenced.
    pub nested: Vec<RecordId>,
}

/// A resolved field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIR {
    /// Property name as written in the schema.
    pub name: String,

    /// Identifier in generated code.
    pub ident: String,

    pub ty: TypeRef,

    /// Not required and without a default.
    pub optional: bool,

    /// Compile-time value; defaulted fields are never initializer parameters.
    pub default: Option<Literal>,

    /// Key in the serialized payload.
    pub wire_key: String,

    pub description: Option<String>,
}

impl FieldIR {
    pub fn is_defaulted(&self) -> bool {
        self.default.is_some()
    }
}

impl RecordIR {
    /// Fields the initializer takes, in field order.
    pub fn initializer_params(&self) -> impl Iterator<Item = &FieldIR> {
        self.fields.iter().filter(|f| !f.is_defaulted())
    }

    /// Identifier to wire key, one entry per field (defaulted fields included).
    pub fn wire_keys(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.ident.as_str(), f.wire_key.as_str()))
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldIR> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Rejects two fields sharing a wire key.
    pub fn check_wire_keys(&self) -> Result<(), CompilerError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for field in &self.fields {
            if let Some(first) = seen.insert(field.wire_key.as_str(), field.name.as_str()) {
                return Err(CompilerError::DuplicateWireKey {
                    record: self.path.clone(),
                    key: field.wire_key.clone(),
                    first: first.to_string(),
                    second: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Owns every record generated for one schema. Records are keyed by their
/// qualified path so a shape reused under the same name is stored once.
#[derive(Debug, Default)]
pub struct RecordArena {
    records: Vec<RecordIR>,
    by_path: HashMap<String, RecordId>,
}

impl RecordArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, or returns the existing id when an identical record
    /// is already stored under the same path.
    pub fn insert(&mut self, record: RecordIR) -> Result<RecordId, CompilerError> {
        if let Some(&id) = self.by_path.get(&record.path) {
            if self.records[id.0] == record {
                return Ok(id);
            }
            return Err(CompilerError::ConflictingRecord { name: record.path });
        }

        let id = RecordId(self.records.len());
        self.by_path.insert(record.path.clone(), id);
        self.records.push(record);
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> &RecordIR {
        &self.records[id.0]
    }

    pub fn lookup(&self, path: &str) -> Option<RecordId> {
        self.by_path.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records reachable from `root`, parent before children, with their
    /// nesting depth (root = 0).
    pub fn walk(&self, root: RecordId) -> Vec<(RecordId, usize)> {
        let mut out = Vec::new();
        self.walk_into(root, 0, &mut out);
        out
    }

    fn walk_into(&self, id: RecordId, depth: usize, out: &mut Vec<(RecordId, usize)>) {
        out.push((id, depth));
        for &child in &self.get(id).nested {
            self.walk_into(child, depth + 1, out);
        }
    }
}
