//! Flattening transform generation.

use crate::diagnostic::CompilerError;
use crate::ir::{ColumnIR, FieldIR, LineItemsIR, Literal, RecordArena, RecordIR, TransformIR, TypeRef};

/// Builds the transform for `root`, projecting the line-items field named
/// `line_items_field` into columns. Falls back to a plain encode when the
/// field is missing or is not an array of records.
///
/// Columns share the payload with the root's own keys, so a column whose
/// wire key is already used by a root field is rejected.
pub fn generate(arena: &RecordArena, root: &RecordIR, line_items_field: &str) -> Result<TransformIR, CompilerError> {
    let line_items = root
        .field(line_items_field)
        .and_then(|field| item_record(arena, root, field).map(|item| (field, item)));

    let line_items = match line_items {
        Some((field, item)) => {
            check_columns(root, field, item)?;
            Some(LineItemsIR {
                field_ident: field.ident.clone(),
                wire_key: field.wire_key.clone(),
                optional: field.optional,
                columns: item.fields.iter().map(column).collect(),
            })
        }
        None => {
            match root.field(line_items_field) {
                Some(_) => tracing::warn!(
                    record = %root.name,
                    field = line_items_field,
                    "line-items field is not an array of objects; payload is not flattened"
                ),
                None => tracing::debug!(record = %root.name, field = line_items_field, "no line-items field"),
            }
            None
        }
    };

    Ok(TransformIR {
        record: root.name.clone(),
        line_items,
    })
}

fn check_columns(root: &RecordIR, line_items: &FieldIR, item: &RecordIR) -> Result<(), CompilerError> {
    for field in &item.fields {
        if let Some(taken) = root.fields.iter().find(|f| f.wire_key == field.wire_key) {
            return Err(CompilerError::DuplicateWireKey {
                record: root.path.clone(),
                key: field.wire_key.clone(),
                first: taken.name.clone(),
                second: format!("{}.{}", line_items.name, field.name),
            });
        }
    }
    Ok(())
}

/// The item record of a line-items field, which must be a flat array of
/// records.
fn item_record<'a>(arena: &'a RecordArena, root: &RecordIR, field: &FieldIR) -> Option<&'a RecordIR> {
    match &field.ty {
        TypeRef::Array(inner) => match inner.as_ref() {
            TypeRef::Named(name) => arena
                .lookup(&format!("{}.{}", root.path, name))
                .map(|id| arena.get(id)),
            _ => None,
        },
        _ => None,
    }
}

fn column(field: &FieldIR) -> ColumnIR {
    ColumnIR {
        item_ident: field.ident.clone(),
        column_ident: format!("{}Values", field.ident),
        wire_key: field.wire_key.clone(),
        element: field.ty.clone(),
        optional: field.optional,
        placeholder: (field.optional && field.ty.is_text()).then(|| Literal::Text(String::new())),
    }
}
