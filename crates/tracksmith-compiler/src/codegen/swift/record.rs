//! Swift struct generation.

use super::{ident, to_swift_literal, to_swift_type, INDENT};
use crate::codegen::{indent, quote};
use crate::ir::{FieldIR, RecordArena, RecordId, Visibility};

/// Generates the struct for `id`, with its nested structs embedded one
/// indent level deeper per nesting level.
pub fn generate_record(arena: &RecordArena, id: RecordId) -> String {
    let record = arena.get(id);
    let public = record.visibility == Visibility::Public;
    let mut lines: Vec<String> = Vec::new();

    if public {
        lines.push("import Foundation".to_string());
        lines.push(String::new());
    }

    lines.push(format!(
        "{}struct {}: Codable {{",
        if public { "public " } else { "" },
        record.name
    ));

    for field in &record.fields {
        if let Some(description) = &field.description {
            for line in description.lines() {
                lines.push(format!("{}/// {}", INDENT, line));
            }
        }
        match &field.default {
            Some(literal) => lines.push(format!(
                "{}let {}: {} = {}",
                INDENT,
                ident(&field.ident),
                to_swift_type(&field.ty),
                to_swift_literal(literal)
            )),
            None => lines.push(format!("{}let {}", INDENT, declaration(field))),
        }
    }

    // An enum with a raw type needs at least one case.
    if !record.fields.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}enum CodingKeys: String, CodingKey {{", INDENT));
        for (name, key) in record.wire_keys() {
            lines.push(format!("{0}{0}case {1} = {2}", INDENT, ident(name), quote(key)));
        }
        lines.push(format!("{}}}", INDENT));
    }

    let params: Vec<&FieldIR> = record.initializer_params().collect();
    lines.push(String::new());
    lines.push(format!(
        "{}init({}) {{",
        INDENT,
        params.iter().map(|f| declaration(f)).collect::<Vec<_>>().join(", ")
    ));
    for field in &params {
        let name = ident(&field.ident);
        lines.push(format!("{0}{0}self.{1} = {1}", INDENT, name));
    }
    lines.push(format!("{}}}", INDENT));

    for &child in &record.nested {
        lines.push(String::new());
        lines.push(indent(&generate_record(arena, child), INDENT, 1));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

/// `name: Type` with `?` for optional fields.
fn declaration(field: &FieldIR) -> String {
    format!(
        "{}: {}{}",
        ident(&field.ident),
        to_swift_type(&field.ty),
        if field.optional { "?" } else { "" }
    )
}
