//! Swift `convertToDictionary()` extension generation.

use super::{ident, to_swift_literal, to_swift_type};
use crate::codegen::{quote, VALIDATOR_NAME};
use crate::ir::{ColumnIR, TransformIR};

/// Generates the extension converting a record to its flattened payload.
///
/// Encoding failures are printed and produce an empty dictionary.
pub fn generate_transform(transform: &TransformIR) -> String {
    let mut code = String::new();

    code.push_str(&format!("\nextension {} {{\n\n", transform.record));
    code.push_str("    func convertToDictionary() -> [String: Any] {\n");

    if let Some(items) = &transform.line_items {
        for column in &items.columns {
            code.push_str(&format!(
                "        var {}: [{}] = []\n",
                column.column_ident,
                column_element_type(column)
            ));
        }
        code.push('\n');
        code.push_str(&format!(
            "        for item in self.{}{} {{\n",
            ident(&items.field_ident),
            if items.optional { " ?? []" } else { "" }
        ));
        for column in &items.columns {
            code.push_str(&format!(
                "            {}.append({})\n",
                column.column_ident,
                column_value(column)
            ));
        }
        code.push_str("        }\n\n");
    }

    let binding = if transform.line_items.is_some() { "var" } else { "let" };
    code.push_str("        let encoder = JSONEncoder()\n");
    code.push_str("        do {\n");
    code.push_str("            let data = try encoder.encode(self)\n");
    code.push_str(&format!(
        "            {} dictionary = try JSONSerialization.jsonObject(with: data, options: .allowFragments) as? [String: Any] ?? [:]\n",
        binding
    ));

    if let Some(items) = &transform.line_items {
        code.push('\n');
        for column in &items.columns {
            code.push_str(&format!(
                "            dictionary[{}] = {}\n",
                quote(&column.wire_key),
                column.column_ident
            ));
        }
        code.push_str(&format!(
            "            dictionary.removeValue(forKey: {})\n",
            quote(&items.wire_key)
        ));
    }

    code.push('\n');
    code.push_str(&format!("            return {}.checkPayload(dictionary)\n", VALIDATOR_NAME));
    code.push_str("        } catch {\n");
    code.push_str("            print(\"Error converting to dictionary: \\(error)\")\n");
    code.push_str("            return [:]\n");
    code.push_str("        }\n");
    code.push_str("    }\n");
    code.push_str("}\n");

    code
}

/// Optional fields without a placeholder are stored as `Any` so a missing
/// value can be recorded as `NSNull`.
fn column_element_type(column: &ColumnIR) -> String {
    if column.optional && column.placeholder.is_none() {
        "Any".to_string()
    } else {
        to_swift_type(&column.element)
    }
}

fn column_value(column: &ColumnIR) -> String {
    let access = format!("item.{}", ident(&column.item_ident));
    match (&column.placeholder, column.optional) {
        (Some(placeholder), _) => format!("{} ?? {}", access, to_swift_literal(placeholder)),
        (None, true) => format!("{}.map {{ $0 as Any }} ?? NSNull()", access),
        (None, false) => access,
    }
}
