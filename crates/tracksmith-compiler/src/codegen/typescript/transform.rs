//! TypeScript `toPayload()` generation.

use super::{to_ts_literal, to_ts_type};
use crate::codegen::{quote, VALIDATOR_NAME};
use crate::ir::{ColumnIR, TransformIR};

/// Generates the `toPayload()` method of the root class, indented for the
/// class body.
///
/// Anything thrown while building the payload is logged and produces an
/// empty object.
pub fn generate_transform(transform: &TransformIR) -> String {
    let mut code = String::new();
    code.push_str("  toPayload(): Record<string, unknown> {\n");
    code.push_str("    try {\n");

    if let Some(items) = &transform.line_items {
        for column in &items.columns {
            code.push_str(&format!(
                "      const {}: {}[] = [];\n",
                column.column_ident,
                column_element_type(column)
            ));
        }
        code.push('\n');
        code.push_str(&format!(
            "      for (const item of this.{}{}) {{\n",
            items.field_ident,
            if items.optional { " ?? []" } else { "" }
        ));
        for column in &items.columns {
            code.push_str(&format!(
                "        {}.push({});\n",
                column.column_ident,
                column_value(column)
            ));
        }
        code.push_str("      }\n\n");
    }

    code.push_str("      const payload = this.toWire();\n");

    if let Some(items) = &transform.line_items {
        for column in &items.columns {
            code.push_str(&format!(
                "      payload[{}] = {};\n",
                quote(&column.wire_key),
                column.column_ident
            ));
        }
        code.push_str(&format!("      delete payload[{}];\n", quote(&items.wire_key)));
    }

    code.push('\n');
    code.push_str(&format!("      return {}.checkPayload(payload);\n", VALIDATOR_NAME));
    code.push_str("    } catch (error) {\n");
    code.push_str("      console.error(`Error converting to payload: ${error}`);\n");
    code.push_str("      return {};\n");
    code.push_str("    }\n");
    code.push_str("  }\n");
    code
}

/// Element type of a column array, parenthesized when it is a union.
/// Optional fields without a placeholder are recorded as `null`.
fn column_element_type(column: &ColumnIR) -> String {
    let element = to_ts_type(&column.element);
    if column.optional && column.placeholder.is_none() {
        format!("({} | null)", element)
    } else {
        element
    }
}

fn column_value(column: &ColumnIR) -> String {
    let access = format!("item.{}", column.item_ident);
    match (&column.placeholder, column.optional) {
        (Some(placeholder), _) => format!("{} ?? {}", access, to_ts_literal(placeholder)),
        (None, true) => format!("{} ?? null", access),
        (None, false) => access,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{LineItemsIR, Literal, TypeRef};

    #[test]
    fn test_payload_method_flattens_columns() {
        let transform = TransformIR {
            record: "Checkout".to_string(),
            line_items: Some(LineItemsIR {
                field_ident: "productItems".to_string(),
                wire_key: "items".to_string(),
                optional: true,
                columns: vec![
                    ColumnIR {
                        item_ident: "name".to_string(),
                        column_ident: "nameValues".to_string(),
                        wire_key: "itemname".to_string(),
                        element: TypeRef::Text,
                        optional: true,
                        placeholder: Some(Literal::Text(String::new())),
                    },
                    ColumnIR {
                        item_ident: "price".to_string(),
                        column_ident: "priceValues".to_string(),
                        wire_key: "price".to_string(),
                        element: TypeRef::Float,
                        optional: true,
                        placeholder: None,
                    },
                ],
            }),
        };
        let ts = generate_transform(&transform);
        assert!(ts.starts_with("  toPayload(): Record<string, unknown> {\n    try {\n"));
        assert!(ts.contains("      const nameValues: string[] = [];\n"));
        assert!(ts.contains("      const priceValues: (number | null)[] = [];\n"));
        assert!(ts.contains("      for (const item of this.productItems ?? []) {\n"));
        assert!(ts.contains("        nameValues.push(item.name ?? \"\");\n"));
        assert!(ts.contains("        priceValues.push(item.price ?? null);\n"));
        assert!(ts.contains("      payload[\"itemname\"] = nameValues;\n"));
        assert!(ts.contains("      delete payload[\"items\"];\n"));
        assert!(ts.contains("      return PayloadValidator.checkPayload(payload);\n"));
        assert!(ts.ends_with(
            "    } catch (error) {\n      console.error(`Error converting to payload: ${error}`);\n      return {};\n    }\n  }\n"
        ));
    }

    #[test]
    fn test_plain_payload_method() {
        let ts = generate_transform(&TransformIR {
            record: "Ping".to_string(),
            line_items: None,
        });
        assert_eq!(
            ts,
            "  toPayload(): Record<string, unknown> {
    try {
      const payload = this.toWire();

      return PayloadValidator.checkPayload(payload);
    } catch (error) {
      console.error(`Error converting to payload: ${error}`);
      return {};
    }
  }
"
        );
    }
}
