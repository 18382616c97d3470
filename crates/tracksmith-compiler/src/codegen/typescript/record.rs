//! TypeScript class generation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::{param, to_ts_literal, to_ts_type, INDENT};
use crate::codegen::{quote, VALIDATOR_NAME};
use crate::diagnostic::CompilerError;
use crate::ir::{FieldIR, RecordArena, RecordId, RecordIR, TypeRef, Visibility};

/// Generates the module for the root record `root`: the root class with
/// `payload_method` spliced in, then one class per nested record.
///
/// Every class is exported; callers build nested records to pass to the
/// root constructor. Nested records share the module scope, so a name
/// reached twice is emitted once, and only if both shapes agree.
pub fn generate_module(arena: &RecordArena, root: RecordId, payload_method: &str) -> Result<String, CompilerError> {
    let mut code = String::new();
    code.push_str(&format!(
        "import {{ {0} }} from '../Extension/{0}';\n",
        VALIDATOR_NAME
    ));

    let mut emitted: HashMap<&str, &RecordIR> = HashMap::new();
    for (id, _) in arena.walk(root) {
        let record = arena.get(id);
        match emitted.entry(record.name.as_str()) {
            Entry::Occupied(first) if first.get().fields == record.fields => continue,
            Entry::Occupied(_) => {
                return Err(CompilerError::ConflictingRecord {
                    name: record.path.clone(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
        code.push('\n');
        let extra = (record.visibility == Visibility::Public).then_some(payload_method);
        code.push_str(&generate_class(record, extra));
    }
    Ok(code)
}

fn generate_class(record: &RecordIR, payload_method: Option<&str>) -> String {
    let mut code = String::new();
    code.push_str(&format!("export class {} {{\n", record.name));

    for field in &record.fields {
        if let Some(description) = &field.description {
            for line in description.lines() {
                code.push_str(&format!("{}/** {} */\n", INDENT, line));
            }
        }
        match &field.default {
            Some(literal) => code.push_str(&format!(
                "{}readonly {}: {} = {};\n",
                INDENT,
                field.ident,
                to_ts_type(&field.ty),
                to_ts_literal(literal)
            )),
            None => code.push_str(&format!(
                "{}readonly {}: {};\n",
                INDENT,
                field.ident,
                field_type(field)
            )),
        }
    }
    if !record.fields.is_empty() {
        code.push('\n');
    }

    // Wire keys
    if record.fields.is_empty() {
        code.push_str(&format!("{}static readonly wireKeys = {{}} as const;\n", INDENT));
    } else {
        code.push_str(&format!("{}static readonly wireKeys = {{\n", INDENT));
        for (name, key) in record.wire_keys() {
            code.push_str(&format!("{0}{0}{1}: {2},\n", INDENT, name, quote(key)));
        }
        code.push_str(&format!("{}}} as const;\n", INDENT));
    }

    // Constructor
    let params: Vec<&FieldIR> = record.initializer_params().collect();
    code.push('\n');
    code.push_str(&format!(
        "{}constructor({}) {{\n",
        INDENT,
        params
            .iter()
            .map(|f| format!("{}: {}", param(&f.ident), field_type(f)))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    for field in &params {
        code.push_str(&format!(
            "{0}{0}this.{1} = {2};\n",
            INDENT,
            field.ident,
            param(&field.ident)
        ));
    }
    code.push_str(&format!("{}}}\n", INDENT));

    // Wire form
    code.push('\n');
    code.push_str(&format!("{}toWire(): Record<string, unknown> {{\n", INDENT));
    if record.fields.is_empty() {
        code.push_str(&format!("{0}{0}return {{}};\n", INDENT));
    } else {
        code.push_str(&format!("{0}{0}return {{\n", INDENT));
        for field in &record.fields {
            code.push_str(&format!(
                "{0}{0}{0}{1}: {2},\n",
                INDENT,
                quote(&field.wire_key),
                wire_value(&format!("this.{}", field.ident), &field.ty, field.optional, 0)
            ));
        }
        code.push_str(&format!("{0}{0}}};\n", INDENT));
    }
    code.push_str(&format!("{}}}\n", INDENT));

    if let Some(method) = payload_method {
        code.push('\n');
        code.push_str(method);
    }

    code.push_str("}\n");
    code
}

fn field_type(field: &FieldIR) -> String {
    if field.optional {
        format!("{} | undefined", to_ts_type(&field.ty))
    } else {
        to_ts_type(&field.ty)
    }
}

/// Expression converting `expr` of type `ty` to its wire form. Records
/// convert through their own `toWire()`, arrays element-wise.
fn wire_value(expr: &str, ty: &TypeRef, optional: bool, depth: usize) -> String {
    let access = if optional { "?." } else { "." };
    match ty {
        TypeRef::Named(_) => format!("{}{}toWire()", expr, access),
        TypeRef::Array(inner) if inner.record_name().is_some() => {
            let var = format!("v{}", depth);
            format!(
                "{}{}map(({}) => {})",
                expr,
                access,
                var,
                wire_value(&var, inner, false, depth + 1)
            )
        }
        _ => expr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::SchemaSource;
    use crate::lower::lower_schema;
    use crate::schema::SchemaDocument;
    use std::path::{Path, PathBuf};

    fn render(json: &str) -> String {
        let source = SchemaSource {
            path: PathBuf::from("event.json"),
            context_name: "event".to_string(),
            document: SchemaDocument::from_json(Path::new("event.json"), json).unwrap(),
        };
        let lowered = lower_schema(&source, "productItems").unwrap();
        generate_module(&lowered.arena, lowered.root, "  toPayload(): Record<string, unknown> {}\n").unwrap()
    }

    #[test]
    fn test_ping_class() {
        let ts = render(
            r#"{ "title": "Ping", "properties": { "count": { "type": "integer" } }, "required": ["count"] }"#,
        );
        assert_eq!(
            ts,
            "import { PayloadValidator } from '../Extension/PayloadValidator';

export class Ping {
  readonly count: number;

  static readonly wireKeys = {
    count: \"count\",
  } as const;

  constructor(count: number) {
    this.count = count;
  }

  toWire(): Record<string, unknown> {
    return {
      \"count\": this.count,
    };
  }

  toPayload(): Record<string, unknown> {}
}
"
        );
    }

    #[test]
    fn test_defaults_and_optionals() {
        let ts = render(
            r#"{ "title": "PageView", "properties": {
                "schema_version": { "type": "string", "default": "v1" },
                "default": { "type": "string", "key": "dflt" }
            } }"#,
        );
        assert!(ts.contains("  readonly schemaVersion: string = \"v1\";\n"));
        assert!(ts.contains("  readonly default: string | undefined;\n"));
        assert!(ts.contains("    default: \"dflt\",\n"));
        assert!(ts.contains("  constructor(default_: string | undefined) {\n    this.default = default_;\n"));
        assert!(ts.contains("      \"schema_version\": this.schemaVersion,\n"));
    }

    #[test]
    fn test_nested_classes_follow_root() {
        let ts = render(
            r#"{ "title": "Order", "properties": {
                "productItems": { "type": "array", "items": { "type": "object", "properties": {
                    "size": { "type": "object", "properties": { "width": { "type": "number" } } }
                } } }
            }, "required": ["productItems"] }"#,
        );
        assert!(ts.contains("      \"productItems\": this.productItems.map((v0) => v0.toWire()),\n"));
        assert!(ts.contains("      \"size\": this.size?.toWire(),\n"));

        let root = ts.find("export class Order").unwrap();
        let item = ts.find("export class ProductItem").unwrap();
        let size = ts.find("export class Size").unwrap();
        assert!(root < item && item < size);
        assert_eq!(ts.matches("toPayload()").count(), 1);
    }

    #[test]
    fn test_same_name_different_shape_is_a_conflict() {
        let json = r#"{ "title": "Shipment", "properties": {
            "origin": { "type": "object", "title": "Address", "properties": { "city": { "type": "string" } } },
            "carrier": { "type": "object", "properties": {
                "hq": { "type": "object", "title": "Address", "properties": { "zip": { "type": "string" } } }
            } }
        } }"#;
        let source = SchemaSource {
            path: PathBuf::from("shipment.json"),
            context_name: "shipment".to_string(),
            document: SchemaDocument::from_json(Path::new("shipment.json"), json).unwrap(),
        };
        let lowered = lower_schema(&source, "productItems").unwrap();
        let err = generate_module(&lowered.arena, lowered.root, "").unwrap_err();
        assert!(matches!(err, CompilerError::ConflictingRecord { ref name } if name == "Shipment.Carrier.Address"));
    }

    #[test]
    fn test_same_name_same_shape_is_emitted_once() {
        let ts = render(
            r#"{ "title": "Transfer", "properties": {
                "from": { "type": "object", "title": "Account", "properties": { "iban": { "type": "string" } } },
                "meta": { "type": "object", "properties": {
                    "to": { "type": "object", "title": "Account", "properties": { "iban": { "type": "string" } } }
                } }
            } }"#,
        );
        assert_eq!(ts.matches("export class Account {").count(), 1);
        assert!(ts.contains("export class Meta {"));
    }

    #[test]
    fn test_nested_classes_are_exported_for_the_root_constructor() {
        let ts = render(
            r#"{ "title": "Cart", "properties": {
                "productItems": { "type": "array", "items": { "type": "object", "properties": {
                    "sku": { "type": "string" }
                } } }
            }, "required": ["productItems"] }"#,
        );
        assert!(ts.contains("  constructor(productItems: ProductItem[]) {\n"));
        assert!(ts.contains("\nexport class ProductItem {\n"));
        assert!(!ts.contains("\nclass "));
    }
}
