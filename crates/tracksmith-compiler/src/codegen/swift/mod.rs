//! Swift printer: `Codable` structs, a dictionary-producing extension, and
//! static tracker methods.

mod dispatch;
mod record;
mod transform;
mod validator;

use super::{quote, Printer};
use crate::config::CompilerConfig;
use crate::diagnostic::CompilerError;
use crate::ir::{DispatchEntryIR, Literal, RecordArena, RecordId, TransformIR, TypeRef};

const INDENT: &str = "    ";

/// Swift keywords that must be escaped with backticks when used as names.
const KEYWORDS: &[&str] = &[
    "as", "associatedtype", "break", "case", "catch", "class", "continue", "default", "defer",
    "deinit", "do", "else", "enum", "extension", "fallthrough", "false", "fileprivate", "for",
    "func", "guard", "if", "import", "in", "init", "inout", "internal", "is", "let", "nil",
    "operator", "private", "protocol", "public", "repeat", "return", "self", "static", "struct",
    "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias", "var", "where",
    "while",
];

/// Renders Swift sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwiftPrinter;

impl Printer for SwiftPrinter {
    fn target(&self) -> &str {
        "swift"
    }

    fn extension(&self) -> &str {
        "swift"
    }

    fn record_file(&self, arena: &RecordArena, root: RecordId, transform: &TransformIR) -> Result<String, CompilerError> {
        Ok(format!(
            "{}\n{}",
            record::generate_record(arena, root),
            transform::generate_transform(transform)
        ))
    }

    fn dispatch_header(&self, config: &CompilerConfig) -> String {
        dispatch::generate_header(&config.tracker)
    }

    fn dispatch_entry(&self, entry: &DispatchEntryIR, config: &CompilerConfig) -> String {
        dispatch::generate_entry(entry, &config.tracker)
    }

    fn dispatch_closer(&self) -> &str {
        "}"
    }

    fn validator(&self) -> &'static str {
        validator::PAYLOAD_VALIDATOR
    }
}

/// Converts an IR type to a Swift type string.
pub fn to_swift_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Text => "String".to_string(),
        TypeRef::Integer => "Int".to_string(),
        TypeRef::Float => "Double".to_string(),
        TypeRef::Array(inner) => format!("[{}]", to_swift_type(inner)),
        TypeRef::Named(name) => name.clone(),
        TypeRef::Any => "Any".to_string(),
    }
}

/// Converts a default literal to Swift source.
pub fn to_swift_literal(literal: &Literal) -> String {
    match literal {
        Literal::Text(s) => quote(s),
        Literal::Number(n) => n.to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "nil".to_string(),
        Literal::Array(items) => format!(
            "[{}]",
            items.iter().map(to_swift_literal).collect::<Vec<_>>().join(", ")
        ),
        Literal::Object(entries) if entries.is_empty() => "[:]".to_string(),
        Literal::Object(entries) => format!(
            "[{}]",
            entries
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), to_swift_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Escapes an identifier that collides with a Swift keyword.
pub fn ident(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    #[test]
    fn test_swift_types() {
        assert_eq!(to_swift_type(&TypeRef::Text), "String");
        assert_eq!(to_swift_type(&TypeRef::Integer), "Int");
        assert_eq!(to_swift_type(&TypeRef::Float), "Double");
        assert_eq!(to_swift_type(&TypeRef::Any), "Any");
        assert_eq!(
            to_swift_type(&TypeRef::Array(Box::new(TypeRef::Named("ProductItem".into())))),
            "[ProductItem]"
        );
    }

    #[test]
    fn test_swift_literals() {
        assert_eq!(to_swift_literal(&Literal::Text("v1".into())), "\"v1\"");
        assert_eq!(to_swift_literal(&Literal::Number(Number::from(50))), "50");
        assert_eq!(
            to_swift_literal(&Literal::Array(vec![Literal::Text("a".into()), Literal::Text("b".into())])),
            "[\"a\", \"b\"]"
        );
        assert_eq!(to_swift_literal(&Literal::Object(vec![])), "[:]");
        assert_eq!(to_swift_literal(&Literal::Null), "nil");
    }

    #[test]
    fn test_keyword_escaping() {
        assert_eq!(ident("default"), "`default`");
        assert_eq!(ident("sku"), "sku");
    }
}
