//! TypeScript printer: classes with wire-key maps, a payload method on the
//! root record, and a class of static tracker methods.

mod dispatch;
mod record;
mod transform;
mod validator;

use super::{quote, Printer};
use crate::config::CompilerConfig;
use crate::diagnostic::CompilerError;
use crate::ir::{DispatchEntryIR, Literal, RecordArena, RecordId, TransformIR, TypeRef};

const INDENT: &str = "  ";

/// Reserved words that cannot be used as parameter names.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "let", "static", "yield", "await",
];

/// Renders TypeScript sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptPrinter;

impl Printer for TypeScriptPrinter {
    fn target(&self) -> &str {
        "typescript"
    }

    fn extension(&self) -> &str {
        "ts"
    }

    fn record_file(&self, arena: &RecordArena, root: RecordId, transform: &TransformIR) -> Result<String, CompilerError> {
        record::generate_module(arena, root, &transform::generate_transform(transform))
    }

    fn dispatch_header(&self, config: &CompilerConfig) -> String {
        dispatch::generate_header(&config.tracker, &config.dispatch_file)
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

/// Converts an IR type to a TypeScript type string.
pub fn to_ts_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Text => "string".to_string(),
        TypeRef::Integer | TypeRef::Float => "number".to_string(),
        TypeRef::Array(inner) => format!("{}[]", to_ts_type(inner)),
        TypeRef::Named(name) => name.clone(),
        TypeRef::Any => "unknown".to_string(),
    }
}

/// Converts a default literal to TypeScript source.
pub fn to_ts_literal(literal: &Literal) -> String {
    match literal {
        Literal::Text(s) => quote(s),
        Literal::Number(n) => n.to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "null".to_string(),
        Literal::Array(items) => format!(
            "[{}]",
            items.iter().map(to_ts_literal).collect::<Vec<_>>().join(", ")
        ),
        Literal::Object(entries) if entries.is_empty() => "{}".to_string(),
        Literal::Object(entries) => format!(
            "{{ {} }}",
            entries
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), to_ts_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Parameter name for an identifier, suffixed with `_` when reserved.
pub fn param(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}
