//! Target-language code generation from IR.
//!
//! A [`Printer`] renders the IR for one target language:
//! - Record files (root record, nested records, flattening transform)
//! - Dispatch entries plus the fixed header and closer of the dispatch file
//! - The static payload validator
//!
//! Printers are pure: file placement and the dispatch accumulation live in
//! the compiler.

pub mod swift;
pub mod typescript;

use crate::config::CompilerConfig;
use crate::diagnostic::CompilerError;
use crate::ir::{DispatchEntryIR, RecordArena, RecordId, TransformIR};

/// Name of the static validator, shared by every target.
pub const VALIDATOR_NAME: &str = "PayloadValidator";

/// Trait for target-language printers.
pub trait Printer {
    /// Returns the target name (e.g., "swift").
    fn target(&self) -> &str;

    /// File extension of generated sources (e.g., "swift").
    fn extension(&self) -> &str;

    /// Renders the record file for `root`: the record with its nested records
    /// and the flattening transform. Records the target cannot lay out side by
    /// side are a schema-local error.
    fn record_file(&self, arena: &RecordArena, root: RecordId, transform: &TransformIR) -> Result<String, CompilerError>;

    /// Fixed text the dispatch file starts with, ending with the line that
    /// opens the enclosing block.
    fn dispatch_header(&self, config: &CompilerConfig) -> String;

    /// One dispatch entry. Entries never contain blank lines.
    fn dispatch_entry(&self, entry: &DispatchEntryIR, config: &CompilerConfig) -> String;

    /// Line that closes the dispatch file's enclosing block.
    fn dispatch_closer(&self) -> &str;

    /// Contents of the static payload validator.
    fn validator(&self) -> &'static str;
}

/// Creates the printer for the given target language.
pub fn create_printer(target: &str) -> Result<Box<dyn Printer>, CompilerError> {
    match target {
        "swift" => Ok(Box::new(swift::SwiftPrinter)),
        "typescript" | "ts" => Ok(Box::new(typescript::TypeScriptPrinter)),
        _ => Err(CompilerError::UnsupportedTarget {
            target: target.to_string(),
        }),
    }
}

/// Indents every non-empty line of `text` by `level` steps of `unit`.
pub(crate) fn indent(text: &str, unit: &str, level: usize) -> String {
    let prefix = unit.repeat(level);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes `s` for a double-quoted string literal (same rules in Swift and
/// TypeScript for the characters we care about).
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", "    ", 1), "    a\n\n    b");
        assert_eq!(indent("a", "  ", 2), "    a");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("v1"), "\"v1\"");
        assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn test_unsupported_target() {
        assert!(create_printer("swift").is_ok());
        assert!(create_printer("ts").is_ok());
        assert!(matches!(
            create_printer("kotlin"),
            Err(CompilerError::UnsupportedTarget { .. })
        ));
    }
}
