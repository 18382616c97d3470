//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during compilation.
///
/// Variants in the "Schema Errors" group are local to one schema document:
/// the batch records them and moves on. Everything else stops the run.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(tracksmith::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Schema directory not found: {}", path.display())]
    #[diagnostic(
        code(tracksmith::io::schema_dir_missing),
        help("Point --schemas at a directory containing *.json event schemas")
    )]
    SchemaDirMissing {
        path: PathBuf,
    },

    // =========================================================================
    // Schema Errors
    // =========================================================================
    #[error("Invalid schema '{}': {message}", path.display())]
    #[diagnostic(
        code(tracksmith::schema::invalid),
        help("Schemas must be JSON objects of the form {{ \"title\"?, \"properties\": {{ ... }}, \"required\"?: [...] }}")
    )]
    InvalidSchema {
        path: PathBuf,
        message: String,
    },

    #[error("Record '{record}' maps fields '{first}' and '{second}' to the same wire key '{key}'")]
    #[diagnostic(
        code(tracksmith::schema::duplicate_wire_key),
        help("Give one of the properties a distinct \"key\"")
    )]
    DuplicateWireKey {
        record: String,
        key: String,
        first: String,
        second: String,
    },

    #[error("Nested record '{name}' is declared twice with different shapes")]
    #[diagnostic(
        code(tracksmith::schema::conflicting_record),
        help("Give one of the nested schemas an explicit \"title\"")
    )]
    ConflictingRecord {
        name: String,
    },

    #[error("Schemas '{}' and '{}' both generate record '{name}'", first.display(), second.display())]
    #[diagnostic(
        code(tracksmith::schema::duplicate_record),
        help("Give one of the schemas a distinct \"title\" or rename the file")
    )]
    DuplicateRecord {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    // =========================================================================
    // Dispatch Errors
    // =========================================================================
    #[error("Dispatch file '{}' does not start with the expected header", path.display())]
    #[diagnostic(
        code(tracksmith::dispatch::malformed),
        help("The file was edited by hand or produced for another target. Delete it to regenerate.")
    )]
    MalformedDispatch {
        path: PathBuf,
    },

    // =========================================================================
    // Target Errors
    // =========================================================================
    #[error("Unsupported target language: {target}")]
    #[diagnostic(
        code(tracksmith::target::unsupported),
        help("Supported targets: swift, typescript")
    )]
    UnsupportedTarget {
        target: String,
    },

    #[error("Unsupported schema format: {format}")]
    #[diagnostic(
        code(tracksmith::target::unsupported_format),
        help("Supported schema formats: json")
    )]
    UnsupportedFormat {
        format: String,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error only affects the schema it was raised for.
    pub fn is_schema_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidSchema { .. }
                | Self::DuplicateWireKey { .. }
                | Self::ConflictingRecord { .. }
                | Self::DuplicateRecord { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_errors_are_local() {
        let err = CompilerError::ConflictingRecord { name: "Root.Item".to_string() };
        assert!(err.is_schema_local());

        let err = CompilerError::io("Sources", "permission denied");
        assert!(!err.is_schema_local());
        assert_eq!(err.to_string(), "Failed to access 'Sources': permission denied");
    }
}
