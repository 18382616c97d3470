//! Schema frontends for discovering and parsing event schemas.
//!
//! Each frontend is responsible for:
//! 1. Discovering schema files in its format
//! 2. Parsing them into [`SchemaDocument`] values
//!
//! Files that fail to parse are reported, not fatal. Only I/O failures stop
//! the batch.

pub mod json;

use std::path::{Path, PathBuf};

use crate::diagnostic::CompilerError;
use crate::schema::SchemaDocument;

/// Trait for schema frontends.
pub trait Frontend {
    /// Returns the format name (e.g., "json").
    fn format(&self) -> &str;

    /// Returns file extensions this frontend handles (e.g., ["json"]).
    fn extensions(&self) -> &[&str];

    /// Parses all schema files in the given directory.
    fn parse_directory(&mut self, dir: &Path) -> Result<SchemaBatch, CompilerError>;
}

/// One parsed schema file.
#[derive(Debug, Clone)]
pub struct SchemaSource {
    pub path: PathBuf,
    /// File stem, used as the root type name when the schema has no title.
    pub context_name: String,
    pub document: SchemaDocument,
}

/// A schema that was left out of the run, and why.
#[derive(Debug, Clone)]
pub struct SkippedSchema {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a frontend found in a schema directory, in processing order.
#[derive(Debug, Default)]
pub struct SchemaBatch {
    pub sources: Vec<SchemaSource>,
    pub rejected: Vec<SkippedSchema>,
}

/// Creates the frontend for the given schema format.
pub fn create_frontend(format: &str) -> Result<Box<dyn Frontend>, CompilerError> {
    match format {
        "json" => Ok(Box::new(json::JsonFrontend::new())),
        _ => Err(CompilerError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}
