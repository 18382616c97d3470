//! JSON event schema frontend.

use std::path::Path;

use walkdir::WalkDir;

use super::{Frontend, SchemaBatch, SchemaSource, SkippedSchema};
use crate::diagnostic::CompilerError;
use crate::schema::SchemaDocument;

/// Reads `*.json` schemas from the top level of a directory.
#[derive(Debug, Default)]
pub struct JsonFrontend;

impl JsonFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for JsonFrontend {
    fn format(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse_directory(&mut self, dir: &Path) -> Result<SchemaBatch, CompilerError> {
        if !dir.is_dir() {
            return Err(CompilerError::SchemaDirMissing {
                path: dir.to_path_buf(),
            });
        }

        let mut batch = SchemaBatch::default();

        // Sorted so repeated runs see schemas in the same order.
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .follow_links(true)
        {
            let entry = entry.map_err(|e| CompilerError::io(dir, e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .map(|ext| self.extensions().contains(&ext.to_string_lossy().as_ref()))
                .unwrap_or(false);
            if !matches {
                continue;
            }

            let content = std::fs::read_to_string(path)
                .map_err(|e| CompilerError::io(path, e.to_string()))?;

            match SchemaDocument::from_json(path, &content) {
                Ok(document) => {
                    let context_name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default();
                    tracing::debug!(path = %path.display(), "parsed schema");
                    batch.sources.push(SchemaSource {
                        path: path.to_path_buf(),
                        context_name,
                        document,
                    });
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping schema");
                    batch.rejected.push(SkippedSchema {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(batch)
    }
}
