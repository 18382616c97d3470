//! # Tracksmith Compiler
//!
//! This crate compiles JSON-Schema analytics event definitions into typed
//! client code: one record per event (with its nested records), a transform
//! that flattens line items into the column layout the tracking sink
//! expects, and one dispatch entry per event in a shared tracker file.
//!
//! ## Supported Targets
//!
//! - Swift (default)
//! - TypeScript
//!
//! ## Architecture
//!
//! ```text
//! Schema directory (*.json)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  Discovery + parsing
//! │ (JSON → doc) │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Lower     │  Type resolution, records, transform, dispatch entry
//! │  (doc → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Printer    │  Swift / TypeScript source
//! │ (IR → text)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Dispatch   │  Read once, append new entries, write once
//! │   artifact   │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tracksmith_compiler::{Compiler, CompilerConfig};
//!
//! let config = CompilerConfig {
//!     schema_dir: "Schema".into(),
//!     out_dir: "Sources".into(),
//!     ..CompilerConfig::default()
//! };
//!
//! let result = Compiler::new(config).compile()?;
//! println!("{} schemas, {} new entries", result.schemas, result.entries_added);
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod frontend;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod schema;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use config::{CompilerConfig, TrackerConfig};
pub use diagnostic::CompilerError;
pub use frontend::SkippedSchema;
pub use lower::Gap;

use codegen::{Printer, VALIDATOR_NAME};
use dispatch::DispatchArtifact;
use frontend::SchemaBatch;
use lower::LoweredSchema;

/// Schema format read from the schema directory.
const SCHEMA_FORMAT: &str = "json";

/// The main compiler struct that orchestrates the compilation pipeline.
pub struct Compiler {
    config: CompilerConfig,
}

/// Result of a compilation.
#[derive(Debug, Default)]
pub struct CompileResult {
    /// Schemas that produced a record file.
    pub schemas: usize,
    /// Records generated, nested ones included.
    pub records: usize,
    /// Dispatch entries appended this run.
    pub entries_added: usize,
    /// Dispatch entries that were already present.
    pub entries_existing: usize,
    /// Whether the dispatch file was rewritten.
    pub dispatch_written: bool,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
    pub gaps: Vec<Gap>,
    pub skipped: Vec<SkippedSchema>,
}

/// Result of a check: what a compilation would do.
#[derive(Debug, Default)]
pub struct CheckResult {
    pub schemas: usize,
    pub records: usize,
    /// Dispatch entries a compilation would append.
    pub entries_pending: usize,
    pub gaps: Vec<Gap>,
    pub skipped: Vec<SkippedSchema>,
}

/// Schemas lowered in processing order, plus those left out.
struct LoweredBatch {
    lowered: Vec<LoweredSchema>,
    skipped: Vec<SkippedSchema>,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles every schema in the schema directory.
    ///
    /// This runs the full pipeline:
    /// 1. Create the printer for the configured target
    /// 2. Parse schema files
    /// 3. Lower each schema to IR, skipping schemas with local errors
    /// 4. Write one record file per schema, skipping records the target
    ///    cannot render
    /// 5. Append new entries to the dispatch file and write it once
    /// 6. Write the payload validator
    pub fn compile(&self) -> Result<CompileResult, CompilerError> {
        // Phase 1: Printer
        let printer = codegen::create_printer(&self.config.target)?;
        tracing::debug!(language = printer.target(), "compiling");

        // Phase 2: Parse
        let batch = self.parse()?;

        // Phase 3: Lower
        let LoweredBatch { lowered, skipped } = self.lower(batch)?;

        let model_dir = self.config.model_dir();
        let extension_dir = self.config.extension_dir();
        create_dir(&model_dir)?;
        create_dir(&extension_dir)?;

        let mut dispatch = self.load_dispatch(printer.as_ref())?;
        let mut result = CompileResult {
            skipped,
            ..CompileResult::default()
        };

        // Phase 4: Record files
        for schema in lowered {
            let Some(content) = render_record(printer.as_ref(), &schema, &mut result.skipped)? else {
                continue;
            };
            let path = model_dir.join(format!("{}.{}", schema.root_record().name, printer.extension()));
            write_file(&path, &content)?;
            result.files.push(path);

            dispatch.append(&printer.dispatch_entry(&schema.dispatch, &self.config));

            result.schemas += 1;
            result.records += schema.arena.len();
            result.gaps.extend(schema.gaps);
        }

        // Phase 5: Dispatch file
        let dispatch_path = dispatch.path().to_path_buf();
        let outcome = dispatch.finish()?;
        result.entries_added = outcome.added;
        result.entries_existing = outcome.existing;
        result.dispatch_written = outcome.written;
        if outcome.written {
            result.files.push(dispatch_path);
        }

        // Phase 6: Validator
        let validator_path = extension_dir.join(format!("{}.{}", VALIDATOR_NAME, printer.extension()));
        write_file(&validator_path, printer.validator())?;
        result.files.push(validator_path);

        tracing::info!(
            schemas = result.schemas,
            added = result.entries_added,
            skipped = result.skipped.len(),
            "compilation finished"
        );
        Ok(result)
    }

    /// Parses and lowers every schema without writing anything.
    ///
    /// The dispatch file is read so a file that would be rejected by
    /// [`Compiler::compile`] is rejected here too.
    pub fn check(&self) -> Result<CheckResult, CompilerError> {
        let printer = codegen::create_printer(&self.config.target)?;
        tracing::debug!(language = printer.target(), "checking");
        let batch = self.parse()?;
        let LoweredBatch { lowered, skipped } = self.lower(batch)?;

        let mut dispatch = self.load_dispatch(printer.as_ref())?;
        let mut result = CheckResult {
            skipped,
            ..CheckResult::default()
        };
        for schema in lowered {
            if render_record(printer.as_ref(), &schema, &mut result.skipped)?.is_none() {
                continue;
            }
            if dispatch.append(&printer.dispatch_entry(&schema.dispatch, &self.config)) {
                result.entries_pending += 1;
            }
            result.schemas += 1;
            result.records += schema.arena.len();
            result.gaps.extend(schema.gaps);
        }
        Ok(result)
    }

    fn parse(&self) -> Result<SchemaBatch, CompilerError> {
        let mut frontend = frontend::create_frontend(SCHEMA_FORMAT)?;
        tracing::debug!(format = frontend.format(), dir = %self.config.schema_dir.display(), "reading schemas");
        frontend.parse_directory(&self.config.schema_dir)
    }

    /// Lowers each schema. Schemas with a schema-local error, or whose root
    /// record name was already taken by an earlier schema, are skipped; any
    /// other error ends the batch.
    fn lower(&self, batch: SchemaBatch) -> Result<LoweredBatch, CompilerError> {
        let mut out = LoweredBatch {
            lowered: Vec::new(),
            skipped: batch.rejected,
        };
        let mut roots: HashMap<String, PathBuf> = HashMap::new();

        for source in &batch.sources {
            let lowered = lower::lower_schema(source, &self.config.line_items_field).and_then(|schema| {
                match roots.entry(schema.root_record().name.clone()) {
                    Entry::Occupied(taken) => Err(CompilerError::DuplicateRecord {
                        name: taken.key().clone(),
                        first: taken.get().clone(),
                        second: source.path.clone(),
                    }),
                    Entry::Vacant(slot) => {
                        slot.insert(source.path.clone());
                        Ok(schema)
                    }
                }
            });

            match lowered {
                Ok(schema) => out.lowered.push(schema),
                Err(e) if e.is_schema_local() => skip(&mut out.skipped, &source.path, &e),
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    fn load_dispatch(&self, printer: &dyn Printer) -> Result<DispatchArtifact, CompilerError> {
        let path = self
            .config
            .extension_dir()
            .join(format!("{}.{}", self.config.dispatch_file, printer.extension()));
        DispatchArtifact::load(&path, &printer.dispatch_header(&self.config), printer.dispatch_closer())
    }
}

/// Renders the record file of `schema`. A schema-local failure is recorded
/// in `skipped` and yields `None`.
fn render_record(
    printer: &dyn Printer,
    schema: &LoweredSchema,
    skipped: &mut Vec<SkippedSchema>,
) -> Result<Option<String>, CompilerError> {
    match printer.record_file(&schema.arena, schema.root, &schema.transform) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.is_schema_local() => {
            skip(skipped, &schema.path, &e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn skip(skipped: &mut Vec<SkippedSchema>, path: &Path, error: &CompilerError) {
    tracing::warn!(path = %path.display(), error = %error, "skipping schema");
    skipped.push(SkippedSchema {
        path: path.to_path_buf(),
        reason: error.to_string(),
    });
}

fn create_dir(path: &Path) -> Result<(), CompilerError> {
    std::fs::create_dir_all(path).map_err(|e| CompilerError::io(path, e.to_string()))
}

fn write_file(path: &Path, content: &str) -> Result<(), CompilerError> {
    std::fs::write(path, content).map_err(|e| CompilerError::io(path, e.to_string()))?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}
