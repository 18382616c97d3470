//! Lowering from schema documents to IR.
//!
//! One schema lowers to an arena of records (root plus nested), the root's
//! flattening transform, and its dispatch entry. Schema-local problems come
//! back as errors for the caller to report; kinds with no mapping become
//! [`Gap`]s.

pub mod dispatch;
pub mod flatten;
pub mod record;
pub mod resolve;

pub use resolve::{Gap, TypeResolver};

use std::path::PathBuf;

use crate::diagnostic::CompilerError;
use crate::frontend::SchemaSource;
use crate::ir::{DispatchEntryIR, RecordArena, RecordId, RecordIR, TransformIR};
use record::RecordGenerator;

/// Everything generated for one schema.
#[derive(Debug)]
pub struct LoweredSchema {
    /// Schema file this was lowered from.
    pub path: PathBuf,
    pub arena: RecordArena,
    pub root: RecordId,
    pub transform: TransformIR,
    pub dispatch: DispatchEntryIR,
    pub gaps: Vec<Gap>,
}

impl LoweredSchema {
    pub fn root_record(&self) -> &RecordIR {
        self.arena.get(self.root)
    }
}

/// Lowers one schema. `line_items_field` is used unless the schema names its
/// own with `x-line-items`.
pub fn lower_schema(source: &SchemaSource, line_items_field: &str) -> Result<LoweredSchema, CompilerError> {
    let document = &source.document;
    let context = source.context_name.replace(['-', ' ', '.'], "_");
    let name = resolve::record_name(&document.root, &context);

    let mut arena = RecordArena::new();
    let mut resolver = TypeResolver::new();
    let root = RecordGenerator::new(&mut arena, &mut resolver).generate(&name, &document.root, None)?;

    let line_items_field = document.line_items.as_deref().unwrap_or(line_items_field);
    let transform = flatten::generate(&arena, arena.get(root), line_items_field)?;
    let dispatch = dispatch::generate(document, &name);

    Ok(LoweredSchema {
        path: source.path.clone(),
        arena,
        root,
        transform,
        dispatch,
        gaps: resolver.into_gaps(),
    })
}
