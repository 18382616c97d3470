//! Compiler configuration.

use std::path::PathBuf;

/// Configuration for the Tracksmith compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Directory containing `*.json` event schemas.
    pub schema_dir: PathBuf,

    /// Directory to write generated sources into.
    pub out_dir: PathBuf,

    /// Target language (default: "swift").
    pub target: String,

    /// Root property holding the repeated line items that get flattened
    /// into per-field columns.
    pub line_items_field: String,

    /// File stem of the shared dispatch artifact.
    pub dispatch_file: String,

    /// Tracker collaborators referenced by generated dispatch entries.
    pub tracker: TrackerConfig,
}

/// The external tracking sink the dispatch entries forward to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Module imported by the dispatch artifact.
    pub module: String,

    /// Type extended by (or exposing) the dispatch entries.
    pub type_name: String,
}

impl CompilerConfig {
    /// Directory receiving one record file per schema.
    pub fn model_dir(&self) -> PathBuf {
        self.out_dir.join("ObjectModel")
    }

    /// Directory receiving the dispatch artifact and the payload validator.
    pub fn extension_dir(&self) -> PathBuf {
        self.out_dir.join("Extension")
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from("Schema"),
            out_dir: PathBuf::from("Sources"),
            target: "swift".to_string(),
            line_items_field: "productItems".to_string(),
            dispatch_file: "TrackerExtension".to_string(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            module: "RakutenAnalytics".to_string(),
            type_name: "RAnalyticsRATTracker".to_string(),
        }
    }
}
