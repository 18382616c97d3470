//! Input schema model.
//!
//! Event schemas are parsed once per run into [`SchemaDocument`] values and
//! handed to lowering. Nothing here is cached across runs.

pub mod document;

pub use document::{
    Kind, SchemaDocument, SchemaNode, DEFAULT_API_DESCRIPTION, DEFAULT_API_NAME,
    DEFAULT_EVENT_TYPE,
};
