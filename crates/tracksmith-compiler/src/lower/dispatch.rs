//! Dispatch entry generation.

use crate::ir::DispatchEntryIR;
use crate::naming::lower_first;
use crate::schema::SchemaDocument;

/// Builds the dispatch entry forwarding `record` to the tracking sink.
pub fn generate(document: &SchemaDocument, record: &str) -> DispatchEntryIR {
    DispatchEntryIR {
        operation: document.api_name().to_string(),
        record: record.to_string(),
        param_ident: lower_first(record),
        event_type: document.api_event_type().to_string(),
        description: document.api_description().to_string(),
    }
}
