//! Dispatch entry intermediate representation.

/// One generated tracker operation: takes a record, flattens it, and forwards
/// the payload to the tracking sink under an event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEntryIR {
    /// Operation name (`x-api-name`).
    pub operation: String,

    /// Root record type taken as the argument.
    pub record: String,

    /// Argument identifier, the record name with its first letter lowered.
    pub param_ident: String,

    /// Event-type tag passed to the sink (`x-api-event-type`).
    pub event_type: String,

    /// Doc comment (`x-api-description`).
    pub description: String,
}
