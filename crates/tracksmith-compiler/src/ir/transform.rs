//! Flattening transform intermediate representation.
//!
//! The transform turns a record whose line items are one object per item
//! into the column layout the tracking sink expects: one array per item
//! field, keyed by that field's wire key.

use super::{Literal, TypeRef};

/// The payload transform attached to a root record.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformIR {
    /// Root record type name.
    pub record: String,

    /// `None` when the schema has no line-items field: the transform then
    /// only encodes and sanitizes.
    pub line_items: Option<LineItemsIR>,
}

/// The designated repeated-object field and its column projections.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemsIR {
    /// Identifier of the line-items field on the root record.
    pub field_ident: String,

    /// Wire key removed from the payload once the columns are in place.
    pub wire_key: String,

    /// The field itself may be absent; it then iterates as empty.
    pub optional: bool,

    pub columns: Vec<ColumnIR>,
}

/// One item field projected into its own array.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnIR {
    /// Identifier of the field on the item record.
    pub item_ident: String,

    /// Local name of the array being filled.
    pub column_ident: String,

    /// Payload key the array is stored under.
    pub wire_key: String,

    /// Element type of the array (the item field's type).
    pub element: TypeRef,

    /// The item field may be absent.
    pub optional: bool,

    /// Value appended for absent optional fields. Absent optionals without a
    /// placeholder are appended as null so columns stay aligned.
    pub placeholder: Option<Literal>,
}
