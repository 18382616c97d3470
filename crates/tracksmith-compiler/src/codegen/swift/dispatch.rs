//! Swift tracker extension generation.

use super::ident;
use crate::codegen::quote;
use crate::config::TrackerConfig;
use crate::ir::DispatchEntryIR;

/// Opening of the tracker extension file.
pub fn generate_header(tracker: &TrackerConfig) -> String {
    format!(
        "import Foundation\nimport {}\n\npublic extension {} {{\n",
        tracker.module, tracker.type_name
    )
}

/// One static tracking method.
pub fn generate_entry(entry: &DispatchEntryIR, tracker: &TrackerConfig) -> String {
    let param = ident(&entry.param_ident);
    let mut code = String::new();
    for line in entry.description.lines() {
        code.push_str(&format!("    /// {}\n", line));
    }
    code.push_str(&format!(
        "    static func {}(_ {}: {}) {{\n",
        entry.operation, param, entry.record
    ));
    code.push_str(&format!("        {}.shared().event(\n", tracker.type_name));
    code.push_str(&format!("            withEventType: {},\n", quote(&entry.event_type)));
    code.push_str(&format!(
        "            parameters: {}.convertToDictionary()).track()\n",
        param
    ));
    code.push_str("    }\n");
    code
}
