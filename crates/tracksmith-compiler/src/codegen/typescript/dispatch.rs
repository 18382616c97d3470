//! TypeScript tracker class generation.

use super::param;
use crate::codegen::quote;
use crate::config::TrackerConfig;
use crate::ir::DispatchEntryIR;

/// Opening of the dispatch module. Entries import their record types
/// inline, so the header never changes as schemas are added.
pub fn generate_header(tracker: &TrackerConfig, class_name: &str) -> String {
    format!(
        "import {{ {} }} from {};\n\nexport class {} {{\n",
        tracker.type_name,
        quote(&tracker.module),
        class_name
    )
}

/// One static tracking method.
pub fn generate_entry(entry: &DispatchEntryIR, tracker: &TrackerConfig) -> String {
    let name = param(&entry.param_ident);
    let mut code = String::new();
    let lines: Vec<&str> = entry.description.lines().collect();
    match lines.as_slice() {
        [] => {}
        [line] => code.push_str(&format!("  /** {} */\n", line)),
        lines => {
            code.push_str("  /**\n");
            for line in lines {
                code.push_str(&format!("   * {}\n", line));
            }
            code.push_str("   */\n");
        }
    }
    code.push_str(&format!(
        "  static {}({}: import('../ObjectModel/{}').{}): void {{\n",
        entry.operation, name, entry.record, entry.record
    ));
    code.push_str(&format!(
        "    {}.shared().event({}, {}.toPayload()).track();\n",
        tracker.type_name,
        quote(&entry.event_type),
        name
    ));
    code.push_str("  }\n");
    code
}
