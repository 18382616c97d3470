//! Identifier conversions between schema names and generated code.
//!
//! Schema property names are word-separated lowercase (`schema_version`).
//! Generated code wants camelCase for fields and PascalCase for types.

/// Converts a snake_case name to camelCase: the first word is kept as-is,
/// later words are capitalized.
pub fn to_camel_case(s: &str) -> String {
    let mut words = s.split('_');
    let mut result = words.next().unwrap_or_default().to_string();
    for word in words {
        result.push_str(&capitalize(word));
    }
    result
}

/// Converts a snake_case name to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Lowers the first character of a PascalCase name.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Strips one trailing plural `s`, so `productItems` names its items
/// `productItem`. Names without a trailing `s` are returned unchanged.
pub fn singular(s: &str) -> &str {
    match s.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem,
        _ => s,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_camel_case("schema_version"), "schemaVersion");
        assert_eq!(to_camel_case("count"), "count");
        assert_eq!(to_pascal_case("checkout_complete_event"), "CheckoutCompleteEvent");
        assert_eq!(to_pascal_case("productItem"), "ProductItem");
        assert_eq!(lower_first("CheckoutEvent"), "checkoutEvent");
    }

    #[test]
    fn test_singular() {
        assert_eq!(singular("productItems"), "productItem");
        assert_eq!(singular("data"), "data");
        assert_eq!(singular("s"), "s");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(lower_first(""), "");
    }
}
