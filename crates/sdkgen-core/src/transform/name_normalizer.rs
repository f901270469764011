use std::collections::BTreeSet;

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Placeholder class name for shapes with neither a reference nor a title.
pub const FALLBACK_CLASS_NAME: &str = "Model";

/// Key used for operations whose tag is blank.
pub const DEFAULT_TAG_KEY: &str = "default";

const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "array",
    "bool",
    "callable",
    "class",
    "const",
    "default",
    "float",
    "function",
    "global",
    "int",
    "interface",
    "namespace",
    "new",
    "parent",
    "private",
    "protected",
    "public",
    "self",
    "static",
    "string",
    "trait",
];

/// Class name derived from the last segment of a reference
/// (`#/components/schemas/checkout.v2` → `CheckoutV2`).
pub fn class_name_from_ref(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    last.replace(['.', '-'], "_").to_upper_camel_case()
}

/// Class name for a shape: the reference wins, then the title, then
/// [`FALLBACK_CLASS_NAME`].
pub fn schema_class_name(reference: Option<&str>, title: Option<&str>) -> String {
    if let Some(name) = reference
        .map(class_name_from_ref)
        .filter(|name| !name.is_empty())
    {
        return name;
    }
    if let Some(name) = title
        .map(|t| t.to_upper_camel_case())
        .filter(|name| !name.is_empty())
    {
        return name;
    }
    FALLBACK_CLASS_NAME.to_string()
}

/// Trim and lower-case a tag. A blank tag becomes [`DEFAULT_TAG_KEY`].
pub fn normalize_tag_key(tag: &str) -> String {
    let key = tag.trim().to_lowercase();
    if key.is_empty() {
        DEFAULT_TAG_KEY.to_string()
    } else {
        key
    }
}

/// Human-facing namespace segment for a tag (`card-readers` → `CardReaders`).
pub fn display_name(tag: &str) -> String {
    let spaced = tag.trim().replace(['-', '_'], " ");
    let name = spaced.to_upper_camel_case();
    if name.is_empty() {
        "Default".to_string()
    } else {
        name
    }
}

/// Field identifier for a wire property or parameter name. Reserved words get
/// a `Value` suffix and names that would start with a digit get a `field`
/// prefix.
pub fn field_name(wire: &str) -> String {
    let mut name = wire.trim().replace("[]", "List").replace(['.', '-', ' '], "_");
    if name.is_empty() {
        name = "field".to_string();
    }
    let mut name = name.to_lower_camel_case();
    if name.is_empty() {
        return "field".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name = format!("field{name}").to_lower_camel_case();
    }
    if RESERVED_WORDS.contains(&name.as_str()) {
        name.push_str("Value");
    }
    name
}

/// Method identifier for an operation. Empty input stays empty; the renderer
/// decides the fallback.
pub fn method_name(identifier: &str) -> String {
    identifier.to_lower_camel_case()
}

/// `base` if unused, otherwise `base2`, `base3`, ...
pub fn unique_name(base: &str, used: &BTreeSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
