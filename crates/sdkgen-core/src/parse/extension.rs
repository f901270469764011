//! Typed access to OpenAPI vendor extensions (`x-*` keys).

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Vendor extension carrying code generation hints for an operation.
pub const CODEGEN_EXTENSION: &str = "x-codegen";

/// Payload of [`CODEGEN_EXTENSION`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodegenHints {
    /// Overrides the generated method name.
    #[serde(default)]
    pub method_name: Option<String>,
}

/// Decode the extension stored under `key`. Returns `None` when the key is
/// absent or its value does not match `T`.
pub fn get<T: DeserializeOwned>(
    extensions: &IndexMap<String, serde_json::Value>,
    key: &str,
) -> Option<T> {
    let raw = extensions.get(key)?;
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("ignoring malformed extension key={key} error={err}");
            None
        }
    }
}

/// Like [`get`], falling back to `default`.
pub fn get_or_default<T: DeserializeOwned>(
    extensions: &IndexMap<String, serde_json::Value>,
    key: &str,
    default: T,
) -> T {
    get(extensions, key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extensions(value: serde_json::Value) -> IndexMap<String, serde_json::Value> {
        let mut map = IndexMap::new();
        map.insert(CODEGEN_EXTENSION.to_string(), value);
        map
    }

    #[test]
    fn test_get_structured_extension() {
        let ext = extensions(json!({"method_name": "fetchCharge"}));
        let hints: CodegenHints = get(&ext, CODEGEN_EXTENSION).unwrap();
        assert_eq!(hints.method_name.as_deref(), Some("fetchCharge"));
    }

    #[test]
    fn test_get_mistyped_extension() {
        let ext = extensions(json!({"method_name": 42}));
        assert!(get::<CodegenHints>(&ext, CODEGEN_EXTENSION).is_none());
    }

    #[test]
    fn test_get_missing_extension() {
        let ext = IndexMap::new();
        assert!(get::<CodegenHints>(&ext, CODEGEN_EXTENSION).is_none());
        let fallback = get_or_default(&ext, CODEGEN_EXTENSION, CodegenHints::default());
        assert_eq!(fallback, CodegenHints::default());
    }
}
