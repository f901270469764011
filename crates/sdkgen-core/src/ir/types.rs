use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::operations::OperationRecord;
use super::schemas::IrModel;
use crate::transform::name_normalizer::normalize_tag_key;

/// Key of the reserved namespace holding shapes owned by zero or several tags.
pub const SHARED_NAMESPACE_KEY: &str = "__shared";

/// A fully resolved, generator-ready view of an OpenAPI document, partitioned
/// into namespaces.
#[derive(Debug, Clone, PartialEq)]
pub struct IrSpec {
    pub info: IrInfo,
    pub root_namespace: String,
    /// Sorted by key.
    pub namespaces: Vec<IrNamespace>,
}

impl IrSpec {
    pub fn namespace(&self, key: &NamespaceKey) -> Option<&IrNamespace> {
        self.namespaces
            .binary_search_by(|ns| ns.key.cmp(key))
            .ok()
            .map(|idx| &self.namespaces[idx])
    }

    /// Qualified path of a namespace, used to reference a class from another
    /// namespace.
    pub fn namespace_path(&self, key: &NamespaceKey) -> Option<&NamespacePath> {
        self.namespace(key).map(|ns| &ns.path)
    }

    /// Tag namespaces that own at least one operation. The shared namespace
    /// never yields a service.
    pub fn services(&self) -> impl Iterator<Item = &IrNamespace> {
        self.namespaces
            .iter()
            .filter(|ns| !ns.key.is_shared() && !ns.operations.is_empty())
    }

    pub fn model_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.models.len()).sum()
    }

    pub fn operation_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.operations.len()).sum()
    }
}

/// API metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// One output grouping: the models it owns and, for tag namespaces, the
/// operations of its service.
#[derive(Debug, Clone, PartialEq)]
pub struct IrNamespace {
    pub key: NamespaceKey,
    pub display_name: String,
    pub path: NamespacePath,
    /// Sorted by class name.
    pub models: Vec<IrModel>,
    /// Sorted by identifier.
    pub operations: Vec<OperationRecord>,
}

/// A normalized tag key: trimmed, lower-cased, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TagKey(String);

impl TagKey {
    pub fn new(tag: &str) -> Self {
        Self(normalize_tag_key(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a shape or operation lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespaceKey {
    /// Owned by exactly one tag.
    Tag(TagKey),
    /// Referenced by zero or several tags.
    Shared,
}

impl NamespaceKey {
    pub fn tag(tag: &str) -> Self {
        NamespaceKey::Tag(TagKey::new(tag))
    }

    pub fn key(&self) -> &str {
        match self {
            NamespaceKey::Tag(tag) => tag.as_str(),
            NamespaceKey::Shared => SHARED_NAMESPACE_KEY,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, NamespaceKey::Shared)
    }
}

impl Ord for NamespaceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key()
            .cmp(other.key())
            .then_with(|| other.is_shared().cmp(&self.is_shared()))
    }
}

impl PartialOrd for NamespaceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for NamespaceKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Qualified namespace path, outermost segment first (e.g. `SumUp`, `Shared`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamespacePath(Vec<String>);

impl NamespacePath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_key_order_follows_key_string() {
        let mut keys = vec![
            NamespaceKey::tag("Payouts"),
            NamespaceKey::Shared,
            NamespaceKey::tag("checkouts"),
            NamespaceKey::tag("Payments"),
        ];
        keys.sort();
        let ordered: Vec<&str> = keys.iter().map(NamespaceKey::key).collect();
        assert_eq!(ordered, vec!["__shared", "checkouts", "payments", "payouts"]);
    }

    #[test]
    fn test_blank_tag_is_default_not_shared() {
        let key = NamespaceKey::tag("   ");
        assert_eq!(key.key(), "default");
        assert!(!key.is_shared());
    }

    #[test]
    fn test_tag_named_like_shared_key_stays_a_tag() {
        let tag = NamespaceKey::tag("__shared");
        assert_ne!(tag, NamespaceKey::Shared);
        assert!(NamespaceKey::Shared < tag);
    }

    #[test]
    fn test_namespace_path_join() {
        let path = NamespacePath::new(vec!["SumUp".to_string(), "Shared".to_string()]);
        assert_eq!(path.join("\\"), "SumUp\\Shared");
        assert_eq!(path.segments().len(), 2);
    }
}
