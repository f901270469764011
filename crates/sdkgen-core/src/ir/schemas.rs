use serde::Serialize;

use super::types::NamespaceKey;

/// A generated model class for one referenced shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrModel {
    pub class_name: String,
    /// The `$ref` string that identifies the shape.
    pub reference: String,
    pub description: Option<String>,
    pub properties: Vec<PropertyRecord>,
}

/// A property of a model, resolved against the namespace the model lives in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    /// Normalized field name.
    pub name: String,
    /// Name on the wire.
    pub wire_name: String,
    pub resolved: ResolvedType,
    pub optional: bool,
    pub description: Option<String>,
}

/// A language-neutral type expression for a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedType {
    /// A generated model class. `namespace` is set only when the class lives
    /// in a different namespace than the one being rendered.
    Class {
        name: String,
        namespace: Option<NamespaceKey>,
    },
    String,
    Integer,
    Number,
    Boolean,
    /// Ordered collection of the item type.
    List { item: Box<ResolvedType> },
    /// Inline object: untyped structured data.
    Map,
    /// oneOf / anyOf / allOf placeholder.
    Union,
    Any,
}
