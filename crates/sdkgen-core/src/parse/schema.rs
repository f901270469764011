use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    pub fn contains(&self, kind: SchemaType) -> bool {
        match self {
            TypeSet::Single(t) => *t == kind,
            TypeSet::Multiple(types) => types.contains(&kind),
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    /// The reference string, if this node is a non-empty `$ref`.
    pub fn reference(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } if !ref_path.is_empty() => Some(ref_path),
            _ => None,
        }
    }
}

/// A JSON Schema object, limited to the keywords that decide a property's
/// type. Other keywords (`format`, `nullable`, `additionalProperties`, ...)
/// are ignored on input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    // Composition
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaOrRef>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaOrRef>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

impl Schema {
    /// Whether `kind` is among the declared types. Undeclared types never match.
    pub fn has_type(&self, kind: SchemaType) -> bool {
        self.schema_type
            .as_ref()
            .is_some_and(|types| types.contains(kind))
    }

    pub fn has_combinators(&self) -> bool {
        !self.one_of.is_empty() || !self.any_of.is_empty() || !self.all_of.is_empty()
    }

    /// Members of `oneOf`, `anyOf` and `allOf`, in that order.
    pub fn combinator_members(&self) -> impl Iterator<Item = &SchemaOrRef> {
        self.one_of
            .iter()
            .chain(self.any_of.iter())
            .chain(self.all_of.iter())
    }
}
