use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::components::Components;
use super::operation::{Operation, PathItem};
use crate::ir::HttpMethod;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,
}

/// Top-level tag declaration. Only the name is used, as the display source
/// for the tag's namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level OpenAPI 3.x document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,

    pub info: Info,

    /// Paths in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// One operation together with the path item that declares it.
#[derive(Debug, Clone, Copy)]
pub struct OperationEntry<'a> {
    pub path: &'a str,
    pub item: &'a PathItem,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

impl OpenApiSpec {
    /// Every declared operation, paths in document order and methods in the
    /// fixed order of [`PathItem::operations`].
    pub fn operations(&self) -> impl Iterator<Item = OperationEntry<'_>> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations().map(move |(method, operation)| OperationEntry {
                path: path.as_str(),
                item,
                method,
                operation,
            })
        })
    }
}
