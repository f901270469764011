use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::SchemaOrRef;

/// Reusable definitions addressed by `#/components/<section>/<name>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    /// Named schemas. An entry may itself be a `$ref` (an alias).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,

    #[serde(
        rename = "requestBodies",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,
}

// Non-schema sections are looked up one level deep; an entry that is itself
// a `$ref` counts as missing.
impl Components {
    pub fn schema(&self, name: &str) -> Option<&SchemaOrRef> {
        self.schemas.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        match self.parameters.get(name)? {
            ParameterOrRef::Parameter(p) => Some(p),
            ParameterOrRef::Ref { .. } => None,
        }
    }

    pub fn request_body(&self, name: &str) -> Option<&RequestBody> {
        match self.request_bodies.get(name)? {
            RequestBodyOrRef::RequestBody(rb) => Some(rb),
            RequestBodyOrRef::Ref { .. } => None,
        }
    }

    pub fn response(&self, name: &str) -> Option<&Response> {
        match self.responses.get(name)? {
            ResponseOrRef::Response(r) => Some(r),
            ResponseOrRef::Ref { .. } => None,
        }
    }
}
