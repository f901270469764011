use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// One entry of a `content` map. Every media type's schema is walked, not
/// just `application/json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}
