use std::collections::HashSet;

use super::components::Components;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

const COMPONENTS_PREFIX: &str = "#/components/";

/// Looks up `$ref` targets in the components section without inlining them,
/// so callers keep the reference string as the identity of a shape.
#[derive(Debug, Clone, Copy)]
pub struct RefLookup<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefLookup<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    /// Resolve a schema reference to its declared schema, following alias
    /// chains (`A: {$ref: B}`).
    pub fn schema(&self, ref_path: &str) -> Result<&'a Schema, ResolveError> {
        let mut seen = HashSet::new();
        let mut current: &str = ref_path;
        loop {
            if !seen.insert(current) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            let name = parse_ref_name(current, "schemas")?;
            let target = self
                .components
                .and_then(|c| c.schema(name))
                .ok_or_else(|| ResolveError::RefTargetNotFound(current.to_string()))?;
            match target {
                SchemaOrRef::Schema(schema) => return Ok(schema.as_ref()),
                SchemaOrRef::Ref { ref_path: next } => current = next.as_str(),
            }
        }
    }

    pub fn parameter(&self, param: &'a ParameterOrRef) -> Result<&'a Parameter, ResolveError> {
        match param {
            ParameterOrRef::Parameter(p) => Ok(p),
            ParameterOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "parameters")?;
                self.components
                    .and_then(|c| c.parameter(name))
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
        }
    }

    pub fn request_body(
        &self,
        body: &'a RequestBodyOrRef,
    ) -> Result<&'a RequestBody, ResolveError> {
        match body {
            RequestBodyOrRef::RequestBody(rb) => Ok(rb),
            RequestBodyOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "requestBodies")?;
                self.components
                    .and_then(|c| c.request_body(name))
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
        }
    }

    pub fn response(&self, resp: &'a ResponseOrRef) -> Result<&'a Response, ResolveError> {
        match resp {
            ResponseOrRef::Response(r) => Ok(r),
            ResponseOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "responses")?;
                self.components
                    .and_then(|c| c.response(name))
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
        }
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
fn parse_ref_name<'r>(ref_path: &'r str, expected_section: &str) -> Result<&'r str, ResolveError> {
    let stripped = ref_path
        .strip_prefix(COMPONENTS_PREFIX)
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
