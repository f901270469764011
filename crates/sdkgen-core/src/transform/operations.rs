use std::collections::{BTreeMap, BTreeSet};

use super::name_normalizer::field_name;
use crate::error::ResolveError;
use crate::ir::{HttpMethod, OperationRecord, PathParam, PathTemplate, TagKey};
use crate::parse::extension::{self, CODEGEN_EXTENSION, CodegenHints};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::ParameterLocation;
use crate::parse::ref_resolve::RefLookup;
use crate::parse::spec::{OpenApiSpec, OperationEntry};

/// Stable identifier for an operation: the `x-codegen` method name, then the
/// `operationId`, then `<method>_<path>` with `/` replaced by `_`.
pub fn operation_identifier(method: HttpMethod, path: &str, op: &Operation) -> String {
    let hints: CodegenHints =
        extension::get_or_default(&op.extensions, CODEGEN_EXTENSION, CodegenHints::default());
    if let Some(name) = hints.method_name.filter(|n| !n.trim().is_empty()) {
        return name;
    }
    if let Some(id) = op.operation_id.as_deref().filter(|id| !id.trim().is_empty()) {
        return id.to_string();
    }
    let suffix = if path == "/" {
        "root".to_string()
    } else {
        path.replace('/', "_")
    };
    format!("{}_{suffix}", method.as_lower())
}

/// Normalize a single operation. Fails when one of its parameter references
/// cannot be resolved.
pub fn build_operation(
    lookup: RefLookup<'_>,
    method: HttpMethod,
    path: &str,
    item: &PathItem,
    op: &Operation,
) -> Result<OperationRecord, ResolveError> {
    let mut path_params = Vec::new();
    let mut has_query = false;

    for param in item.effective_parameters(op) {
        let param = lookup.parameter(param)?;
        match param.location {
            ParameterLocation::Path => path_params.push(PathParam {
                original_name: param.name.clone(),
                name: field_name(&param.name),
                description: trimmed(param.description.as_deref()),
            }),
            ParameterLocation::Query => has_query = true,
            ParameterLocation::Header | ParameterLocation::Cookie => {}
        }
    }

    Ok(OperationRecord {
        id: operation_identifier(method, path, op),
        summary: trimmed(op.summary.as_deref()),
        description: trimmed(op.description.as_deref()),
        method,
        path: PathTemplate::parse(path),
        path_params,
        has_query,
        has_body: op.request_body.is_some(),
        deprecated: op.deprecated.unwrap_or(false),
    })
}

/// Build every operation and group the records by tag key. Unbuildable and
/// tagless operations are skipped with a warning.
pub fn collect_operations(
    spec: &OpenApiSpec,
    lookup: RefLookup<'_>,
) -> BTreeMap<TagKey, Vec<OperationRecord>> {
    let mut grouped: BTreeMap<TagKey, Vec<OperationRecord>> = BTreeMap::new();

    for OperationEntry {
        path,
        item,
        method,
        operation: op,
    } in spec.operations()
    {
        let record = match build_operation(lookup, method, path, item, op) {
            Ok(record) => record,
            Err(err) => {
                log::warn!(
                    "unable to build operation method={} path={path} error={err}",
                    method.as_str()
                );
                continue;
            }
        };

        if op.tags.is_empty() {
            log::warn!(
                "operation without tags, no service method generated operation_id={} method={} path={path}",
                record.id,
                method.as_str()
            );
            continue;
        }

        let keys: BTreeSet<TagKey> = op.tags.iter().map(|t| TagKey::new(t)).collect();
        for key in keys {
            grouped.entry(key).or_default().push(record.clone());
        }
    }

    for records in grouped.values_mut() {
        records.sort_by(|a, b| {
            a.id.cmp(&b.id)
                .then_with(|| a.path.as_str().cmp(b.path.as_str()))
                .then_with(|| a.method.cmp(&b.method))
        });
    }

    grouped
}

fn trimmed(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
