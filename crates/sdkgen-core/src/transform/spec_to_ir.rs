use std::collections::{BTreeSet, HashMap};

use crate::error::TransformError;
use crate::ir::*;
use crate::parse::ref_resolve::RefLookup;
use crate::parse::spec::OpenApiSpec;

use super::collector::collect_usage;
use super::name_normalizer::{display_name, normalize_tag_key, unique_name};
use super::operations::collect_operations;
use super::partition::NamespacePartition;
use super::type_resolver::TypeResolver;

/// Display name of the shared namespace.
pub const SHARED_DISPLAY_NAME: &str = "Shared";

/// Options controlling how namespaces are laid out.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Backslash-separated root namespace, e.g. `SumUp` or `Acme\Sdk`.
    pub root_namespace: String,
    /// Namespace segments a tag may not take, such as the renderer's own
    /// `Services` namespace. [`SHARED_DISPLAY_NAME`] is always reserved.
    pub reserved_namespaces: Vec<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            root_namespace: "SumUp".to_string(),
            reserved_namespaces: vec!["Services".to_string()],
        }
    }
}

/// Transform a parsed OpenAPI spec into the partitioned IR.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit options.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    let root = root_segments(&options.root_namespace)?;
    let lookup = RefLookup::new(spec);

    // Phase 1: reference closure and tag ownership
    let usage = collect_usage(spec, lookup);
    let partition = NamespacePartition::build(&usage);

    // Phase 2: operations grouped by tag
    let mut operations = collect_operations(spec, lookup);

    // Phase 3: one namespace per owner, in key order
    let keys: BTreeSet<NamespaceKey> = partition
        .namespaces()
        .map(|(key, _)| key.clone())
        .chain(operations.keys().cloned().map(NamespaceKey::Tag))
        .collect();

    let declared_tags = declared_tag_names(spec);
    let resolver = TypeResolver::new(&partition, lookup);
    let mut taken_display: BTreeSet<String> = options
        .reserved_namespaces
        .iter()
        .cloned()
        .chain([SHARED_DISPLAY_NAME.to_string()])
        .collect();
    let mut namespaces = Vec::with_capacity(keys.len());

    for key in keys {
        let display = match &key {
            NamespaceKey::Shared => SHARED_DISPLAY_NAME.to_string(),
            NamespaceKey::Tag(_) => {
                let base = namespace_display_name(&key, &declared_tags);
                let display = unique_name(&base, &taken_display);
                if display != base {
                    log::warn!(
                        "namespace display name already taken, renamed key={key} from={base} to={display}"
                    );
                }
                taken_display.insert(display.clone());
                display
            }
        };

        let models = partition
            .shapes(&key)
            .iter()
            .map(|shape| IrModel {
                class_name: shape.class_name.clone(),
                reference: shape.reference.clone(),
                description: shape
                    .schema
                    .and_then(|s| s.description.as_deref())
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
                properties: shape
                    .schema
                    .map(|s| resolver.properties(s, &key))
                    .unwrap_or_default(),
            })
            .collect();

        let ops = match &key {
            NamespaceKey::Tag(tag) => operations.remove(tag).unwrap_or_default(),
            NamespaceKey::Shared => Vec::new(),
        };

        let mut segments = root.clone();
        segments.push(display.clone());

        namespaces.push(IrNamespace {
            key,
            display_name: display,
            path: NamespacePath::new(segments),
            models,
            operations: ops,
        });
    }

    let ir = IrSpec {
        info: IrInfo {
            title: spec.info.title.clone(),
            description: spec.info.description.clone(),
            version: spec.info.version.clone(),
        },
        root_namespace: root.join("\\"),
        namespaces,
    };

    log::debug!(
        "transformed spec namespaces={} models={} operations={}",
        ir.namespaces.len(),
        ir.model_count(),
        ir.operation_count()
    );

    Ok(ir)
}

fn root_segments(root: &str) -> Result<Vec<String>, TransformError> {
    let segments: Vec<String> = root
        .trim()
        .trim_matches('\\')
        .split('\\')
        .map(str::to_string)
        .collect();
    let valid = segments.iter().all(|segment| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    if !valid {
        return Err(TransformError::InvalidRootNamespace(root.to_string()));
    }
    Ok(segments)
}

/// Declared tag names by normalized key; the first declaration wins.
fn declared_tag_names(spec: &OpenApiSpec) -> HashMap<String, &str> {
    let mut names = HashMap::new();
    for tag in &spec.tags {
        names
            .entry(normalize_tag_key(&tag.name))
            .or_insert(tag.name.as_str());
    }
    names
}

fn namespace_display_name(key: &NamespaceKey, declared: &HashMap<String, &str>) -> String {
    match key {
        NamespaceKey::Shared => SHARED_DISPLAY_NAME.to_string(),
        NamespaceKey::Tag(tag) => {
            let source = declared
                .get(tag.as_str())
                .copied()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(tag.as_str());
            display_name(source)
        }
    }
}
