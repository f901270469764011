//! Discovers every referenced schema reachable from the API surface and
//! records which tags reach it.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::ir::{HttpMethod, TagKey};
use crate::parse::ref_resolve::RefLookup;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};
use crate::parse::spec::{OpenApiSpec, OperationEntry};

/// A referenced shape and the tags of the operations that reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUsage<'a> {
    pub reference: String,
    /// `None` when the reference could not be looked up.
    pub schema: Option<&'a Schema>,
    pub tags: BTreeSet<TagKey>,
}

/// Usage entries keyed by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageTable<'a> {
    entries: BTreeMap<String, SchemaUsage<'a>>,
}

impl<'a> UsageTable<'a> {
    pub fn get(&self, reference: &str) -> Option<&SchemaUsage<'a>> {
        self.entries.get(reference)
    }

    /// Entries in reference order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaUsage<'a>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn record(&mut self, reference: &str, schema: Option<&'a Schema>, tags: &BTreeSet<TagKey>) {
        let entry = self
            .entries
            .entry(reference.to_string())
            .or_insert_with(|| SchemaUsage {
                reference: reference.to_string(),
                schema,
                tags: BTreeSet::new(),
            });
        entry.tags.extend(tags.iter().cloned());
    }
}

/// Walk every operation of the document and build the usage table.
pub fn collect_usage<'a>(spec: &'a OpenApiSpec, lookup: RefLookup<'a>) -> UsageTable<'a> {
    let mut table = UsageTable::default();
    for entry in spec.operations() {
        let tags: BTreeSet<TagKey> = entry
            .operation
            .tags
            .iter()
            .map(|t| TagKey::new(t))
            .collect();
        let mut walker = Walker {
            lookup,
            table: &mut table,
            tags: &tags,
            visited: HashSet::new(),
            path: entry.path,
            method: entry.method,
        };
        for root in operation_roots(lookup, entry) {
            walker.visit(root);
        }
    }
    log::debug!("collected schema usage shapes={}", table.len());
    table
}

/// Schema nodes attached directly to an operation: parameters, request body
/// content and response content.
fn operation_roots<'a>(lookup: RefLookup<'a>, entry: OperationEntry<'a>) -> Vec<&'a SchemaOrRef> {
    let OperationEntry {
        path,
        item,
        method,
        operation: op,
    } = entry;
    let mut roots = Vec::new();

    for param in item.effective_parameters(op) {
        match lookup.parameter(param) {
            Ok(param) => roots.extend(param.schema.as_ref()),
            Err(err) => log::warn!(
                "skipping unresolvable parameter path={path} method={} error={err}",
                method.as_str()
            ),
        }
    }

    if let Some(body) = &op.request_body {
        match lookup.request_body(body) {
            Ok(body) => roots.extend(body.schemas()),
            Err(err) => log::warn!(
                "skipping unresolvable request body path={path} method={} error={err}",
                method.as_str()
            ),
        }
    }

    for (status, response) in &op.responses {
        match lookup.response(response) {
            Ok(response) => roots.extend(response.schemas()),
            Err(err) => log::warn!(
                "skipping unresolvable response path={path} method={} status={status} error={err}",
                method.as_str()
            ),
        }
    }

    roots
}

struct Walker<'a, 't> {
    lookup: RefLookup<'a>,
    table: &'t mut UsageTable<'a>,
    tags: &'t BTreeSet<TagKey>,
    /// References already expanded for the current operation.
    visited: HashSet<&'a str>,
    path: &'t str,
    method: HttpMethod,
}

impl<'a> Walker<'a, '_> {
    fn visit(&mut self, node: &'a SchemaOrRef) {
        let schema = match (node.reference(), node) {
            (Some(reference), _) => {
                if !self.visited.insert(reference) {
                    return;
                }
                let target = match self.lookup.schema(reference) {
                    Ok(schema) => Some(schema),
                    Err(err) => {
                        log::warn!(
                            "unresolvable schema reference path={} method={} error={err}",
                            self.path,
                            self.method.as_str()
                        );
                        None
                    }
                };
                self.record(reference, target);
                match target {
                    Some(schema) => schema,
                    None => return,
                }
            }
            (None, SchemaOrRef::Schema(schema)) => schema.as_ref(),
            (None, SchemaOrRef::Ref { .. }) => return,
        };
        self.visit_schema(schema);
    }

    fn visit_schema(&mut self, schema: &'a Schema) {
        if schema.has_type(SchemaType::Object) {
            for property in schema.properties.values() {
                self.visit(property);
            }
        }
        if schema.has_type(SchemaType::Array) {
            if let Some(items) = &schema.items {
                self.visit(items);
            }
        }
        for member in schema.combinator_members() {
            self.visit(member);
        }
    }

    fn record(&mut self, reference: &str, schema: Option<&'a Schema>) {
        if self.tags.is_empty() {
            log::warn!(
                "operation without tags, shape gets no owner from it path={} method={} schema={reference}",
                self.path,
                self.method.as_str()
            );
        }
        self.table.record(reference, schema, self.tags);
    }
}
