use std::collections::BTreeSet;

use super::name_normalizer::{class_name_from_ref, field_name, unique_name};
use super::partition::NamespacePartition;
use crate::ir::{NamespaceKey, PropertyRecord, ResolvedType};
use crate::parse::ref_resolve::RefLookup;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};

/// Maps schema nodes to [`ResolvedType`]s relative to the namespace being
/// rendered. Referenced shapes are never expanded.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'p, 'a> {
    partition: &'p NamespacePartition<'a>,
    lookup: RefLookup<'a>,
}

impl<'p, 'a> TypeResolver<'p, 'a> {
    pub fn new(partition: &'p NamespacePartition<'a>, lookup: RefLookup<'a>) -> Self {
        Self { partition, lookup }
    }

    pub fn resolve(&self, node: Option<&SchemaOrRef>, current: &NamespaceKey) -> ResolvedType {
        let Some(node) = node else {
            return ResolvedType::Any;
        };
        if let Some(reference) = node.reference() {
            return self.resolve_reference(reference, current);
        }
        match node {
            SchemaOrRef::Schema(schema) => self.resolve_inline(schema, current),
            SchemaOrRef::Ref { .. } => ResolvedType::Any,
        }
    }

    fn resolve_reference(&self, reference: &str, current: &NamespaceKey) -> ResolvedType {
        let name = self
            .partition
            .class_name(reference)
            .map(str::to_string)
            .unwrap_or_else(|| class_name_from_ref(reference));
        let namespace = self
            .partition
            .owner(reference)
            .filter(|owner| *owner != current)
            .cloned();
        ResolvedType::Class { name, namespace }
    }

    fn resolve_inline(&self, schema: &Schema, current: &NamespaceKey) -> ResolvedType {
        if !schema.enum_values.is_empty() {
            return ResolvedType::String;
        }
        if schema.has_type(SchemaType::String) {
            return ResolvedType::String;
        }
        if schema.has_type(SchemaType::Integer) {
            return ResolvedType::Integer;
        }
        if schema.has_type(SchemaType::Number) {
            return ResolvedType::Number;
        }
        if schema.has_type(SchemaType::Boolean) {
            return ResolvedType::Boolean;
        }
        if schema.has_type(SchemaType::Array) {
            let item = self.resolve(schema.items.as_deref(), current);
            return ResolvedType::List {
                item: Box::new(item),
            };
        }
        if schema.has_type(SchemaType::Object) {
            return ResolvedType::Map;
        }
        if schema.has_combinators() {
            return ResolvedType::Union;
        }
        ResolvedType::Any
    }

    /// Property records for a shape, in declaration order.
    pub fn properties(&self, schema: &Schema, current: &NamespaceKey) -> Vec<PropertyRecord> {
        let mut taken = BTreeSet::new();
        schema
            .properties
            .iter()
            .map(|(wire_name, node)| {
                let base = field_name(wire_name);
                let name = unique_name(&base, &taken);
                if name != base {
                    log::warn!("duplicate field name property={wire_name} renamed={name}");
                }
                taken.insert(name.clone());
                PropertyRecord {
                    name,
                    wire_name: wire_name.clone(),
                    resolved: self.resolve(Some(node), current),
                    optional: !schema.required.contains(wire_name),
                    description: self.description(node),
                }
            })
            .collect()
    }

    fn description(&self, node: &SchemaOrRef) -> Option<String> {
        let schema = match (node.reference(), node) {
            (Some(reference), _) => self.lookup.schema(reference).ok(),
            (None, SchemaOrRef::Schema(schema)) => Some(schema.as_ref()),
            (None, SchemaOrRef::Ref { .. }) => None,
        };
        schema
            .and_then(|s| s.description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::transform::collector::collect_usage;

    const SPEC: &str = r##"
openapi: 3.0.3
info: {title: t, version: "1"}
paths:
  /charges:
    get:
      tags: [Payments]
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Charge"
  /payouts:
    get:
      tags: [Payouts]
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Amount"
components:
  schemas:
    Charge:
      type: object
      required: [id]
      properties:
        id:
          type: string
          description: "  Unique id.  "
        amount:
          $ref: "#/components/schemas/Amount"
        receipt:
          $ref: "#/components/schemas/Receipt"
        tags:
          type: array
          items:
            type: array
            items:
              type: string
        meta:
          type: object
        status:
          type: string
          enum: [PENDING, PAID]
        count:
          type: [integer, "null"]
        source:
          oneOf:
            - type: string
            - type: integer
        class:
          description: untyped
    Receipt:
      type: object
    Amount:
      type: number
      description: Amount in minor units.
"##;

    #[test]
    fn test_property_resolution() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let lookup = RefLookup::new(&spec);
        let usage = collect_usage(&spec, lookup);
        let partition = NamespacePartition::build(&usage);
        let resolver = TypeResolver::new(&partition, lookup);

        let charge = lookup.schema("#/components/schemas/Charge").unwrap();
        let payments = NamespaceKey::tag("payments");
        let props = resolver.properties(charge, &payments);

        let by_name = |name: &str| props.iter().find(|p| p.name == name).unwrap().clone();

        let id = by_name("id");
        assert!(!id.optional);
        assert_eq!(id.resolved, ResolvedType::String);
        assert_eq!(id.description.as_deref(), Some("Unique id."));

        let amount = by_name("amount");
        assert!(amount.optional);
        assert_eq!(
            amount.resolved,
            ResolvedType::Class {
                name: "Amount".to_string(),
                namespace: Some(NamespaceKey::Shared),
            }
        );
        assert_eq!(amount.description.as_deref(), Some("Amount in minor units."));

        assert_eq!(
            by_name("receipt").resolved,
            ResolvedType::Class {
                name: "Receipt".to_string(),
                namespace: None,
            }
        );
        assert_eq!(
            by_name("tags").resolved,
            ResolvedType::List {
                item: Box::new(ResolvedType::List {
                    item: Box::new(ResolvedType::String)
                })
            }
        );
        assert_eq!(by_name("meta").resolved, ResolvedType::Map);
        assert_eq!(by_name("status").resolved, ResolvedType::String);
        assert_eq!(by_name("count").resolved, ResolvedType::Integer);
        assert_eq!(by_name("source").resolved, ResolvedType::Union);

        let class = by_name("classValue");
        assert_eq!(class.wire_name, "class");
        assert_eq!(class.resolved, ResolvedType::Any);
    }

    #[test]
    fn test_unknown_reference_resolves_to_bare_name() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let lookup = RefLookup::new(&spec);
        let partition = NamespacePartition::default();
        let resolver = TypeResolver::new(&partition, lookup);

        let node = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/card-reader".to_string(),
        };
        assert_eq!(
            resolver.resolve(Some(&node), &NamespaceKey::Shared),
            ResolvedType::Class {
                name: "CardReader".to_string(),
                namespace: None,
            }
        );
        assert_eq!(
            resolver.resolve(None, &NamespaceKey::Shared),
            ResolvedType::Any
        );
    }

    #[test]
    fn test_array_without_items() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let lookup = RefLookup::new(&spec);
        let partition = NamespacePartition::default();
        let resolver = TypeResolver::new(&partition, lookup);

        let node: SchemaOrRef = serde_json::from_str(r#"{"type": "array"}"#).unwrap();
        assert_eq!(
            resolver.resolve(Some(&node), &NamespaceKey::Shared),
            ResolvedType::List {
                item: Box::new(ResolvedType::Any)
            }
        );
    }

    #[test]
    fn test_duplicate_field_names_are_disambiguated() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let lookup = RefLookup::new(&spec);
        let partition = NamespacePartition::default();
        let resolver = TypeResolver::new(&partition, lookup);

        let schema: Schema = serde_json::from_str(
            r#"{"type": "object", "properties": {"first-name": {"type": "string"}, "first_name": {"type": "string"}}}"#,
        )
        .unwrap();
        let names: Vec<String> = resolver
            .properties(&schema, &NamespaceKey::Shared)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["firstName", "firstName2"]);
    }
}
