use std::collections::{BTreeMap, BTreeSet};

use super::collector::UsageTable;
use super::name_normalizer::{schema_class_name, unique_name};
use crate::ir::NamespaceKey;
use crate::parse::schema::Schema;

/// A shape placed in its namespace under its final class name.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionedShape<'a> {
    pub reference: String,
    pub class_name: String,
    pub schema: Option<&'a Schema>,
}

/// Assignment of every collected shape to exactly one namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespacePartition<'a> {
    shapes: BTreeMap<NamespaceKey, Vec<PartitionedShape<'a>>>,
    owners: BTreeMap<String, NamespaceKey>,
    class_names: BTreeMap<String, String>,
}

impl<'a> NamespacePartition<'a> {
    /// A shape reached from exactly one tag lives in that tag's namespace;
    /// anything else goes to [`NamespaceKey::Shared`]. Class names are unique
    /// across the partition, assigned in reference order.
    pub fn build(usage: &UsageTable<'a>) -> Self {
        let mut partition = Self::default();
        let mut taken = BTreeSet::new();

        for entry in usage.iter() {
            let base = schema_class_name(
                Some(&entry.reference),
                entry.schema.and_then(|s| s.title.as_deref()),
            );
            let class_name = unique_name(&base, &taken);
            if class_name != base {
                log::warn!(
                    "class name already taken, renaming schema={} from={base} to={class_name}",
                    entry.reference
                );
            }
            taken.insert(class_name.clone());

            let owner = match entry.tags.len() {
                1 => entry
                    .tags
                    .first()
                    .map(|tag| NamespaceKey::Tag(tag.clone()))
                    .unwrap_or(NamespaceKey::Shared),
                _ => NamespaceKey::Shared,
            };

            partition
                .owners
                .insert(entry.reference.clone(), owner.clone());
            partition
                .class_names
                .insert(entry.reference.clone(), class_name.clone());
            partition.shapes.entry(owner).or_default().push(PartitionedShape {
                reference: entry.reference.clone(),
                class_name,
                schema: entry.schema,
            });
        }

        for shapes in partition.shapes.values_mut() {
            shapes.sort_by(|a, b| {
                a.class_name
                    .cmp(&b.class_name)
                    .then_with(|| a.reference.cmp(&b.reference))
            });
        }

        partition
    }

    /// Namespaces holding at least one shape, in key order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&NamespaceKey, &[PartitionedShape<'a>])> {
        self.shapes.iter().map(|(key, shapes)| (key, shapes.as_slice()))
    }

    pub fn shapes(&self, key: &NamespaceKey) -> &[PartitionedShape<'a>] {
        self.shapes.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn owner(&self, reference: &str) -> Option<&NamespaceKey> {
        self.owners.get(reference)
    }

    pub fn class_name(&self, reference: &str) -> Option<&str> {
        self.class_names.get(reference).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::parse::ref_resolve::RefLookup;
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
                $ref: "#/components/schemas/Payout"
  /ping:
    get:
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pong"
components:
  schemas:
    Charge:
      type: object
      properties:
        amount:
          $ref: "#/components/schemas/Amount"
    Payout:
      type: object
      properties:
        amount:
          $ref: "#/components/schemas/Amount"
    Amount:
      type: number
    Pong:
      type: object
"##;

    #[test]
    fn test_single_owner_and_shared_fallback() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let usage = collect_usage(&spec, RefLookup::new(&spec));
        let partition = NamespacePartition::build(&usage);

        let payments = NamespaceKey::tag("payments");
        assert_eq!(
            partition.owner("#/components/schemas/Charge"),
            Some(&payments)
        );
        assert_eq!(
            partition.owner("#/components/schemas/Amount"),
            Some(&NamespaceKey::Shared)
        );
        assert_eq!(
            partition.owner("#/components/schemas/Pong"),
            Some(&NamespaceKey::Shared)
        );

        let shared: Vec<&str> = partition
            .shapes(&NamespaceKey::Shared)
            .iter()
            .map(|s| s.class_name.as_str())
            .collect();
        assert_eq!(shared, ["Amount", "Pong"]);

        let keys: Vec<&str> = partition.namespaces().map(|(k, _)| k.key()).collect();
        assert_eq!(keys, ["__shared", "payments", "payouts"]);
    }

    #[test]
    fn test_every_reference_owned_exactly_once() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let usage = collect_usage(&spec, RefLookup::new(&spec));
        let partition = NamespacePartition::build(&usage);

        for entry in usage.iter() {
            let hits = partition
                .namespaces()
                .filter(|(_, shapes)| shapes.iter().any(|s| s.reference == entry.reference))
                .count();
            assert_eq!(hits, 1, "{}", entry.reference);
        }
        assert_eq!(partition.len(), usage.len());
    }

    #[test]
    fn test_colliding_class_names_get_suffixes() {
        let spec = parse::from_yaml(
            r##"
openapi: 3.0.3
info: {title: t, version: "1"}
paths:
  /a:
    get:
      tags: [a]
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  one:
                    $ref: "#/components/schemas/card-reader"
                  two:
                    $ref: "#/components/schemas/card.reader"
components:
  schemas:
    card-reader:
      type: object
    card.reader:
      type: object
"##,
        )
        .unwrap();
        let usage = collect_usage(&spec, RefLookup::new(&spec));
        let partition = NamespacePartition::build(&usage);

        assert_eq!(
            partition.class_name("#/components/schemas/card-reader"),
            Some("CardReader")
        );
        assert_eq!(
            partition.class_name("#/components/schemas/card.reader"),
            Some("CardReader2")
        );
    }
}
