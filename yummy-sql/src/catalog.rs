//! Catalog of searchable fields offered to the rendering layer.

use crate::entity::{EntityName, FieldKey, humanize};
use crate::rules::AllowDenyConfig;
use crate::schema::{SchemaLookupError, SchemaProvider};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A searchable field and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogField {
    /// `Entity.column` key submitted back with a search.
    pub key: FieldKey,
    /// Label shown to the user.
    pub label: String,
}

/// Searchable fields of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGroup {
    entity: EntityName,
    display_name: String,
    fields: Vec<CatalogField>,
}

impl CatalogGroup {
    /// Entity the fields belong to.
    #[must_use]
    pub const fn entity(&self) -> &EntityName {
        &self.entity
    }

    /// Group heading, e.g. `Order Items`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Fields in schema order. Never empty.
    #[must_use]
    pub fn fields(&self) -> &[CatalogField] {
        &self.fields
    }
}

impl Serialize for CatalogGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.key, &field.label)?;
        }
        map.end()
    }
}

/// Ordered catalog of searchable fields, grouped by entity.
///
/// The primary entity comes first, followed by each `has_one` /
/// `belongs_to` relation in discovery order. Entities whose columns are all
/// filtered out by the rules are left out entirely, the primary entity
/// included.
///
/// Serializes as a JSON object that keeps this order:
/// `{"Orders": {"Orders.status": "Status"}, "Customers": {...}}`.
///
/// # Example
///
/// ```
/// use yummy_sql::{AllowDenyConfig, EntityName, FieldCatalog, RelationKind, StaticSchema};
///
/// let schema = StaticSchema::new()
///     .table("Orders", &["id", "status"])
///     .table("Customers", &["name", "password"])
///     .relation("Orders", RelationKind::BelongsTo, "Customers");
/// let rules = AllowDenyConfig::new().deny("Customers", &["password"]);
///
/// let catalog = FieldCatalog::build(&EntityName::new("Orders"), &schema, &rules).unwrap();
/// let keys: Vec<String> = catalog.field_keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, ["Orders.id", "Orders.status", "Customers.name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    groups: Vec<CatalogGroup>,
}

impl FieldCatalog {
    /// Build the catalog for `primary`.
    ///
    /// Schema lookup failures propagate; nothing is recovered locally.
    pub fn build<S>(
        primary: &EntityName,
        schema: &S,
        rules: &AllowDenyConfig,
    ) -> Result<Self, SchemaLookupError>
    where
        S: SchemaProvider + ?Sized,
    {
        let mut catalog = Self::default();

        let columns = schema.columns_of(primary)?;
        catalog.push_group(primary, &columns, rules);

        for relation in schema.relations_of(primary)? {
            if !relation.kind.is_searchable() {
                continue;
            }
            // First occurrence of an entity wins
            if catalog.contains_entity(&relation.target.display_name()) {
                continue;
            }
            let columns = schema.columns_of(&relation.target)?;
            catalog.push_group(&relation.target, &columns, rules);
        }

        Ok(catalog)
    }

    fn push_group(&mut self, entity: &EntityName, columns: &[String], rules: &AllowDenyConfig) {
        let fields: Vec<CatalogField> = columns
            .iter()
            .filter(|column| rules.is_allowed(entity, column))
            .map(|column| CatalogField {
                key: FieldKey::new(entity.clone(), column.as_str()),
                label: humanize(column),
            })
            .collect();

        if fields.is_empty() {
            return;
        }

        self.groups.push(CatalogGroup {
            entity: entity.clone(),
            display_name: entity.display_name(),
            fields,
        });
    }

    /// Group with the given display name.
    #[must_use]
    pub fn get(&self, display_name: &str) -> Option<&CatalogGroup> {
        self.groups.iter().find(|g| g.display_name == display_name)
    }

    /// Whether a group with the given display name is present.
    #[must_use]
    pub fn contains_entity(&self, display_name: &str) -> bool {
        self.get(display_name).is_some()
    }

    /// Whether `key` is offered by the catalog.
    #[must_use]
    pub fn contains_field(&self, key: &FieldKey) -> bool {
        self.field_keys().any(|k| k == key)
    }

    /// Groups in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogGroup> {
        self.groups.iter()
    }

    /// Every field key, group by group.
    pub fn field_keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter().map(|f| &f.key))
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no entity has a searchable column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a CatalogGroup;
    type IntoIter = std::slice::Iter<'a, CatalogGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for FieldCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.display_name, group)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RelationKind, StaticSchema};

    fn shop() -> StaticSchema {
        StaticSchema::new()
            .table("Orders", &["id", "status", "total"])
            .table("Customers", &["id", "name", "password"])
            .table("Invoices", &["number"])
            .table("OrderItems", &["sku", "quantity"])
            .table("Tags", &["label"])
            .relation("Orders", RelationKind::BelongsTo, "Customers")
            .relation("Orders", RelationKind::HasMany, "OrderItems")
            .relation("Orders", RelationKind::HasOne, "Invoices")
            .relation("Orders", RelationKind::BelongsToMany, "Tags")
    }

    fn orders() -> EntityName {
        EntityName::new("Orders")
    }

    fn keys(catalog: &FieldCatalog) -> Vec<String> {
        catalog.field_keys().map(ToString::to_string).collect()
    }

    #[test]
    fn test_primary_then_single_valued_relations() {
        let catalog = FieldCatalog::build(&orders(), &shop(), &AllowDenyConfig::new()).unwrap();

        let names: Vec<&str> = catalog.iter().map(CatalogGroup::display_name).collect();
        assert_eq!(names, ["Orders", "Customers", "Invoices"]);
        assert!(!catalog.contains_entity("Order Items"));
        assert!(!catalog.contains_entity("Tags"));
    }

    #[test]
    fn test_labels_are_humanized() {
        let schema = StaticSchema::new().table("Orders", &["created_at"]);
        let catalog = FieldCatalog::build(&orders(), &schema, &AllowDenyConfig::new()).unwrap();

        let group = catalog.get("Orders").unwrap();
        assert_eq!(group.fields()[0].label, "Created At");
        assert_eq!(group.fields()[0].key.to_string(), "Orders.created_at");
    }

    #[test]
    fn test_rules_filter_columns() {
        let rules = AllowDenyConfig::new()
            .allow("Orders", &["status"])
            .deny("Customers", &["password"]);
        let catalog = FieldCatalog::build(&orders(), &shop(), &rules).unwrap();

        assert_eq!(
            keys(&catalog),
            [
                "Orders.status",
                "Customers.id",
                "Customers.name",
                "Invoices.number"
            ]
        );
    }

    #[test]
    fn test_wholly_denied_relation_is_omitted() {
        let rules = AllowDenyConfig::new().deny_all("Customers");
        let catalog = FieldCatalog::build(&orders(), &shop(), &rules).unwrap();

        assert!(!catalog.contains_entity("Customers"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_wholly_denied_primary_is_omitted() {
        let rules = AllowDenyConfig::new().deny_all("Orders");
        let catalog = FieldCatalog::build(&orders(), &shop(), &rules).unwrap();

        assert!(!catalog.contains_entity("Orders"));
        assert_eq!(catalog.iter().next().unwrap().display_name(), "Customers");
    }

    #[test]
    fn test_duplicate_relation_first_wins() {
        let schema = shop().relation("Orders", RelationKind::BelongsTo, "customers");
        let catalog = FieldCatalog::build(&orders(), &schema, &AllowDenyConfig::new()).unwrap();

        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_unknown_primary_propagates() {
        let err = FieldCatalog::build(&EntityName::new("Ghosts"), &shop(), &AllowDenyConfig::new())
            .unwrap_err();
        assert!(matches!(err, SchemaLookupError::UnknownEntity { .. }));
    }

    #[test]
    fn test_unknown_relation_target_propagates() {
        let schema = shop().relation("Orders", RelationKind::HasOne, "Shipments");
        let result = FieldCatalog::build(&orders(), &schema, &AllowDenyConfig::new());
        assert_eq!(
            result,
            Err(SchemaLookupError::UnknownEntity {
                entity: "Shipments".into()
            })
        );
    }

    #[test]
    fn test_contains_field() {
        let catalog = FieldCatalog::build(&orders(), &shop(), &AllowDenyConfig::new()).unwrap();
        assert!(catalog.contains_field(&FieldKey::parse("customers.name").unwrap()));
        assert!(!catalog.contains_field(&FieldKey::parse("OrderItems.sku").unwrap()));
    }

    #[test]
    fn test_serializes_in_order() {
        let schema = StaticSchema::new()
            .table("Orders", &["status", "total"])
            .table("Customers", &["name"])
            .relation("Orders", RelationKind::BelongsTo, "Customers");
        let catalog = FieldCatalog::build(&orders(), &schema, &AllowDenyConfig::new()).unwrap();

        assert_eq!(
            serde_json::to_string(&catalog).unwrap(),
            r#"{"Orders":{"Orders.status":"Status","Orders.total":"Total"},"Customers":{"Customers.name":"Name"}}"#
        );
    }
}
