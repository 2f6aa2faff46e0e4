//! Schema access consumed by the catalog builder.
//!
//! The crate never talks to a database. Callers implement [`SchemaProvider`]
//! on top of whatever introspection they have, or load a [`StaticSchema`]
//! snapshot.

use crate::entity::EntityName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of association between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RelationKind {
    /// The primary entity owns at most one row of the target.
    HasOne,
    /// The primary entity references one row of the target.
    BelongsTo,
    /// The primary entity owns many rows of the target.
    HasMany,
    /// Many-to-many through a join table.
    BelongsToMany,
}

impl RelationKind {
    /// Only single-valued relations can be filtered without join
    /// multiplicity ambiguity.
    #[must_use]
    pub const fn is_searchable(self) -> bool {
        matches!(self, Self::HasOne | Self::BelongsTo)
    }
}

/// An association from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    /// Association kind.
    pub kind: RelationKind,
    /// Entity on the other side.
    pub target: EntityName,
}

impl RelationDescriptor {
    /// Create a relation to `target`.
    #[must_use]
    pub fn new(kind: RelationKind, target: &str) -> Self {
        Self {
            kind,
            target: EntityName::new(target),
        }
    }
}

/// Error returned by a [`SchemaProvider`] lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaLookupError {
    /// The entity is not part of the schema.
    UnknownEntity {
        /// Canonical name that was looked up.
        entity: String,
    },
}

impl SchemaLookupError {
    /// Error for an entity missing from the schema.
    #[must_use]
    pub fn unknown(entity: &EntityName) -> Self {
        Self::UnknownEntity {
            entity: entity.as_str().to_string(),
        }
    }
}

impl fmt::Display for SchemaLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEntity { entity } => write!(f, "unknown entity `{entity}`"),
        }
    }
}

impl std::error::Error for SchemaLookupError {}

/// Source of column and relation metadata.
pub trait SchemaProvider {
    /// Columns of `entity`, in schema order.
    fn columns_of(&self, entity: &EntityName) -> Result<Vec<String>, SchemaLookupError>;

    /// Relations declared on `entity`, in discovery order.
    fn relations_of(
        &self,
        entity: &EntityName,
    ) -> Result<Vec<RelationDescriptor>, SchemaLookupError>;
}

impl<T: SchemaProvider + ?Sized> SchemaProvider for &T {
    fn columns_of(&self, entity: &EntityName) -> Result<Vec<String>, SchemaLookupError> {
        (**self).columns_of(entity)
    }

    fn relations_of(
        &self,
        entity: &EntityName,
    ) -> Result<Vec<RelationDescriptor>, SchemaLookupError> {
        (**self).relations_of(entity)
    }
}

/// One table of a [`StaticSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Entity name.
    pub name: EntityName,
    /// Column names in schema order.
    pub columns: Vec<String>,
    /// Associations declared on this entity.
    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,
}

/// In-memory schema snapshot.
///
/// Deserializes from a list of tables, so a snapshot can live in a TOML or
/// JSON file next to the application config.
///
/// ```
/// use yummy_sql::{EntityName, RelationKind, SchemaProvider, StaticSchema};
///
/// let schema = StaticSchema::new()
///     .table("Orders", &["id", "status"])
///     .table("Customers", &["id", "name"])
///     .relation("Orders", RelationKind::BelongsTo, "Customers");
///
/// let orders = EntityName::new("orders");
/// assert_eq!(schema.columns_of(&orders).unwrap(), ["id", "status"]);
/// assert_eq!(schema.relations_of(&orders).unwrap().len(), 1);
/// assert!(schema.columns_of(&EntityName::new("Invoices")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSchema {
    #[serde(default)]
    tables: Vec<TableSchema>,
}

impl StaticSchema {
    /// Empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace the columns of) a table.
    #[must_use]
    pub fn table(mut self, name: &str, columns: &[&str]) -> Self {
        let columns = columns.iter().map(|c| (*c).to_string()).collect();
        self.table_mut(name).columns = columns;
        self
    }

    /// Declare a relation from `from` to `to`.
    ///
    /// `from` is created with no columns if it has not been added yet.
    #[must_use]
    pub fn relation(mut self, from: &str, kind: RelationKind, to: &str) -> Self {
        self.table_mut(from)
            .relations
            .push(RelationDescriptor::new(kind, to));
        self
    }

    /// Tables in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    fn find(&self, entity: &EntityName) -> Result<&TableSchema, SchemaLookupError> {
        self.tables
            .iter()
            .find(|t| &t.name == entity)
            .ok_or_else(|| SchemaLookupError::unknown(entity))
    }

    #[allow(clippy::indexing_slicing)] // idx is a position() hit or the slot just pushed
    fn table_mut(&mut self, name: &str) -> &mut TableSchema {
        let name = EntityName::new(name);
        let idx = match self.tables.iter().position(|t| t.name == name) {
            Some(idx) => idx,
            None => {
                self.tables.push(TableSchema {
                    name,
                    columns: Vec::new(),
                    relations: Vec::new(),
                });
                self.tables.len() - 1
            },
        };
        &mut self.tables[idx]
    }
}

impl SchemaProvider for StaticSchema {
    fn columns_of(&self, entity: &EntityName) -> Result<Vec<String>, SchemaLookupError> {
        self.find(entity).map(|t| t.columns.clone())
    }

    fn relations_of(
        &self,
        entity: &EntityName,
    ) -> Result<Vec<RelationDescriptor>, SchemaLookupError> {
        self.find(entity).map(|t| t.relations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_searchable_kinds() {
        assert!(RelationKind::HasOne.is_searchable());
        assert!(RelationKind::BelongsTo.is_searchable());
        assert!(!RelationKind::HasMany.is_searchable());
        assert!(!RelationKind::BelongsToMany.is_searchable());
    }

    #[test]
    fn test_unknown_entity() {
        let schema = StaticSchema::new().table("Orders", &["id"]);
        let err = schema.columns_of(&EntityName::new("Ghosts")).unwrap_err();
        assert_eq!(
            err,
            SchemaLookupError::UnknownEntity {
                entity: "Ghosts".into()
            }
        );
        assert_eq!(err.to_string(), "unknown entity `Ghosts`");
        assert!(schema.relations_of(&EntityName::new("Ghosts")).is_err());
    }

    #[test]
    fn test_table_replaces_columns_and_keeps_relations() {
        let schema = StaticSchema::new()
            .relation("Orders", RelationKind::HasOne, "Invoices")
            .table("Orders", &["id", "status"]);

        let orders = EntityName::new("Orders");
        assert_eq!(schema.columns_of(&orders).unwrap(), ["id", "status"]);
        assert_eq!(
            schema.relations_of(&orders).unwrap(),
            [RelationDescriptor::new(RelationKind::HasOne, "invoices")]
        );
        assert_eq!(schema.tables().len(), 1);
    }

    #[test]
    fn test_deserialize_snapshot() {
        let schema: StaticSchema = toml::from_str(
            r#"
            [[tables]]
            name = "orders"
            columns = ["id", "status"]
            relations = [
                { kind = "belongs_to", target = "customers" },
                { kind = "has_many", target = "order_items" },
            ]

            [[tables]]
            name = "customers"
            columns = ["id", "name"]
            "#,
        )
        .unwrap();

        let relations = schema.relations_of(&EntityName::new("Orders")).unwrap();
        assert_eq!(relations[0].kind, RelationKind::BelongsTo);
        assert_eq!(relations[1].target.as_str(), "OrderItems");
        assert_eq!(
            schema.columns_of(&EntityName::new("Customers")).unwrap(),
            ["id", "name"]
        );
    }
}
