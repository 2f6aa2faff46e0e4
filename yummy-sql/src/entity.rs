//! Entity names, field keys and display labels.
//!
//! Schema sources disagree on casing (`order_items`, `OrderItems`,
//! `ORDER_ITEMS`). Every name is converted to UpperCamelCase once, when an
//! [`EntityName`] is built, and only the canonical form is compared.

use crate::validate::{IdentifierError, check_identifier};
use heck::{ToTitleCase, ToUpperCamelCase};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical (UpperCamelCase) name of a logical table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityName(String);

impl EntityName {
    /// Canonicalize a name from a trusted source (schema, configuration).
    ///
    /// ```
    /// use yummy_sql::EntityName;
    ///
    /// assert_eq!(EntityName::new("order_items"), EntityName::new("OrderItems"));
    /// assert_eq!(EntityName::new("ORDER_ITEMS").as_str(), "OrderItems");
    /// ```
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_upper_camel_case())
    }

    /// Canonicalize a name from user input, rejecting anything that is not a
    /// plain SQL identifier before conversion.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        check_identifier(raw, "entity")?;
        let name = Self::new(raw);
        check_identifier(&name.0, "entity")?;
        Ok(name)
    }

    /// The canonical form, e.g. `OrderItems`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form used as the catalog group key, e.g. `Order Items`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0.to_title_case()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Serialize for EntityName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

/// Addressable search field: `Entity.column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    entity: EntityName,
    column: String,
}

impl FieldKey {
    /// Build a key from parts that are already trusted.
    pub fn new(entity: EntityName, column: impl Into<String>) -> Self {
        Self {
            entity,
            column: column.into(),
        }
    }

    /// Parse a submitted `Entity.column` string.
    ///
    /// Splits on the first `.`. The entity part must be an identifier and is
    /// canonicalized; the column part is kept as-is and only has to be
    /// non-empty, so any column a schema reports can be addressed.
    ///
    /// ```
    /// use yummy_sql::FieldKey;
    ///
    /// let key = FieldKey::parse("order_items.unit_price").unwrap();
    /// assert_eq!(key.entity().as_str(), "OrderItems");
    /// assert_eq!(key.column(), "unit_price");
    /// assert_eq!(key.to_string(), "OrderItems.unit_price");
    ///
    /// assert_eq!(FieldKey::parse("Customers.prénom").unwrap().column(), "prénom");
    /// assert!(FieldKey::parse("status").is_err());
    /// assert!(FieldKey::parse("Orders.").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let Some((entity, column)) = raw.split_once('.') else {
            return Err(IdentifierError::MissingSeparator {
                value: raw.to_string(),
            });
        };
        let entity = EntityName::parse(entity)?;
        if column.is_empty() {
            return Err(IdentifierError::EmptyColumn {
                value: raw.to_string(),
            });
        }
        Ok(Self::new(entity, column))
    }

    /// The entity half.
    #[must_use]
    pub const fn entity(&self) -> &EntityName {
        &self.entity
    }

    /// The column half.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.column)
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Turn a column name into a display label: `created_at` becomes `Created At`.
#[must_use]
pub fn humanize(column: &str) -> String {
    column.to_title_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_casing_is_normalized() {
        let canonical = EntityName::new("OrderItems");
        assert_eq!(EntityName::new("order_items"), canonical);
        assert_eq!(EntityName::new("ORDER_ITEMS"), canonical);
        assert_eq!(EntityName::new(" order_items "), canonical);
        assert_eq!(EntityName::new("orders").as_str(), "Orders");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(EntityName::new("order_items").display_name(), "Order Items");
        assert_eq!(EntityName::new("Orders").display_name(), "Orders");
    }

    #[test]
    fn test_parse_rejects_non_identifiers() {
        assert!(EntityName::parse("Orders").is_ok());
        assert!(EntityName::parse("").is_err());
        assert!(EntityName::parse("Orders; DROP").is_err());
        assert!(EntityName::parse("Order Items").is_err());
    }

    #[test]
    fn test_field_key_parse() {
        let key = FieldKey::parse("Orders.status").unwrap();
        assert_eq!(key.entity(), &EntityName::new("Orders"));
        assert_eq!(key.column(), "status");
    }

    #[test]
    fn test_field_key_parse_errors() {
        assert_eq!(
            FieldKey::parse("status"),
            Err(IdentifierError::MissingSeparator {
                value: "status".into()
            })
        );
        assert!(FieldKey::parse(".status").is_err());
        assert_eq!(
            FieldKey::parse("Orders."),
            Err(IdentifierError::EmptyColumn {
                value: "Orders.".into()
            })
        );
        assert!(FieldKey::parse("Orders; DROP.status").is_err());
    }

    #[test]
    fn test_field_key_keeps_any_column_name() {
        for column in ["prénom", "order-date", "status.x", "a b"] {
            let key = FieldKey::parse(&format!("Customers.{column}")).unwrap();
            assert_eq!(key.column(), column);
        }
        let long = "a".repeat(64);
        assert_eq!(FieldKey::parse(&format!("Orders.{long}")).unwrap().column(), long);
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("created_at"), "Created At");
        assert_eq!(humanize("status"), "Status");
        assert_eq!(humanize("id"), "Id");
    }

    #[test]
    fn test_serialize_as_strings() {
        let key = FieldKey::parse("orders.total").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""Orders.total""#);
        let entity: EntityName = serde_json::from_str(r#""order_items""#).unwrap();
        assert_eq!(entity.as_str(), "OrderItems");
    }
}
