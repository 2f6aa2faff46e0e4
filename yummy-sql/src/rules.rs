//! Allow/deny rules deciding which columns are searchable.
//!
//! One evaluator, [`AllowDenyConfig::is_allowed`], is consulted both when the
//! field catalog is built and when submitted criteria are compiled.

use crate::entity::EntityName;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Marker that denies a whole entity.
pub const WILDCARD: &str = "*";

/// Deny rule for a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDenyRule")]
#[non_exhaustive]
pub enum DenyRule {
    /// Every column of the entity is denied (`"*"`).
    All,
    /// Only the listed columns are denied.
    Columns(BTreeSet<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDenyRule {
    Marker(String),
    Columns(Vec<String>),
}

impl TryFrom<RawDenyRule> for DenyRule {
    type Error = RulesError;

    fn try_from(raw: RawDenyRule) -> Result<Self, Self::Error> {
        match raw {
            RawDenyRule::Marker(marker) if marker == WILDCARD => Ok(Self::All),
            RawDenyRule::Marker(marker) => Err(RulesError::InvalidDenyRule { value: marker }),
            RawDenyRule::Columns(columns) => Ok(Self::Columns(columns.into_iter().collect())),
        }
    }
}

/// Error raised while loading rules from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    /// A deny rule was a string other than `"*"`.
    InvalidDenyRule {
        /// The offending value.
        value: String,
    },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDenyRule { value } => write!(
                f,
                "deny rule must be \"{WILDCARD}\" or a list of columns, got \"{value}\""
            ),
        }
    }
}

impl std::error::Error for RulesError {}

/// Per-entity column whitelist and blacklist.
///
/// Evaluation order for [`is_allowed`](Self::is_allowed), first match wins:
/// 1. column explicitly denied → denied
/// 2. entity denied with `"*"` → denied
/// 3. entity has an allow list that does not name the column → denied
/// 4. otherwise → allowed
///
/// An entity with an empty allow list therefore has no searchable columns.
///
/// # Example
///
/// ```
/// use yummy_sql::{AllowDenyConfig, EntityName};
///
/// let rules = AllowDenyConfig::new()
///     .allow("Orders", &["status", "total"])
///     .deny("Orders", &["total"])
///     .deny_all("Users");
///
/// let orders = EntityName::new("orders");
/// assert!(rules.is_allowed(&orders, "status"));
/// assert!(!rules.is_allowed(&orders, "total"));
/// assert!(!rules.is_allowed(&orders, "secret"));
/// assert!(!rules.is_allowed(&EntityName::new("Users"), "email"));
/// assert!(rules.is_allowed(&EntityName::new("Customers"), "email"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllowDenyConfig {
    deny: HashMap<EntityName, DenyRule>,
    allow: HashMap<EntityName, BTreeSet<String>>,
}

impl AllowDenyConfig {
    /// Rules that allow every column of every entity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deny every column of `entity`.
    #[must_use]
    pub fn deny_all(mut self, entity: &str) -> Self {
        self.deny.insert(EntityName::new(entity), DenyRule::All);
        self
    }

    /// Deny specific columns of `entity`.
    ///
    /// Has no effect if the entity is already denied with `"*"`.
    #[must_use]
    pub fn deny(mut self, entity: &str, columns: &[&str]) -> Self {
        let rule = self
            .deny
            .entry(EntityName::new(entity))
            .or_insert_with(|| DenyRule::Columns(BTreeSet::new()));
        if let DenyRule::Columns(denied) = rule {
            denied.extend(columns.iter().map(|c| (*c).to_string()));
        }
        self
    }

    /// Restrict `entity` to the listed columns.
    ///
    /// Calling it again for the same entity extends the list.
    #[must_use]
    pub fn allow(mut self, entity: &str, columns: &[&str]) -> Self {
        self.allow
            .entry(EntityName::new(entity))
            .or_default()
            .extend(columns.iter().map(|c| (*c).to_string()));
        self
    }

    /// Whether `column` of `entity` may be searched.
    #[must_use]
    pub fn is_allowed(&self, entity: &EntityName, column: &str) -> bool {
        match self.deny.get(entity) {
            Some(DenyRule::Columns(denied)) if denied.contains(column) => return false,
            Some(DenyRule::All) => return false,
            _ => {},
        }

        match self.allow.get(entity) {
            Some(allowed) => allowed.contains(column),
            None => true,
        }
    }

    /// Deny rule configured for `entity`, if any.
    #[must_use]
    pub fn deny_rule(&self, entity: &EntityName) -> Option<&DenyRule> {
        self.deny.get(entity)
    }

    /// Allow list configured for `entity`, if any.
    #[must_use]
    pub fn allow_list(&self, entity: &EntityName) -> Option<&BTreeSet<String>> {
        self.allow.get(entity)
    }
}
