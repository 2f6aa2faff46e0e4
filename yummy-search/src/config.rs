//! Search component configuration.
//!
//! ```toml
//! model = "Orders"
//!
//! [rules.allow]
//! Orders = ["status", "total"]
//!
//! [rules.deny]
//! Customers = ["password"]
//! Invoices = "*"
//!
//! [operators]
//! matching = "Is"
//! containing = "Has"
//!
//! [params]
//! search = "q"
//! clear = "q_clear"
//! ```
//!
//! Every table is optional. A configured `[operators]` table replaces the
//! default labels entirely.

use crate::constants::{DEFAULT_CLEAR_PARAM, DEFAULT_SEARCH_PARAM};
use crate::error::ConfigurationError;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use yummy_sql::{AllowDenyConfig, EntityName, SearchOperator};

/// Configuration of one search component instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Primary entity of the list view.
    pub model: Option<String>,
    /// Allow/deny rules applied to the catalog and to submitted criteria.
    pub rules: AllowDenyConfig,
    /// Operator labels offered to the search form.
    pub operators: OperatorLabels,
    /// Query parameter names.
    pub params: ParamNames,
}

impl SearchConfig {
    /// Configuration for `model` with default rules, labels and parameters.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Toml`] on syntax errors, unknown keys,
    /// unknown operators or invalid deny rules.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(source).map_err(|e| ConfigurationError::Toml {
            message: e.message().to_string(),
        })
    }

    /// Replace the allow/deny rules.
    #[must_use]
    pub fn with_rules(mut self, rules: AllowDenyConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the operator labels.
    #[must_use]
    pub fn with_operators(mut self, operators: OperatorLabels) -> Self {
        self.operators = operators;
        self
    }

    /// Replace the query parameter names.
    #[must_use]
    pub fn with_params(mut self, params: ParamNames) -> Self {
        self.params = params;
        self
    }

    /// Canonical primary entity.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingModel`] when no model is set,
    /// [`ConfigurationError::InvalidModel`] when it is not a valid identifier.
    pub fn primary_entity(&self) -> Result<EntityName, ConfigurationError> {
        let model = self
            .model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or(ConfigurationError::MissingModel)?;
        EntityName::parse(model).map_err(|_| ConfigurationError::InvalidModel {
            model: model.to_string(),
        })
    }
}

/// Operator labels in display order.
///
/// Labels only affect what the form shows; every known operator is still
/// accepted when criteria are compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorLabels(Vec<(SearchOperator, String)>);

impl OperatorLabels {
    /// Labels for the given operators, sorted in canonical operator order.
    #[must_use]
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = (SearchOperator, L)>,
        L: Into<String>,
    {
        let mut by_op: HashMap<SearchOperator, String> = labels
            .into_iter()
            .map(|(op, label)| (op, label.into()))
            .collect();
        let ordered = SearchOperator::ALL
            .iter()
            .filter_map(|op| by_op.remove(op).map(|label| (*op, label)))
            .collect();
        Self(ordered)
    }

    /// Label shown for `op`, if it is offered.
    #[must_use]
    pub fn label(&self, op: SearchOperator) -> Option<&str> {
        self.0
            .iter()
            .find(|(o, _)| *o == op)
            .map(|(_, label)| label.as_str())
    }

    /// Iterate `(operator, label)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SearchOperator, &str)> {
        self.0.iter().map(|(op, label)| (*op, label.as_str()))
    }

    /// Number of offered operators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no operator is offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for OperatorLabels {
    fn default() -> Self {
        Self(
            SearchOperator::ALL
                .iter()
                .map(|op| (*op, op.default_label().to_string()))
                .collect(),
        )
    }
}

impl Serialize for OperatorLabels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (op, label) in &self.0 {
            map.serialize_entry(op.as_str(), label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OperatorLabels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, String>::deserialize(deserializer)?;
        let labels = raw
            .into_iter()
            .map(|(name, label)| {
                SearchOperator::parse(&name)
                    .map(|op| (op, label))
                    .ok_or_else(|| D::Error::custom(format!("unknown operator `{name}`")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(labels))
    }
}

/// Query parameter names read by the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamNames {
    /// Parameter carrying the search rows.
    pub search: String,
    /// Parameter that discards the search.
    pub clear: String,
}

impl ParamNames {
    /// Custom parameter names.
    pub fn new(search: impl Into<String>, clear: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            clear: clear.into(),
        }
    }
}

impl Default for ParamNames {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_PARAM, DEFAULT_CLEAR_PARAM)
    }
}
