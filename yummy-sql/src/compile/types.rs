//! Operators, criteria and compiled predicates.

use crate::entity::FieldKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-facing search operator, as submitted in the `operator[]` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOperator {
    /// Exact match.
    Matching,
    /// Anything but an exact match.
    NotMatching,
    /// Substring match.
    Containing,
    /// No substring match.
    NotContaining,
    /// Strictly greater.
    GreaterThan,
    /// Strictly less.
    LessThan,
}

impl SearchOperator {
    /// All operators in the order a search form lists them.
    pub const ALL: [Self; 6] = [
        Self::Containing,
        Self::NotContaining,
        Self::GreaterThan,
        Self::LessThan,
        Self::Matching,
        Self::NotMatching,
    ];

    /// Look up an operator by its wire name.
    ///
    /// ```
    /// use yummy_sql::SearchOperator;
    ///
    /// assert_eq!(SearchOperator::parse("greater_than"), Some(SearchOperator::GreaterThan));
    /// assert_eq!(SearchOperator::parse("GREATER_THAN"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Wire name, e.g. `not_containing`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matching => "matching",
            Self::NotMatching => "not_matching",
            Self::Containing => "containing",
            Self::NotContaining => "not_containing",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
        }
    }

    /// Label shown in a search form when none is configured.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Matching => "Exact Match",
            Self::NotMatching => "Not Exact Match",
            Self::Containing => "Containing",
            Self::NotContaining => "Not Containing",
            Self::GreaterThan => "Greater than",
            Self::LessThan => "Less than",
        }
    }

    /// Comparison the operator compiles to.
    #[must_use]
    pub const fn comparison(self) -> Comparison {
        match self {
            Self::Matching => Comparison::Eq,
            Self::NotMatching => Comparison::Ne,
            Self::Containing => Comparison::Contains,
            Self::NotContaining => Comparison::NotContains,
            Self::GreaterThan => Comparison::Gt,
            Self::LessThan => Comparison::Lt,
        }
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by [`SearchOperator::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search operator `{}`", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for SearchOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Engine-neutral comparison carried by a [`CompiledPredicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Column equals value.
    Eq,
    /// Column differs from value.
    Ne,
    /// Column contains value as a substring.
    Contains,
    /// Column does not contain value as a substring.
    NotContains,
    /// Column greater than value.
    Gt,
    /// Column less than value.
    Lt,
}

/// One submitted filter row, exactly as received.
///
/// Nothing is validated at this point; [`ConditionCompiler`](super::ConditionCompiler)
/// decides what survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriterion {
    /// `Entity.column` field key.
    pub field: String,
    /// Operator wire name.
    pub operator: String,
    /// Raw search value.
    pub value: String,
}

impl SearchCriterion {
    /// Create a criterion.
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Validated filter condition, ready for a query layer.
///
/// The value is never spliced into SQL; renderers bind it as a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledPredicate {
    /// Column the condition applies to.
    pub field: FieldKey,
    /// Comparison to perform.
    pub comparison: Comparison,
    /// Value to compare against.
    pub value: String,
}

impl CompiledPredicate {
    /// Create a predicate.
    pub fn new(field: FieldKey, comparison: Comparison, value: impl Into<String>) -> Self {
        Self {
            field,
            comparison,
            value: value.into(),
        }
    }
}
