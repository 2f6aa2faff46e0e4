//! Compile submitted criteria into predicates.

use super::types::{CompiledPredicate, SearchCriterion, SearchOperator};
use crate::entity::FieldKey;
use crate::rules::AllowDenyConfig;
use std::fmt;

/// Why a criterion produced no predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DropReason {
    /// Field was not `Entity.column` with an identifier entity and a
    /// non-empty column.
    MalformedField,
    /// Allow/deny rules exclude the column.
    Denied,
    /// Operator name is not recognized.
    UnknownOperator,
}

impl DropReason {
    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedField => "malformed_field",
            Self::Denied => "denied",
            Self::UnknownOperator => "unknown_operator",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A criterion that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedCriterion {
    /// Position in the submitted list.
    pub index: usize,
    /// Field as submitted.
    pub field: String,
    /// Why it was skipped.
    pub reason: DropReason,
}

/// Result of [`ConditionCompiler::compile_with_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    /// Predicates in submission order.
    pub predicates: Vec<CompiledPredicate>,
    /// Criteria that produced nothing, in submission order.
    pub dropped: Vec<DroppedCriterion>,
}

/// Turns submitted criteria into predicates, re-checking every field against
/// the allow/deny rules.
///
/// Invalid rows are skipped rather than failing the request: stale form
/// state and tampered query strings are expected input.
///
/// # Example
///
/// ```
/// use yummy_sql::{AllowDenyConfig, Comparison, ConditionCompiler, SearchCriterion};
///
/// let rules = AllowDenyConfig::new().allow("Orders", &["status", "total"]);
/// let criteria = [
///     SearchCriterion::new("Orders.status", "matching", "paid"),
///     SearchCriterion::new("Orders.total", "greater_than", "100"),
///     SearchCriterion::new("Orders.secret", "matching", "x"),
/// ];
///
/// let predicates = ConditionCompiler::new(&rules).compile(&criteria);
/// assert_eq!(predicates.len(), 2);
/// assert_eq!(predicates[0].comparison, Comparison::Eq);
/// assert_eq!(predicates[1].comparison, Comparison::Gt);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConditionCompiler<'a> {
    rules: &'a AllowDenyConfig,
}

impl<'a> ConditionCompiler<'a> {
    /// Compiler gated by `rules`.
    #[must_use]
    pub const fn new(rules: &'a AllowDenyConfig) -> Self {
        Self { rules }
    }

    /// Compile criteria, silently skipping the invalid ones.
    #[must_use]
    pub fn compile(&self, criteria: &[SearchCriterion]) -> Vec<CompiledPredicate> {
        self.compile_with_report(criteria).predicates
    }

    /// Compile criteria and report which ones were skipped and why.
    #[must_use]
    pub fn compile_with_report(&self, criteria: &[SearchCriterion]) -> Compilation {
        let mut compilation = Compilation::default();

        for (index, criterion) in criteria.iter().enumerate() {
            match self.compile_one(criterion) {
                Ok(predicate) => compilation.predicates.push(predicate),
                Err(reason) => compilation.dropped.push(DroppedCriterion {
                    index,
                    field: criterion.field.clone(),
                    reason,
                }),
            }
        }

        compilation
    }

    fn compile_one(&self, criterion: &SearchCriterion) -> Result<CompiledPredicate, DropReason> {
        let field = FieldKey::parse(&criterion.field).map_err(|_| DropReason::MalformedField)?;

        if !self.rules.is_allowed(field.entity(), field.column()) {
            return Err(DropReason::Denied);
        }

        let operator =
            SearchOperator::parse(&criterion.operator).ok_or(DropReason::UnknownOperator)?;

        Ok(CompiledPredicate::new(
            field,
            operator.comparison(),
            criterion.value.as_str(),
        ))
    }
}
