//! Condition sets handed to the pagination layer.

use crate::compile::{CompiledPredicate, Comparison};
use crate::dialect::{Dialect, Postgres, Sqlite};
use crate::validate::quote_identifier;

/// Receiver of compiled predicates.
///
/// Implementations must append to whatever conditions they already hold;
/// predicates are ANDed with existing ones, never substituted for them.
pub trait PaginationSink {
    /// Append `predicates` after the existing conditions.
    fn append_conditions(&mut self, predicates: Vec<CompiledPredicate>);
}

impl PaginationSink for Vec<CompiledPredicate> {
    fn append_conditions(&mut self, predicates: Vec<CompiledPredicate>) {
        self.extend(predicates);
    }
}

impl<T: PaginationSink + ?Sized> PaginationSink for &mut T {
    fn append_conditions(&mut self, predicates: Vec<CompiledPredicate>) {
        (**self).append_conditions(predicates);
    }
}

/// Rendered `WHERE` fragment with its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "SqlFragment must be used to build the query"]
pub struct SqlFragment {
    /// Conditions joined with `AND`; empty when there are none.
    pub sql: String,
    /// Values in placeholder order.
    pub params: Vec<String>,
    /// Next free placeholder index.
    pub next_idx: usize,
}

/// Accumulated conditions for a paginated query.
///
/// # Example
///
/// ```
/// use yummy_sql::{
///     AllowDenyConfig, ConditionCompiler, ConditionSet, PaginationSink, SearchCriterion,
/// };
///
/// let rules = AllowDenyConfig::new();
/// let predicates = ConditionCompiler::new(&rules).compile(&[
///     SearchCriterion::new("Orders.status", "matching", "paid"),
///     SearchCriterion::new("Orders.note", "containing", "gift"),
/// ]);
///
/// let mut conditions = ConditionSet::new();
/// conditions.append_conditions(predicates);
///
/// let fragment = conditions.to_postgres(1);
/// assert_eq!(
///     fragment.sql,
///     "Orders.status = $1 AND Orders.note ILIKE '%' || $2 || '%'"
/// );
/// assert_eq!(fragment.params, ["paid", "gift"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet {
    predicates: Vec<CompiledPredicate>,
}

impl ConditionSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicates in the order they were appended.
    #[must_use]
    pub fn predicates(&self) -> &[CompiledPredicate] {
        &self.predicates
    }

    /// Number of predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// True when no predicate has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Render with `dialect`, numbering placeholders from `start_idx`.
    pub fn to_sql<D: Dialect>(&self, dialect: &D, start_idx: usize) -> SqlFragment {
        let mut idx = start_idx;
        let mut conditions = Vec::with_capacity(self.predicates.len());
        let mut params = Vec::with_capacity(self.predicates.len());

        for predicate in &self.predicates {
            conditions.push(build_condition(dialect, predicate, idx));
            params.push(predicate.value.clone());
            idx += 1;
        }

        SqlFragment {
            sql: conditions.join(" AND "),
            params,
            next_idx: idx,
        }
    }

    /// Render for Postgres.
    pub fn to_postgres(&self, start_idx: usize) -> SqlFragment {
        self.to_sql(&Postgres, start_idx)
    }

    /// Render for `SQLite`.
    pub fn to_sqlite(&self, start_idx: usize) -> SqlFragment {
        self.to_sql(&Sqlite, start_idx)
    }
}

impl PaginationSink for ConditionSet {
    fn append_conditions(&mut self, predicates: Vec<CompiledPredicate>) {
        self.predicates.extend(predicates);
    }
}

impl From<Vec<CompiledPredicate>> for ConditionSet {
    fn from(predicates: Vec<CompiledPredicate>) -> Self {
        Self { predicates }
    }
}

/// Build a single condition bound to placeholder `idx`.
fn build_condition<D: Dialect>(dialect: &D, predicate: &CompiledPredicate, idx: usize) -> String {
    let column = format!(
        "{}.{}",
        quote_identifier(predicate.field.entity().as_str()),
        quote_identifier(predicate.field.column())
    );

    match predicate.comparison {
        Comparison::Contains => dialect.contains_clause(&column, idx),
        Comparison::NotContains => dialect.not_contains_clause(&column, idx),
        op => {
            let op_str = match op {
                Comparison::Ne => "!=",
                Comparison::Gt => ">",
                Comparison::Lt => "<",
                _ => "=",
            };
            format!("{} {} {}", column, op_str, dialect.param(idx))
        },
    }
}
