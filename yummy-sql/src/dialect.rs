//! SQL dialect implementations for Postgres and `SQLite`.
//!
//! Each dialect handles the placeholder and pattern-match syntax used when a
//! [`ConditionSet`](crate::ConditionSet) is rendered.

/// SQL dialect trait for database-specific syntax.
pub trait Dialect: Clone + Copy {
    /// Format a parameter placeholder (e.g., `$1` for Postgres, `?1` for `SQLite`).
    fn param(&self, idx: usize) -> String;

    /// Keyword for a case-insensitive pattern match.
    fn like_keyword(&self) -> &'static str;

    /// Format a CONTAINS clause (e.g., `col ILIKE '%' || $1 || '%'`).
    fn contains_clause(&self, column: &str, idx: usize) -> String {
        format!(
            "{column} {} '%' || {} || '%'",
            self.like_keyword(),
            self.param(idx)
        )
    }

    /// Format a NOT CONTAINS clause (e.g., `col NOT ILIKE '%' || $1 || '%'`).
    fn not_contains_clause(&self, column: &str, idx: usize) -> String {
        format!(
            "{column} NOT {} '%' || {} || '%'",
            self.like_keyword(),
            self.param(idx)
        )
    }
}

/// Postgres dialect.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }

    #[inline]
    fn like_keyword(&self) -> &'static str {
        "ILIKE"
    }
}

/// `SQLite` dialect.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }

    #[inline]
    fn like_keyword(&self) -> &'static str {
        // SQLite LIKE is case-insensitive for ASCII by default
        "LIKE"
    }
}
