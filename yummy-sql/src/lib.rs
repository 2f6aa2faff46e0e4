// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self by design
#![cfg_attr(test, allow(clippy::indexing_slicing))] // Tests assert on known positions

//! # yummy-sql - Searchable fields and filter compilation
//!
//! Core of a search-filter component for paginated list views:
//!
//! - [`AllowDenyConfig`] decides which columns of which entities are searchable.
//! - [`FieldCatalog`] lists the searchable fields of an entity and its
//!   `has_one` / `belongs_to` relations, with display labels.
//! - [`ConditionCompiler`] turns submitted `(field, operator, value)` rows into
//!   [`CompiledPredicate`]s, skipping rows the rules reject.
//! - [`ConditionSet`] collects predicates for the pagination layer and renders
//!   them as parameterized SQL.
//!
//! Schema access goes through the [`SchemaProvider`] trait; nothing here
//! opens a database connection.
//!
//! ## Quick Start
//!
//! ```
//! use yummy_sql::prelude::*;
//!
//! let schema = StaticSchema::new()
//!     .table("Orders", &["id", "status", "total", "secret"])
//!     .table("Customers", &["name"])
//!     .relation("Orders", RelationKind::BelongsTo, "Customers");
//! let rules = AllowDenyConfig::new().deny("Orders", &["secret"]);
//!
//! // Fields offered to the search form
//! let catalog = FieldCatalog::build(&EntityName::new("Orders"), &schema, &rules).unwrap();
//! assert!(catalog.contains_entity("Customers"));
//!
//! // Criteria submitted back
//! let predicates = ConditionCompiler::new(&rules).compile(&[
//!     SearchCriterion::new("Orders.total", "greater_than", "100"),
//!     SearchCriterion::new("Orders.secret", "matching", "x"),
//! ]);
//!
//! let mut conditions = ConditionSet::new();
//! conditions.append_conditions(predicates);
//! assert_eq!(conditions.to_sqlite(1).sql, "Orders.total > ?1");
//! ```
//!
//! ## Supported Operators
//!
//! | Operator | Comparison | Postgres |
//! |----------|------------|----------|
//! | `matching` | `Eq` | `col = $1` |
//! | `not_matching` | `Ne` | `col != $1` |
//! | `containing` | `Contains` | `col ILIKE '%' \|\| $1 \|\| '%'` |
//! | `not_containing` | `NotContains` | `col NOT ILIKE '%' \|\| $1 \|\| '%'` |
//! | `greater_than` | `Gt` | `col > $1` |
//! | `less_than` | `Lt` | `col < $1` |

mod catalog;
mod compile;
mod condition;
mod dialect;
mod entity;
mod rules;
mod schema;
mod validate;

pub use catalog::{CatalogField, CatalogGroup, FieldCatalog};
pub use compile::{
    Compilation, CompiledPredicate, Comparison, ConditionCompiler, DropReason, DroppedCriterion,
    SearchCriterion, SearchOperator, UnknownOperator,
};
pub use condition::{ConditionSet, PaginationSink, SqlFragment};
pub use dialect::{Dialect, Postgres, Sqlite};
pub use entity::{EntityName, FieldKey, humanize};
pub use rules::{AllowDenyConfig, DenyRule, RulesError, WILDCARD};
pub use schema::{
    RelationDescriptor, RelationKind, SchemaLookupError, SchemaProvider, StaticSchema, TableSchema,
};
pub use validate::{IdentifierError, is_valid_identifier};

/// Prelude module for convenient imports.
///
/// ```
/// use yummy_sql::prelude::*;
/// let rules = AllowDenyConfig::new();
/// assert!(rules.is_allowed(&EntityName::new("Orders"), "status"));
/// ```
pub mod prelude {
    pub use crate::{
        AllowDenyConfig, CompiledPredicate, Comparison, ConditionCompiler, ConditionSet,
        Dialect, EntityName, FieldCatalog, FieldKey, PaginationSink, Postgres, RelationDescriptor,
        RelationKind, SchemaLookupError, SchemaProvider, SearchCriterion, SearchOperator, Sqlite,
        StaticSchema,
    };
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
