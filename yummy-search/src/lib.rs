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
#![allow(clippy::doc_markdown)] // Code in docs - extensive changes needed
#![allow(clippy::must_use_candidate)] // Not all returned values need must_use
#![allow(clippy::return_self_not_must_use)] // Builder pattern returns Self by design
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::double_must_use)] // Builder methods can have their own docs
#![cfg_attr(test, allow(clippy::indexing_slicing))] // Tests assert on known positions

//! # yummy-search - Search filters for paginated list views
//!
//! Wires the pieces from [`yummy_sql`] into a component a list endpoint can
//! call once per request:
//!
//! 1. [`SearchRequest`] reads the search rows (or the clear signal) from the
//!    query string.
//! 2. [`YummySearch::search`] compiles the rows against the configured
//!    allow/deny rules and appends the resulting predicates to the
//!    pagination sink.
//! 3. [`YummySearch::helper_data`] returns what a view needs to draw the
//!    search form: operators, searchable fields, and the rows just submitted.
//!
//! ## Quick Start
//!
//! ```
//! use yummy_search::prelude::*;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     model = "Orders"
//!
//!     [rules.allow]
//!     Orders = ["status", "total"]
//! "#).unwrap();
//!
//! let mut search = YummySearch::builder()
//!     .config(config)
//!     .paginator(ConditionSet::new())
//!     .build()
//!     .unwrap();
//!
//! let query = "YummySearch[field][]=Orders.status\
//!     &YummySearch[operator][]=matching\
//!     &YummySearch[search][]=paid";
//! search.search(query).unwrap();
//!
//! let sql = search.paginator().to_postgres(1);
//! assert_eq!(sql.sql, "Orders.status = $1");
//! assert_eq!(sql.params, vec!["paid"]);
//! ```
//!
//! ## Query Parameters
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `YummySearch[field][]` | `Entity.column` of each row |
//! | `YummySearch[operator][]` | Operator wire name of each row |
//! | `YummySearch[search][]` | Search value of each row |
//! | `YummySearch_clear` | Present with any value: ignore the search |
//!
//! Both names are configurable through [`ParamNames`].
//!
//! ## Environment
//!
//! See [`constants`] for `YUMMY_MAX_CRITERIA`, `YUMMY_MAX_VALUE_LEN` and
//! `YUMMY_LOG`.

pub mod config;
pub mod constants;
pub mod error;
pub mod log;
mod request;
mod search;

pub use config::{OperatorLabels, ParamNames, SearchConfig};
pub use error::{ConfigurationError, RequestError, SearchError};
pub use request::SearchRequest;
pub use search::{HelperData, SearchOutcome, YummySearch, YummySearchBuilder};

pub use yummy_sql;

/// Prelude module for convenient imports.
///
/// ```
/// use yummy_search::prelude::*;
/// let config = SearchConfig::new("Orders");
/// assert_eq!(config.primary_entity().unwrap(), EntityName::new("orders"));
/// ```
pub mod prelude {
    pub use crate::{
        ConfigurationError, HelperData, OperatorLabels, ParamNames, RequestError, SearchConfig,
        SearchError, SearchOutcome, SearchRequest, YummySearch,
    };
    pub use yummy_sql::prelude::*;
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
