//! The search component.

use crate::config::{OperatorLabels, SearchConfig};
use crate::error::{ConfigurationError, SearchError};
use crate::request::SearchRequest;
use serde::Serialize;
use yummy_sql::{
    ConditionCompiler, DroppedCriterion, EntityName, FieldCatalog, PaginationSink,
    SchemaProvider, SearchCriterion,
};

/// Result of [`YummySearch::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No search parameter, or the clear parameter was present. The
    /// pagination sink was not touched.
    NotPerformed,
    /// Criteria were compiled and appended.
    Applied {
        /// Number of predicates appended to the sink.
        appended: usize,
        /// Rows skipped by the compiler, in submission order.
        dropped: Vec<DroppedCriterion>,
    },
}

impl SearchOutcome {
    /// Whether a search was requested.
    #[must_use]
    pub const fn is_performed(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Number of predicates appended.
    #[must_use]
    pub const fn appended(&self) -> usize {
        match self {
            Self::NotPerformed => 0,
            Self::Applied { appended, .. } => *appended,
        }
    }
}

/// Data a view needs to render the search form.
///
/// Serializes as:
///
/// ```json
/// {
///   "base_url": "/orders",
///   "rows": [{"field": "Orders.status", "operator": "matching", "value": "paid"}],
///   "operators": {"containing": "Containing", "matching": "Exact Match"},
///   "models": {"Orders": {"Orders.status": "Status"}}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelperData {
    /// Path the form submits to.
    pub base_url: String,
    /// Rows submitted with the current request, for re-filling the form.
    pub rows: Vec<SearchCriterion>,
    /// Offered operators and their labels.
    pub operators: OperatorLabels,
    /// Searchable fields grouped by entity.
    pub models: FieldCatalog,
}

/// Search filter component bound to one list view.
///
/// # Example
///
/// ```
/// use yummy_search::prelude::*;
///
/// let config = SearchConfig::new("Orders")
///     .with_rules(AllowDenyConfig::new().allow("Orders", &["status", "total"]));
/// let mut search = YummySearch::builder()
///     .config(config)
///     .paginator(ConditionSet::new())
///     .build()
///     .unwrap();
///
/// let outcome = search
///     .search("YummySearch[field][]=Orders.total&YummySearch[operator][]=greater_than&YummySearch[search][]=100")
///     .unwrap();
/// assert_eq!(outcome.appended(), 1);
/// assert_eq!(search.paginator().to_postgres(1).sql, "Orders.total > $1");
/// ```
#[derive(Debug, Clone)]
pub struct YummySearch<P> {
    primary: EntityName,
    config: SearchConfig,
    paginator: P,
}

impl<P: PaginationSink> YummySearch<P> {
    /// Start building a component.
    #[must_use]
    pub const fn builder() -> YummySearchBuilder<P> {
        YummySearchBuilder {
            config: None,
            paginator: None,
        }
    }

    /// Apply the search carried by a URL query string.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedRequest`] when the query breaks the
    /// request contract. Denied fields and unknown operators are skipped,
    /// not reported as errors.
    pub fn search(&mut self, query: &str) -> Result<SearchOutcome, SearchError> {
        let request = SearchRequest::from_query(query, &self.config.params)?;
        Ok(self.search_request(&request))
    }

    /// Apply an already parsed request.
    pub fn search_request(&mut self, request: &SearchRequest) -> SearchOutcome {
        let SearchRequest::Submitted(criteria) = request else {
            return SearchOutcome::NotPerformed;
        };

        let compilation = ConditionCompiler::new(&self.config.rules).compile_with_report(criteria);
        for dropped in &compilation.dropped {
            crate::log!(
                debug,
                "criterion dropped",
                index: dropped.index,
                field: dropped.field,
                reason: dropped.reason
            );
        }

        let appended = compilation.predicates.len();
        self.paginator.append_conditions(compilation.predicates);
        crate::log!(
            debug,
            "search applied",
            entity: self.primary,
            appended: appended,
            dropped: compilation.dropped.len()
        );

        SearchOutcome::Applied {
            appended,
            dropped: compilation.dropped,
        }
    }

    /// Searchable fields of the primary entity and its single-valued relations.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::SchemaLookup`] when the schema does not know
    /// the primary entity.
    pub fn catalog<S>(&self, schema: &S) -> Result<FieldCatalog, SearchError>
    where
        S: SchemaProvider + ?Sized,
    {
        Ok(FieldCatalog::build(&self.primary, schema, &self.config.rules)?)
    }

    /// Everything a view needs to render the search form for this request.
    ///
    /// Rows are empty unless the request carries an uncleared search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedRequest`] for a malformed query and
    /// [`SearchError::SchemaLookup`] when the schema lookup fails.
    pub fn helper_data<S>(
        &self,
        schema: &S,
        base_url: &str,
        query: &str,
    ) -> Result<HelperData, SearchError>
    where
        S: SchemaProvider + ?Sized,
    {
        let request = SearchRequest::from_query(query, &self.config.params)?;
        Ok(HelperData {
            base_url: base_url.to_string(),
            rows: request.criteria().to_vec(),
            operators: self.config.operators.clone(),
            models: self.catalog(schema)?,
        })
    }

    /// Canonical primary entity.
    #[must_use]
    pub const fn primary(&self) -> &EntityName {
        &self.primary
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The pagination sink.
    #[must_use]
    pub const fn paginator(&self) -> &P {
        &self.paginator
    }

    /// Mutable access to the pagination sink.
    pub const fn paginator_mut(&mut self) -> &mut P {
        &mut self.paginator
    }

    /// Give the pagination sink back.
    #[must_use]
    pub fn into_paginator(self) -> P {
        self.paginator
    }
}

/// Builder for [`YummySearch`].
#[derive(Debug, Clone)]
#[must_use = "builder does nothing until .build() is called"]
pub struct YummySearchBuilder<P> {
    config: Option<SearchConfig>,
    paginator: Option<P>,
}

impl<P: PaginationSink> YummySearchBuilder<P> {
    /// Set the configuration.
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the pagination sink predicates are appended to.
    pub fn paginator(mut self, paginator: P) -> Self {
        self.paginator = Some(paginator);
        self
    }

    /// Build the component.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingPaginator`] without a sink,
    /// [`ConfigurationError::MissingModel`] or
    /// [`ConfigurationError::InvalidModel`] without a usable primary model.
    pub fn build(self) -> Result<YummySearch<P>, SearchError> {
        let paginator = self.paginator.ok_or(ConfigurationError::MissingPaginator)?;
        let config = self.config.ok_or(ConfigurationError::MissingModel)?;
        let primary = config.primary_entity()?;
        Ok(YummySearch {
            primary,
            config,
            paginator,
        })
    }
}
