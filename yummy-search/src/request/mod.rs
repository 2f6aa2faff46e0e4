//! Submitted search requests.
//!
//! A [`SearchRequest`] is what the component sees of the incoming query
//! string: no search, a cleared search, or a list of raw criteria.
//!
//! ```
//! use yummy_search::{ParamNames, SearchRequest};
//!
//! let query = "YummySearch[field][]=Orders.status\
//!     &YummySearch[operator][]=matching\
//!     &YummySearch[search][]=paid";
//! let request = SearchRequest::from_query(query, &ParamNames::default()).unwrap();
//! assert_eq!(request.criteria().len(), 1);
//!
//! let cleared = SearchRequest::from_query(
//!     &format!("{query}&YummySearch_clear=1"),
//!     &ParamNames::default(),
//! )
//! .unwrap();
//! assert_eq!(cleared, SearchRequest::Cleared);
//! ```

mod parsing;

use crate::config::ParamNames;
use crate::constants::{max_criteria, max_value_len};
use crate::error::RequestError;
use parsing::{KeyMatch, ListBuilder, ListKind, classify};
use yummy_sql::SearchCriterion;

/// Search state carried by one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// No search parameter present.
    Absent,
    /// The clear parameter was present; any submitted rows are ignored.
    Cleared,
    /// Rows in submission order. May be empty.
    Submitted(Vec<SearchCriterion>),
}

impl SearchRequest {
    /// Parse a URL query string, with or without the leading `?`.
    ///
    /// Only key presence counts: an empty `YummySearch=` is a submitted
    /// search with no rows, and an empty `YummySearch_clear=` still clears.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] when the string cannot be decoded, the
    /// three lists differ in length, indexes are mixed or non-contiguous,
    /// or a request limit is exceeded. A cleared request never errors on
    /// its rows.
    pub fn from_query(query: &str, names: &ParamNames) -> Result<Self, RequestError> {
        parse_query(query, names).inspect_err(|e| {
            crate::log!(warn, "search request rejected", reason: e);
        })
    }

    /// Build a request from lists that were already split by a framework.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::LengthMismatch`] when the lists differ in
    /// length, [`RequestError::TooManyCriteria`] or
    /// [`RequestError::ValueTooLong`] when a limit is exceeded.
    pub fn from_parts(
        fields: Vec<String>,
        operators: Vec<String>,
        searches: Vec<String>,
        cleared: bool,
    ) -> Result<Self, RequestError> {
        if cleared {
            return Ok(Self::Cleared);
        }
        if fields.len() != operators.len() || fields.len() != searches.len() {
            return Err(RequestError::LengthMismatch {
                fields: fields.len(),
                operators: operators.len(),
                searches: searches.len(),
            });
        }

        let max = max_criteria();
        if fields.len() > max {
            return Err(RequestError::TooManyCriteria {
                count: fields.len(),
                max,
            });
        }
        let max_len = max_value_len();
        if let Some(index) = searches.iter().position(|v| v.len() > max_len) {
            return Err(RequestError::ValueTooLong {
                index,
                max: max_len,
            });
        }

        let criteria = fields
            .into_iter()
            .zip(operators)
            .zip(searches)
            .map(|((field, operator), value)| SearchCriterion {
                field,
                operator,
                value,
            })
            .collect();
        Ok(Self::Submitted(criteria))
    }

    /// Submitted rows; empty unless [`SearchRequest::Submitted`].
    #[must_use]
    pub fn criteria(&self) -> &[SearchCriterion] {
        match self {
            Self::Submitted(criteria) => criteria,
            Self::Absent | Self::Cleared => &[],
        }
    }

    /// Whether a search should be performed.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

fn parse_query(query: &str, names: &ParamNames) -> Result<SearchRequest, RequestError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).map_err(|e| RequestError::InvalidQuery {
            message: e.to_string(),
        })?;

    let mut present = false;
    let mut fields = ListBuilder::default();
    let mut operators = ListBuilder::default();
    let mut searches = ListBuilder::default();

    for (key, value) in pairs {
        if key == names.clear {
            return Ok(SearchRequest::Cleared);
        }
        match classify(&key, &names.search) {
            KeyMatch::Foreign => {},
            KeyMatch::Bare | KeyMatch::Ignored => present = true,
            KeyMatch::Row(list, slot) => {
                present = true;
                let target = match list {
                    ListKind::Field => &mut fields,
                    ListKind::Operator => &mut operators,
                    ListKind::Search => &mut searches,
                };
                target.push(slot, value);
            },
        }
    }

    if !present {
        return Ok(SearchRequest::Absent);
    }
    SearchRequest::from_parts(
        fields.finish(ListKind::Field)?,
        operators.finish(ListKind::Operator)?,
        searches.finish(ListKind::Search)?,
        false,
    )
}

#[cfg(test)]
mod tests;
