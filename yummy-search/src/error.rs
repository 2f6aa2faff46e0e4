//! Error types surfaced by the search component.

use std::fmt;
use yummy_sql::SchemaLookupError;

/// Setup fault: the component cannot run at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// No pagination sink was supplied to the builder.
    MissingPaginator,
    /// No primary model was configured.
    MissingModel,
    /// The configured primary model is not a valid identifier.
    InvalidModel {
        /// The configured value.
        model: String,
    },
    /// The configuration file could not be parsed.
    Toml {
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPaginator => f.write_str("search requires a pagination sink"),
            Self::MissingModel => f.write_str("search requires a primary model"),
            Self::InvalidModel { model } => write!(f, "invalid primary model `{model}`"),
            Self::Toml { message } => write!(f, "invalid search configuration: {message}"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// The client broke the request contract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    /// The query string is not valid `application/x-www-form-urlencoded`.
    InvalidQuery {
        /// Decoder message.
        message: String,
    },
    /// `field[]`, `operator[]` and `search[]` differ in length.
    LengthMismatch {
        /// Number of fields.
        fields: usize,
        /// Number of operators.
        operators: usize,
        /// Number of search values.
        searches: usize,
    },
    /// Indexed keys (`[0]`, `[1]`) were mixed with `[]`, repeated, or left gaps.
    InvalidIndex {
        /// The list the bad key belongs to.
        list: &'static str,
    },
    /// More rows than the configured maximum.
    TooManyCriteria {
        /// Rows submitted.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A search value exceeds the configured maximum length.
    ValueTooLong {
        /// Row index.
        index: usize,
        /// Configured maximum in bytes.
        max: usize,
    },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuery { message } => write!(f, "invalid query string: {message}"),
            Self::LengthMismatch {
                fields,
                operators,
                searches,
            } => write!(
                f,
                "search lists differ in length: {fields} field(s), {operators} operator(s), {searches} value(s)"
            ),
            Self::InvalidIndex { list } => write!(f, "invalid indexes in `{list}` list"),
            Self::TooManyCriteria { count, max } => {
                write!(f, "{count} search rows submitted, at most {max} allowed")
            },
            Self::ValueTooLong { index, max } => {
                write!(f, "search value in row {index} exceeds {max} bytes")
            },
        }
    }
}

impl std::error::Error for RequestError {}

/// Top-level error for search operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    /// Component setup is incomplete or invalid.
    Configuration(ConfigurationError),
    /// The schema does not know an entity.
    SchemaLookup(SchemaLookupError),
    /// The submitted search violates the request contract.
    MalformedRequest(RequestError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::SchemaLookup(e) => write!(f, "schema lookup failed: {e}"),
            Self::MalformedRequest(e) => write!(f, "malformed search request: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::SchemaLookup(e) => Some(e),
            Self::MalformedRequest(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for SearchError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<SchemaLookupError> for SearchError {
    fn from(e: SchemaLookupError) -> Self {
        Self::SchemaLookup(e)
    }
}

impl From<RequestError> for SearchError {
    fn from(e: RequestError) -> Self {
        Self::MalformedRequest(e)
    }
}
