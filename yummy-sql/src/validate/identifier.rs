//! Identifier validation for entity names taken from user input, and
//! quoting for names rendered into SQL.

use std::borrow::Cow;
use std::fmt;

/// Maximum length for SQL identifiers (`PostgreSQL` limit is 63).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Error returned when an entity, column or field key fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentifierError {
    /// The identifier is empty, too long or contains characters outside
    /// `[A-Za-z0-9_]` (or starts with a digit).
    Invalid {
        /// What was being validated (`"entity"`, `"column"`).
        context: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A field key was not of the form `Entity.column`.
    MissingSeparator {
        /// The rejected input.
        value: String,
    },
    /// A field key had nothing after the separator.
    EmptyColumn {
        /// The rejected input.
        value: String,
    },
}

impl IdentifierError {
    pub(crate) fn invalid(context: &'static str, value: &str) -> Self {
        Self::Invalid {
            context,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { context, value } => write!(
                f,
                "invalid {context} name `{value}`: must start with letter/underscore, \
                 contain only ASCII alphanumeric/underscore, and be 1-{MAX_IDENTIFIER_LENGTH} chars"
            ),
            Self::MissingSeparator { value } => {
                write!(f, "field `{value}` is not of the form `Entity.column`")
            },
            Self::EmptyColumn { value } => write!(f, "field `{value}` has an empty column name"),
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Check whether a string is a safe SQL identifier.
///
/// A valid identifier starts with an ASCII letter or underscore, continues
/// with ASCII letters, digits or underscores, and is 1-63 bytes long.
///
/// ```
/// use yummy_sql::is_valid_identifier;
///
/// assert!(is_valid_identifier("order_items"));
/// assert!(is_valid_identifier("_private"));
///
/// assert!(!is_valid_identifier(""));
/// assert!(!is_valid_identifier("1st"));
/// assert!(!is_valid_identifier("status; DROP"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate an identifier, naming the `context` in the error.
pub(crate) fn check_identifier(s: &str, context: &'static str) -> Result<(), IdentifierError> {
    if is_valid_identifier(s) {
        Ok(())
    } else {
        Err(IdentifierError::invalid(context, s))
    }
}

/// Render a name for SQL: plain identifiers as-is, anything else wrapped in
/// double quotes with embedded quotes doubled.
///
/// Both Postgres and `SQLite` read `"..."` as a quoted identifier.
pub(crate) fn quote_identifier(name: &str) -> Cow<'_, str> {
    if is_valid_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("orders"));
        assert!(is_valid_identifier("Orders"));
        assert!(is_valid_identifier("created_at"));
        assert!(is_valid_identifier("_"));
        assert!(is_valid_identifier("Table123"));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("123abc"));
        assert!(!is_valid_identifier("order-items"));
        assert!(!is_valid_identifier("orders.status"));
        assert!(!is_valid_identifier("status "));
        assert!(!is_valid_identifier("status'"));
        assert!(!is_valid_identifier("status--"));
        assert!(!is_valid_identifier("1 OR 1=1"));
        assert!(!is_valid_identifier("stätus"));
    }

    #[test]
    fn test_identifier_length_limit() {
        assert!(is_valid_identifier(&"a".repeat(63)));
        assert!(!is_valid_identifier(&"a".repeat(64)));
    }

    #[test]
    fn test_check_identifier_names_context() {
        let err = check_identifier("bad name", "column").unwrap_err();
        assert_eq!(err, IdentifierError::invalid("column", "bad name"));
        assert!(err.to_string().starts_with("invalid column name `bad name`"));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("created_at"), "created_at");
        assert_eq!(quote_identifier("order-date"), "\"order-date\"");
        assert_eq!(quote_identifier("prénom"), "\"prénom\"");
        assert_eq!(quote_identifier(&"a".repeat(64)), format!("\"{}\"", "a".repeat(64)));
        assert_eq!(quote_identifier("x\" OR 1=1 --"), "\"x\"\" OR 1=1 --\"");
    }
}
