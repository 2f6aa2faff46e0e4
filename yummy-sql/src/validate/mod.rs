//! Validation of identifiers that arrive from user input.
//!
//! Field keys submitted with a search request are split into an entity and
//! a column name. The entity must be a plain SQL identifier; the column is
//! only required to be non-empty, since schemas may use any name. Names that
//! are not plain identifiers are quoted when a condition is rendered.

mod identifier;

pub use identifier::{IdentifierError, is_valid_identifier};
pub(crate) use identifier::{check_identifier, quote_identifier};
