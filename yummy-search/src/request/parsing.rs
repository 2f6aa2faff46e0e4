//! Bracketed query key parsing.
//!
//! Search rows arrive as three parallel lists:
//!
//! ```text
//! YummySearch[field][]=Orders.status&YummySearch[operator][]=matching&YummySearch[search][]=paid
//! ```
//!
//! Explicit indexes (`[0]`, `[1]`) are accepted in place of `[]`, but a
//! list must use one style throughout and its indexes must run `0..n`.

use crate::error::RequestError;

/// One of the three parallel row lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ListKind {
    Field,
    Operator,
    Search,
}

impl ListKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "field" => Some(Self::Field),
            "operator" => Some(Self::Operator),
            "search" => Some(Self::Search),
            _ => None,
        }
    }

    pub(super) const fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Operator => "operator",
            Self::Search => "search",
        }
    }
}

/// Position a value takes in its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Slot {
    /// `[]` or no trailing brackets.
    Append,
    /// `[n]`.
    Index(usize),
}

/// What a query key means to the search component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyMatch {
    /// Belongs to something else.
    Foreign,
    /// `<search>` on its own.
    Bare,
    /// `<search>[...]` with an unrecognised shape; marks the search present.
    Ignored,
    /// A value for one of the row lists.
    Row(ListKind, Slot),
}

/// Classify `key` against the configured search parameter.
pub(super) fn classify(key: &str, search_param: &str) -> KeyMatch {
    let Some(rest) = key.strip_prefix(search_param) else {
        return KeyMatch::Foreign;
    };
    if rest.is_empty() {
        return KeyMatch::Bare;
    }
    let Some(rest) = rest.strip_prefix('[') else {
        return KeyMatch::Foreign;
    };
    let Some((name, rest)) = rest.split_once(']') else {
        return KeyMatch::Ignored;
    };
    let Some(list) = ListKind::from_name(name) else {
        return KeyMatch::Ignored;
    };

    match rest {
        "" | "[]" => KeyMatch::Row(list, Slot::Append),
        _ => rest
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .and_then(parse_index)
            .map_or(KeyMatch::Ignored, |i| KeyMatch::Row(list, Slot::Index(i))),
    }
}

fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Accumulates the values of one row list.
#[derive(Debug, Default)]
pub(super) struct ListBuilder {
    appended: Vec<String>,
    indexed: Vec<(usize, String)>,
}

impl ListBuilder {
    pub(super) fn push(&mut self, slot: Slot, value: String) {
        match slot {
            Slot::Append => self.appended.push(value),
            Slot::Index(i) => self.indexed.push((i, value)),
        }
    }

    /// Values in row order.
    pub(super) fn finish(mut self, list: ListKind) -> Result<Vec<String>, RequestError> {
        if self.indexed.is_empty() {
            return Ok(self.appended);
        }
        let invalid = RequestError::InvalidIndex {
            list: list.as_str(),
        };
        if !self.appended.is_empty() {
            return Err(invalid);
        }

        self.indexed.sort_by_key(|(i, _)| *i);
        // Gaps and duplicates both break the 0..n sequence
        if self.indexed.iter().enumerate().any(|(pos, (i, _))| pos != *i) {
            return Err(invalid);
        }
        Ok(self.indexed.into_iter().map(|(_, v)| v).collect())
    }
}
