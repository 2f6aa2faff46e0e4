//! Centralized limits and defaults.
//!
//! # Environment Variables
//!
//! Some limits can be configured via environment variables:
//!
//! | Variable              | Default | Description                              |
//! |-----------------------|---------|------------------------------------------|
//! | `YUMMY_MAX_CRITERIA`  | 50      | Maximum filter rows in one search        |
//! | `YUMMY_MAX_VALUE_LEN` | 1024    | Maximum length of one search value       |
//! | `YUMMY_LOG`           | `info`  | Minimum log level written to stderr      |
//!
//! Values are read on first use and cached for the lifetime of the process.

use crate::log::Level;
use std::sync::OnceLock;

// ============================================================================
// REQUEST PARAMETERS
// ============================================================================

/// Default query parameter carrying the search rows.
pub const DEFAULT_SEARCH_PARAM: &str = "YummySearch";

/// Default query parameter that discards the search.
pub const DEFAULT_CLEAR_PARAM: &str = "YummySearch_clear";

// ============================================================================
// REQUEST LIMITS
// ============================================================================

const DEFAULT_MAX_CRITERIA: usize = 50;
const DEFAULT_MAX_VALUE_LEN: usize = 1024;

static MAX_CRITERIA_CACHE: OnceLock<usize> = OnceLock::new();
static MAX_VALUE_LEN_CACHE: OnceLock<usize> = OnceLock::new();
static LOG_LEVEL_CACHE: OnceLock<Level> = OnceLock::new();

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Maximum number of filter rows accepted in one request.
///
/// Reads `YUMMY_MAX_CRITERIA` on first call, defaulting to 50.
#[inline]
pub fn max_criteria() -> usize {
    *MAX_CRITERIA_CACHE.get_or_init(|| env_usize("YUMMY_MAX_CRITERIA", DEFAULT_MAX_CRITERIA))
}

/// Maximum length in bytes of a single search value.
///
/// Reads `YUMMY_MAX_VALUE_LEN` on first call, defaulting to 1024.
#[inline]
pub fn max_value_len() -> usize {
    *MAX_VALUE_LEN_CACHE.get_or_init(|| env_usize("YUMMY_MAX_VALUE_LEN", DEFAULT_MAX_VALUE_LEN))
}

/// Minimum level written by [`log!`](crate::log!).
///
/// Reads `YUMMY_LOG` on first call; unknown values fall back to `info`.
#[inline]
pub fn log_level() -> Level {
    *LOG_LEVEL_CACHE.get_or_init(|| {
        std::env::var("YUMMY_LOG")
            .ok()
            .and_then(|v| Level::parse(&v))
            .unwrap_or(Level::Info)
    })
}
