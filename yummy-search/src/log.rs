//! Structured JSON logging to stderr.
//!
//! Each line is a JSON object with `level`, `msg`, any extra key-value
//! fields, and a `ts` UTC timestamp with millisecond precision:
//!
//! ```json
//! {"level":"debug","msg":"criterion dropped","field":"Orders.secret","reason":"denied","ts":"2025-01-16T10:30:00.000Z"}
//! ```
//!
//! # Usage
//!
//! ```no_run
//! # use yummy_search::log;
//! let entity = "Orders";
//! log!(info, "search applied", entity: entity, predicates: 2);
//! log!(warn, "search request rejected");
//! ```
//!
//! Lines below the level configured with `YUMMY_LOG` are skipped before any
//! field is formatted.

use chrono::{SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;

/// Log severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    Info,
    /// Unexpected but handled.
    Warn,
    /// Operation failed.
    Error,
}

impl Level {
    /// Parse `debug`, `info`, `warn` or `error` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Lowercase name written in the `level` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Whether lines at this level are written.
    #[must_use]
    pub fn enabled(self) -> bool {
        self >= crate::constants::log_level()
    }
}

struct LogLine<'a> {
    level: Level,
    msg: &'a str,
    fields: &'a [(&'a str, String)],
    ts: &'a str,
}

impl Serialize for LogLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 3))?;
        map.serialize_entry("level", self.level.as_str())?;
        map.serialize_entry("msg", self.msg)?;
        for (key, value) in self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("ts", self.ts)?;
        map.end()
    }
}

fn render(level: Level, msg: &str, fields: &[(&str, String)], ts: &str) -> String {
    let line = LogLine {
        level,
        msg,
        fields,
        ts,
    };
    serde_json::to_string(&line).unwrap_or_default()
}

/// Build a structured JSON log line stamped with the current time.
#[doc(hidden)]
#[must_use]
pub fn __build_structured_log(level: Level, msg: &str, fields: &[(&str, String)]) -> String {
    let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    render(level, msg, fields, &ts)
}

/// Write a structured line to stderr.
#[doc(hidden)]
pub fn __emit(level: Level, msg: &str, fields: &[(&str, String)]) {
    let line = __build_structured_log(level, msg, fields);
    let _ = writeln!(std::io::stderr(), "{line}");
}

/// Structured logging macro with key-value pairs.
///
/// The level is one of `debug`, `info`, `warn`, `error`. Values are
/// formatted with `Display`.
///
/// ```no_run
/// # use yummy_search::log;
/// log!(debug, "criterion dropped", field: "Orders.secret", reason: "denied");
/// log!(info, "search applied");
/// ```
#[macro_export]
macro_rules! log {
    ($level:ident, $msg:expr $(, $key:ident : $value:expr)* $(,)?) => {{
        let level = $crate::log::Level::parse(stringify!($level))
            .unwrap_or($crate::log::Level::Info);
        if level.enabled() {
            let fields: &[(&str, String)] = &[
                $( (stringify!($key), format!("{}", $value)) ),*
            ];
            $crate::log::__emit(level, $msg, fields);
        }
    }};
}
