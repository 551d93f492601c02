//! Log record structure

use super::format;
use super::log_level::LogLevel;
use super::log_value::LogValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Immutable snapshot of one log event.
///
/// Produced exactly once per log call and handed to every watcher that
/// receives it; fully self-contained so it stays meaningful long after the
/// emitting logger has moved on. The message is computed once at
/// construction from the already-normalized arguments.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub logger_name: String,
    pub metadata: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
    pub raw_args: Vec<LogValue>,
    pub message: String,
}

impl LogRecord {
    pub fn new(
        level: LogLevel,
        logger_name: impl Into<String>,
        metadata: BTreeMap<String, String>,
        raw_args: Vec<LogValue>,
    ) -> Self {
        let message = format::format_message(&raw_args);
        Self {
            level,
            logger_name: logger_name.into(),
            metadata,
            timestamp: Utc::now(),
            raw_args,
            message,
        }
    }

    /// Metadata rendered as `key=value` pairs for sink output.
    pub fn formatted_meta(&self) -> String {
        self.metadata
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
