//! Console watcher implementation

use crate::core::{LogLevel, LogRecord, Watcher};
use colored::Colorize;
use std::sync::Arc;

/// A watcher that writes formatted records to the terminal.
///
/// Records at SEVERE go to stderr, everything else to stdout. Colors are
/// keyed off the record level and can be stripped for non-terminal
/// output.
pub struct ConsoleWatcher {
    use_colors: bool,
}

impl ConsoleWatcher {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format a record for console printing:
    /// `<timestamp> [<name>;<meta>] : <message>`.
    pub fn format_record(&self, record: &LogRecord) -> String {
        let timestamp = record.timestamp.format("%Y/%m/%d %H:%M:%S%.3f").to_string();

        let scope = if record.logger_name.is_empty() {
            String::new()
        } else if record.metadata.is_empty() {
            format!(" [{}]", record.logger_name)
        } else {
            format!(" [{};{}]", record.logger_name, record.formatted_meta())
        };

        if self.use_colors {
            format!(
                "{}{} : {}",
                timestamp.bright_black(),
                scope.bright_black(),
                record.message.color(record.level.color_code())
            )
        } else {
            format!("{}{} : {}", timestamp, scope, record.message)
        }
    }

    /// Consume the sink into a registerable watcher function.
    pub fn into_watcher(self) -> Watcher {
        Arc::new(move |record: &LogRecord| {
            let line = self.format_record(record);
            if record.level >= LogLevel::Severe {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        })
    }
}

impl Default for ConsoleWatcher {
    fn default() -> Self {
        Self::new()
    }
}
