//! Tagged argument values and error-object normalization
//!
//! Every argument handed to a log call is classified into an explicit
//! [`LogValue`] variant before the record is built. Error-like values are
//! snapshotted eagerly into [`ErrorInfo`] at that point: the original may
//! be mutated or dropped long before an asynchronous watcher reads the
//! record.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A loggable argument, classified by the formatter's predicate.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Error(ErrorInfo),
    Other(serde_json::Value),
}

impl LogValue {
    /// Classify an arbitrary error into an eager snapshot.
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        LogValue::Error(ErrorInfo::from_error(err))
    }

    /// Whether this value is a plain string (and thus a `%s` template
    /// candidate when it appears first in an argument list).
    pub fn is_str(&self) -> bool {
        matches!(self, LogValue::Str(_))
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            super::format::display_value(self, super::format::InspectMode::Human)
        )
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_string())
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Int(i)
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::Int(i64::from(i))
    }
}

impl From<u32> for LogValue {
    fn from(i: u32) -> Self {
        LogValue::Int(i64::from(i))
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Float(f)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<ErrorInfo> for LogValue {
    fn from(e: ErrorInfo) -> Self {
        LogValue::Error(e)
    }
}

impl From<serde_json::Value> for LogValue {
    /// Classifies a dynamic value. An object carrying both `message` and
    /// `stack` string fields is treated as an error even when it is not
    /// one; the heuristic is part of the contract.
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::String(s) => LogValue::Str(s),
            Value::Bool(b) => LogValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    LogValue::Int(i)
                } else {
                    LogValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::Object(map) if looks_like_error(&map) => {
                LogValue::Error(ErrorInfo::from_object(map))
            }
            other => LogValue::Other(other),
        }
    }
}

fn looks_like_error(map: &serde_json::Map<String, serde_json::Value>) -> bool {
    map.get("message").is_some_and(|v| v.is_string())
        && map.get("stack").is_some_and(|v| v.is_string())
}

/// Plain snapshot of an error-like value.
///
/// Captured at record-construction time so the record stays valid even if
/// the source error is mutated or freed before a watcher consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub message: String,
    pub stack: String,
    /// Remaining enumerable fields carried by the source object.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ErrorInfo {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: None,
            message: message.into(),
            stack: stack.into(),
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Snapshot a native error. The `source()` chain stands in for the
    /// stack-trace text.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut stack = String::new();
        let mut source = err.source();
        while let Some(cause) = source {
            if !stack.is_empty() {
                stack.push('\n');
            }
            stack.push_str("caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::new("ERROR", err.to_string(), stack)
    }

    /// Snapshot a dynamic object that passed the message+stack predicate.
    fn from_object(mut map: serde_json::Map<String, serde_json::Value>) -> Self {
        let name = match map.remove("name") {
            Some(serde_json::Value::String(s)) => s,
            _ => "ERROR".to_string(),
        };
        let kind = match map.remove("type") {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        };
        let message = match map.remove("message") {
            Some(serde_json::Value::String(s)) => s,
            _ => String::new(),
        };
        let stack = match map.remove("stack") {
            Some(serde_json::Value::String(s)) => s,
            _ => String::new(),
        };
        Self {
            name,
            kind,
            message,
            stack,
            extra: map.into_iter().collect(),
        }
    }
}
