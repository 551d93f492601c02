//! Message formatting
//!
//! Pure functions turning an ordered argument list into the single message
//! string carried by a record. No dependency on the logger tree; the
//! formatter can be exercised entirely on its own.

use super::log_value::{ErrorInfo, LogValue};

/// Rendering mode for values without a scalar display form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InspectMode {
    /// Readable structural rendering for console consumption.
    #[default]
    Human,
    /// JSON serialization for machine consumption.
    Json,
}

/// Convert a single argument to its display form.
pub fn display_value(value: &LogValue, mode: InspectMode) -> String {
    match value {
        LogValue::Int(i) => i.to_string(),
        LogValue::Float(f) => f.to_string(),
        LogValue::Str(s) => s.clone(),
        LogValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        LogValue::Error(info) => display_error(info),
        LogValue::Other(v) => match mode {
            InspectMode::Human => inspect(v),
            InspectMode::Json => serde_json::to_string(v).unwrap_or_else(|_| "null".to_string()),
        },
    }
}

/// Build the message string for an argument list using [`InspectMode::Human`].
pub fn format_message(args: &[LogValue]) -> String {
    format_message_with(InspectMode::Human, args)
}

/// Build the message string for an argument list.
///
/// When the first converted argument is a string it acts as a template:
/// each `%s` token consumes the next unused argument left to right, and
/// any leftover arguments are appended space-separated. A `%s` with no
/// argument left renders literally. A non-string first argument disables
/// templating and every argument is joined with a single space.
pub fn format_message_with(mode: InspectMode, args: &[LogValue]) -> String {
    let rendered: Vec<String> = args.iter().map(|a| display_value(a, mode)).collect();

    let Some(LogValue::Str(template)) = args.first() else {
        return rendered.join(" ");
    };

    let mut out = String::with_capacity(template.len());
    let mut next = 1;
    let mut rest = template.as_str();
    while let Some(pos) = rest.find("%s") {
        out.push_str(&rest[..pos]);
        if next < rendered.len() {
            out.push_str(&rendered[next]);
            next += 1;
        } else {
            out.push_str("%s");
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);

    for leftover in &rendered[next.min(rendered.len())..] {
        out.push(' ');
        out.push_str(leftover);
    }
    out
}

/// `[<name>(<space><kind> if present)] <message>` followed by the stack
/// text on its own lines.
fn display_error(info: &ErrorInfo) -> String {
    let mut out = String::from("[");
    out.push_str(&info.name);
    if let Some(kind) = &info.kind {
        out.push(' ');
        out.push_str(kind);
    }
    out.push_str("] ");
    out.push_str(&info.message);
    if !info.stack.is_empty() {
        out.push('\n');
        out.push_str(&info.stack);
    }
    out
}

/// Readable rendering of a dynamic value: strings quoted inside
/// containers, arrays as `[ a, b ]`, objects as `{ key: value }`.
fn inspect(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s),
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            let inner: Vec<String> = items.iter().map(inspect).collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, inspect(v)))
                .collect();
            format!("{{ {} }}", inner.join(", "))
        }
    }
}
