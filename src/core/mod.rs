//! Core logging types

pub mod broadcaster;
pub mod error;
pub mod format;
pub mod log_level;
pub mod log_record;
pub mod log_value;
pub mod logger;

pub use broadcaster::{Broadcaster, Channel, Watcher};
pub use error::{HierlogError, Result};
pub use format::{display_value, format_message, format_message_with, InspectMode};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use log_value::{ErrorInfo, LogValue};
pub use logger::Logger;
