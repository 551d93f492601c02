//! # Hierlog
//!
//! A hierarchical logging core: loggers are bound to dotted namespaces,
//! levels are inherited down the namespace tree, and records bubble up to
//! watchers subscribed by channel.
//!
//! ## Features
//!
//! - **Level Inheritance**: unset loggers defer to the nearest ancestor
//!   with an explicit level, with an implicit INFO default at the root
//! - **Channel Watchers**: subscribe to everything, to an exact level, or
//!   to a namespace subtree
//! - **Thread Safe**: synchronous, deterministic dispatch from any thread
//! - **Self-Contained Records**: arguments are normalized and formatted
//!   when the record is built, not when it is consumed

pub mod core;
pub mod macros;
pub mod registry;
pub mod watchers;

pub mod prelude {
    pub use crate::core::{
        Broadcaster, Channel, ErrorInfo, HierlogError, InspectMode, LogLevel, LogRecord, LogValue,
        Logger, Result, Watcher,
    };
    pub use crate::registry::LogRegistry;
    #[cfg(feature = "console")]
    pub use crate::watchers::ConsoleWatcher;
    pub use crate::watchers::{AsyncDispatch, DEFAULT_SHUTDOWN_TIMEOUT};
}

pub use crate::core::{
    display_value, format_message, format_message_with, Broadcaster, Channel, ErrorInfo,
    HierlogError, InspectMode, LogLevel, LogRecord, LogValue, Logger, Result, Watcher,
};
pub use crate::registry::LogRegistry;
#[cfg(feature = "console")]
pub use crate::watchers::ConsoleWatcher;
pub use crate::watchers::{AsyncDispatch, DEFAULT_SHUTDOWN_TIMEOUT};
