//! Watcher implementations and dispatch extensions

pub mod async_dispatch;
#[cfg(feature = "console")]
pub mod console;

pub use async_dispatch::{AsyncDispatch, DEFAULT_SHUTDOWN_TIMEOUT};
#[cfg(feature = "console")]
pub use console::ConsoleWatcher;
