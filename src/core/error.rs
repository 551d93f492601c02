//! Error types for the logging core

pub type Result<T> = std::result::Result<T, HierlogError>;

#[derive(Debug, thiserror::Error)]
pub enum HierlogError {
    /// A console sink is already installed on this registry
    #[error("console watcher already installed on this registry")]
    ConsoleAlreadyInstalled,

    /// Level string could not be parsed
    #[error("invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Async dispatcher did not drain within the allotted time
    #[error("async dispatch did not drain within {timeout_ms}ms ({pending} records pending)")]
    ShutdownTimeout { timeout_ms: u64, pending: usize },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl HierlogError {
    /// Create a shutdown timeout error
    pub fn shutdown_timeout(timeout_ms: u64, pending: usize) -> Self {
        HierlogError::ShutdownTimeout {
            timeout_ms,
            pending,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HierlogError::Other(msg.into())
    }
}
