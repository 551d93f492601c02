//! Logging macros for variadic log calls.
//!
//! A log call takes an ordered list of heterogeneous arguments; these
//! macros build that list so call sites stay close to the underlying
//! variadic shape.
//!
//! # Examples
//!
//! ```
//! use hierlog::prelude::*;
//! use hierlog::info;
//!
//! let registry = LogRegistry::new();
//! let logger = registry.get_logger("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // %s substitution happens in the formatter
//! info!(logger, "Listening on port %s", 8080);
//!
//! // Trailing arguments are appended to the message
//! info!(logger, "Session opened", true);
//! ```

/// Log a list of arguments at a specific level.
///
/// # Examples
///
/// ```
/// # use hierlog::prelude::*;
/// # let registry = LogRegistry::new();
/// # let logger = registry.get_logger("app");
/// use hierlog::log;
/// log!(logger, LogLevel::Info, "simple message");
/// log!(logger, LogLevel::Severe, "error code: %s", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($level, vec![$($crate::LogValue::from($arg)),+])
    };
}

/// Log at FINEST level.
#[macro_export]
macro_rules! finest {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Finest, $($arg),+)
    };
}

/// Log at FINER level.
#[macro_export]
macro_rules! finer {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Finer, $($arg),+)
    };
}

/// Log at FINE level.
///
/// # Examples
///
/// ```
/// # use hierlog::prelude::*;
/// # let registry = LogRegistry::new();
/// # let logger = registry.get_logger("app");
/// # logger.set_level(LogLevel::Fine);
/// use hierlog::fine;
/// fine!(logger, "cache warm in %s ms", 12);
/// ```
#[macro_export]
macro_rules! fine {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fine, $($arg),+)
    };
}

/// Log at INFO level.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg),+)
    };
}

/// Log at WARN level.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg),+)
    };
}

/// Log at SEVERE level.
///
/// # Examples
///
/// ```
/// # use hierlog::prelude::*;
/// # let registry = LogRegistry::new();
/// # let logger = registry.get_logger("app");
/// use hierlog::error;
/// error!(logger, "request failed: %s", "timeout");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Severe, $($arg),+)
    };
}
