//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::HierlogError;

/// Severity scale for log records.
///
/// Levels are totally ordered from `Finest` (most verbose) to `Severe`.
/// A logger with no explicit level of its own carries `None` instead of a
/// sentinel value, so "inherit from ancestor" can never take part in a
/// comparison; see [`Logger::is_loggable`](crate::Logger::is_loggable)
/// for the resolution walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Finest = 100,
    Finer = 200,
    Fine = 400,
    #[default]
    Info = 600,
    Warn = 800,
    Severe = 1000,
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Finest => "FINEST",
            LogLevel::Finer => "FINER",
            LogLevel::Fine => "FINE",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Severe => "SEVERE",
        }
    }

    /// Numeric weight of this level on the severity scale.
    pub fn value(&self) -> u32 {
        *self as u32
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Finest | LogLevel::Finer => BrightBlack,
            LogLevel::Fine => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Severe => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = HierlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FINEST" => Ok(LogLevel::Finest),
            "FINER" => Ok(LogLevel::Finer),
            "FINE" => Ok(LogLevel::Fine),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "SEVERE" | "ERROR" => Ok(LogLevel::Severe),
            _ => Err(HierlogError::InvalidLevel(s.to_string())),
        }
    }
}
