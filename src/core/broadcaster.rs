//! Channel table and record propagation
//!
//! Watchers are never stored on logger nodes. Every subscription lives in
//! a single channel table keyed by [`Channel`], so a watcher registered
//! "on logger `foo.bar`" is really registered on the `foo.bar` name
//! channel at the shared broadcast point.

use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A subscriber invoked synchronously with every record delivered to its
/// channel. Identity for removal is `Arc` pointer identity.
pub type Watcher = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// Addressable subscription key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Every record that passed its own loggability check, system-wide.
    All,
    /// Every record at exactly this level, system-wide, regardless of the
    /// emitting logger's threshold.
    Level(LogLevel),
    /// Every record emitted by the named logger or any of its descendants.
    Name(String),
}

impl Channel {
    pub fn name(ns: impl Into<String>) -> Self {
        Channel::Name(ns.into())
    }

    /// Parse a string channel key: the empty string is the global channel,
    /// a numeric level value is an exact-level tap, anything else is a
    /// logger name.
    pub fn from_key(key: &str) -> Self {
        if key.is_empty() {
            return Channel::All;
        }
        if let Ok(value) = key.parse::<u32>() {
            for level in [
                LogLevel::Finest,
                LogLevel::Finer,
                LogLevel::Fine,
                LogLevel::Info,
                LogLevel::Warn,
                LogLevel::Severe,
            ] {
                if level.value() == value {
                    return Channel::Level(level);
                }
            }
        }
        Channel::Name(key.to_string())
    }
}

/// Owns the channel-to-watcher table and runs the delivery algorithm.
#[derive(Default)]
pub struct Broadcaster {
    channels: RwLock<HashMap<Channel, Vec<Watcher>>>,
}

impl Broadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a watcher to a channel. Invocation order within a channel is
    /// registration order.
    pub fn register(&self, channel: Channel, watcher: Watcher) {
        self.channels.write().entry(channel).or_default().push(watcher);
    }

    /// Remove a previously registered watcher by pointer identity.
    /// Returns whether anything was removed.
    pub fn remove(&self, channel: &Channel, watcher: &Watcher) -> bool {
        let mut channels = self.channels.write();
        let Some(watchers) = channels.get_mut(channel) else {
            return false;
        };
        let Some(idx) = watchers.iter().position(|w| Arc::ptr_eq(w, watcher)) else {
            return false;
        };
        watchers.remove(idx);
        if watchers.is_empty() {
            channels.remove(channel);
        }
        true
    }

    /// Drop every watcher on every channel.
    pub fn clear(&self) {
        self.channels.write().clear();
    }

    pub fn watcher_count(&self, channel: &Channel) -> usize {
        self.channels.read().get(channel).map_or(0, Vec::len)
    }

    pub fn total_watchers(&self) -> usize {
        self.channels.read().values().map(Vec::len).sum()
    }

    /// Deliver a record to one channel's watchers in registration order.
    ///
    /// The list is snapshotted before invocation: a watcher may register
    /// or unregister watchers (including itself) without corrupting the
    /// iteration, and the table lock is not held across watcher calls.
    pub fn deliver(&self, channel: &Channel, record: &LogRecord) {
        let snapshot: Vec<Watcher> = match self.channels.read().get(channel) {
            Some(watchers) => watchers.clone(),
            None => return,
        };

        for (idx, watcher) in snapshot.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                watcher(record);
            }));
            if let Err(panic_info) = result {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                eprintln!(
                    "[HIERLOG ERROR] Watcher #{} on channel {:?} panicked: {}. \
                     Other watchers continue to function.",
                    idx, channel, panic_msg
                );
            }
        }
    }

    /// Run the three-step delivery algorithm for a record emitted by
    /// `logger`.
    ///
    /// 1. The global channel, only if the record passed the emitting
    ///    logger's loggability check.
    /// 2. The exact-level tap for the record's level, unconditionally.
    /// 3. Each named ancestor's channel, walking from the emitting logger
    ///    toward the root. The root's name is empty and never matched
    ///    here.
    pub fn dispatch(&self, logger: &Logger, record: &LogRecord) {
        if logger.is_loggable(record.level) {
            self.deliver(&Channel::All, record);
        }

        self.deliver(&Channel::Level(record.level), record);

        if !logger.name().is_empty() {
            self.deliver(&Channel::name(logger.name()), record);
        }
        let mut ancestor = logger.parent();
        while let Some(node) = ancestor {
            if !node.name().is_empty() {
                self.deliver(&Channel::name(node.name()), record);
            }
            ancestor = node.parent();
        }
    }
}
