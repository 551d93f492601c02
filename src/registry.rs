//! Logger registry
//!
//! An explicit, caller-constructed context owning the root logger, the
//! broadcaster, and the namespace table. Nothing here is process-global:
//! two registries in one process are fully independent, each with its own
//! root, channels, and console baseline.

use crate::core::broadcaster::{Broadcaster, Channel, Watcher};
use crate::core::log_level::LogLevel;
use crate::core::logger::Logger;
#[cfg(feature = "console")]
use crate::core::error::{HierlogError, Result};
#[cfg(feature = "console")]
use crate::watchers::console::ConsoleWatcher;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Returns the parent namespace: everything before the last `.`, or the
/// empty (root) namespace when there is no dot.
fn parent_ns(ns: &str) -> &str {
    ns.rfind('.').map_or("", |idx| &ns[..idx])
}

/// Memoizing namespace → logger factory.
pub struct LogRegistry {
    broadcaster: Arc<Broadcaster>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    root: Arc<Logger>,
    /// Baseline sink reinstalled by `remove_all_listeners`.
    baseline: RwLock<Option<Watcher>>,
}

impl LogRegistry {
    #[must_use]
    pub fn new() -> Self {
        let broadcaster = Arc::new(Broadcaster::new());
        let root = Arc::new(Logger::new("", Arc::clone(&broadcaster)));
        let mut loggers = HashMap::new();
        loggers.insert(String::new(), Arc::clone(&root));
        Self {
            broadcaster,
            loggers: RwLock::new(loggers),
            root,
            baseline: RwLock::new(None),
        }
    }

    /// The root logger (namespace `""`).
    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    pub fn broadcaster(&self) -> &Arc<Broadcaster> {
        &self.broadcaster
    }

    /// Returns the logger for a namespace, creating and parent-wiring any
    /// missing ancestors. Repeated calls for one namespace return the same
    /// instance.
    pub fn get_logger(&self, ns: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(ns) {
            return Arc::clone(logger);
        }

        // Resolve the parent before taking the write lock; the recursion
        // must not run under it.
        let parent = self.get_logger(parent_ns(ns));

        let mut loggers = self.loggers.write();
        let entry = loggers.entry(ns.to_string()).or_insert_with(|| {
            let logger = Logger::new(ns, Arc::clone(&self.broadcaster));
            logger.set_parent(parent);
            Arc::new(logger)
        });
        Arc::clone(entry)
    }

    /// Returns a fresh, never-memoized logger for a namespace.
    ///
    /// Transient loggers inherit levels and bubble records through their
    /// parent link like any other logger, but the registry holds no
    /// reference to them, so they are collectible as soon as the caller
    /// drops them. Registered parents are reused when they exist;
    /// otherwise the parent chain is transient too, terminating at the
    /// root.
    pub fn get_transient_logger(&self, ns: &str) -> Arc<Logger> {
        let logger = Logger::new(ns, Arc::clone(&self.broadcaster));
        let parent_name = parent_ns(ns);
        // Look up first and recurse outside the lock.
        let registered = self.loggers.read().get(parent_name).cloned();
        let parent = registered.unwrap_or_else(|| self.get_transient_logger(parent_name));
        logger.set_parent(parent);
        Arc::new(logger)
    }

    /// Register a watcher on a channel.
    pub fn register_watcher(&self, channel: Channel, watcher: Watcher) {
        self.broadcaster.register(channel, watcher);
    }

    /// Remove a single watcher from a channel by identity.
    pub fn remove_listener(&self, channel: &Channel, watcher: &Watcher) -> bool {
        self.broadcaster.remove(channel, watcher)
    }

    /// Remove every watcher on every channel. If a console baseline was
    /// installed it is reinstalled afterward, so teardown never leaves the
    /// registry silently sinkless.
    pub fn remove_all_listeners(&self) {
        self.broadcaster.clear();
        if let Some(baseline) = self.baseline.read().clone() {
            self.broadcaster.register(Channel::All, baseline);
        }
    }

    /// Set (or clear, with `None`) the explicit level for a namespace.
    pub fn set_log_level(&self, ns: &str, level: impl Into<Option<LogLevel>>) {
        self.get_logger(ns).set_level(level);
    }

    /// The explicit level for a namespace, if one is set.
    pub fn get_log_level(&self, ns: &str) -> Option<LogLevel> {
        self.get_logger(ns).level()
    }

    /// Install the console watcher as the baseline sink on the global
    /// channel.
    ///
    /// A registry owns at most one console baseline; a second install is a
    /// configuration fault and fails loudly instead of double-logging.
    #[cfg(feature = "console")]
    pub fn install_console(&self, console: ConsoleWatcher) -> Result<Watcher> {
        let mut baseline = self.baseline.write();
        if baseline.is_some() {
            return Err(HierlogError::ConsoleAlreadyInstalled);
        }
        let watcher = console.into_watcher();
        self.broadcaster
            .register(Channel::All, Arc::clone(&watcher));
        *baseline = Some(Arc::clone(&watcher));
        Ok(watcher)
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}
