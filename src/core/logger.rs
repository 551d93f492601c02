//! Logger node implementation

use super::broadcaster::Broadcaster;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::log_value::LogValue;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A node in the namespace tree.
///
/// A logger holds its explicit-or-inherited level, an optional metadata
/// map, and an upward link to its parent. The tree keeps no children
/// lists; descendants are found by namespace prefix outside the core. A
/// logger does not own any watchers either — it emits through the shared
/// [`Broadcaster`] it was constructed with.
///
/// The parent chain must stay acyclic; every walk below assumes it
/// terminates at the root.
pub struct Logger {
    name: String,
    explicit_level: RwLock<Option<LogLevel>>,
    parent: RwLock<Option<Arc<Logger>>>,
    metadata: RwLock<BTreeMap<String, String>>,
    broadcaster: Arc<Broadcaster>,
}

impl Logger {
    pub fn new(name: impl Into<String>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            name: name.into(),
            explicit_level: RwLock::new(None),
            parent: RwLock::new(None),
            metadata: RwLock::new(BTreeMap::new()),
            broadcaster,
        }
    }

    /// The namespace this logger was created under. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set or clear the explicit level. `None` means "inherit from the
    /// ancestor chain".
    pub fn set_level(&self, level: impl Into<Option<LogLevel>>) {
        *self.explicit_level.write() = level.into();
    }

    /// The explicit (not inherited) level of this logger.
    pub fn level(&self) -> Option<LogLevel> {
        *self.explicit_level.read()
    }

    pub fn set_parent(&self, parent: Arc<Logger>) {
        *self.parent.write() = Some(parent);
    }

    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.read().clone()
    }

    pub fn broadcaster(&self) -> &Arc<Broadcaster> {
        &self.broadcaster
    }

    /// Whether a record at `level` would pass this logger's threshold.
    ///
    /// Walks the parent chain; the first node with an explicit level
    /// decides. A fully-unset chain falls back to the implicit INFO
    /// default. Levels may change at runtime, so this is re-evaluated on
    /// every log call and never cached.
    pub fn is_loggable(&self, level: LogLevel) -> bool {
        if let Some(explicit) = self.level() {
            return explicit <= level;
        }
        let mut ancestor = self.parent();
        while let Some(node) = ancestor {
            if let Some(explicit) = node.level() {
                return explicit <= level;
            }
            ancestor = node.parent();
        }
        LogLevel::Info <= level
    }

    /// Attach a metadata entry, returning `&self` for chained
    /// configuration. Metadata is copied into every record this logger
    /// produces; it is never inherited by children.
    pub fn set_meta(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.metadata.write().insert(key.into(), value.into());
        self
    }

    pub fn meta_snapshot(&self) -> BTreeMap<String, String> {
        self.metadata.read().clone()
    }

    /// Log at a specific level.
    ///
    /// The record is always constructed: the exact-level tap and the
    /// name-channel bubbling fire regardless of this logger's threshold,
    /// which only gates the global channel.
    pub fn log<I>(&self, level: LogLevel, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        let raw_args: Vec<LogValue> = args.into_iter().map(Into::into).collect();
        let record = LogRecord::new(level, self.name.clone(), self.meta_snapshot(), raw_args);
        self.broadcaster.dispatch(self, &record);
    }

    pub fn finest<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.log(LogLevel::Finest, args);
    }

    pub fn finer<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.log(LogLevel::Finer, args);
    }

    pub fn fine<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.log(LogLevel::Fine, args);
    }

    pub fn info<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.log(LogLevel::Info, args);
    }

    pub fn warn<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.log(LogLevel::Warn, args);
    }

    /// Logs at SEVERE.
    pub fn error<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.log(LogLevel::Severe, args);
    }
}

impl Clone for Logger {
    /// An independent node: same name, same explicit level, same parent
    /// reference, and a copy of the metadata map. Metadata edits on either
    /// instance never affect the other.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            explicit_level: RwLock::new(self.level()),
            parent: RwLock::new(self.parent()),
            metadata: RwLock::new(self.meta_snapshot()),
            broadcaster: Arc::clone(&self.broadcaster),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("explicit_level", &self.level())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::broadcaster::{Channel, Watcher};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_logger(name: &str) -> (Logger, Arc<Broadcaster>) {
        let broadcaster = Arc::new(Broadcaster::new());
        (Logger::new(name, Arc::clone(&broadcaster)), broadcaster)
    }

    fn collect_records(
        broadcaster: &Broadcaster,
        channel: Channel,
    ) -> Arc<Mutex<Vec<LogRecord>>> {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&records);
        let watcher: Watcher = Arc::new(move |record: &LogRecord| {
            sink.lock().push(record.clone());
        });
        broadcaster.register(channel, watcher);
        records
    }

    #[test]
    fn test_default_log_level() {
        let (logger, _b) = test_logger("test");
        assert!(!logger.is_loggable(LogLevel::Fine));
        assert!(logger.is_loggable(LogLevel::Info));
        assert!(logger.is_loggable(LogLevel::Warn));
        assert!(logger.is_loggable(LogLevel::Severe));
    }

    #[test]
    fn test_explicit_log_level() {
        let (logger, _b) = test_logger("test");
        logger.set_level(LogLevel::Warn);
        assert!(!logger.is_loggable(LogLevel::Info));
        assert!(logger.is_loggable(LogLevel::Warn));
        assert!(logger.is_loggable(LogLevel::Severe));
    }

    #[test]
    fn test_inherited_log_level() {
        let broadcaster = Arc::new(Broadcaster::new());
        let parent = Arc::new(Logger::new("parent", Arc::clone(&broadcaster)));
        let child = Logger::new("child", Arc::clone(&broadcaster));
        let orphan = Logger::new("orphan", Arc::clone(&broadcaster));
        child.set_parent(Arc::clone(&parent));
        parent.set_level(LogLevel::Fine);

        assert!(child.is_loggable(LogLevel::Fine));
        assert!(parent.is_loggable(LogLevel::Fine));
        assert!(!orphan.is_loggable(LogLevel::Fine));
    }

    #[test]
    fn test_child_explicit_level_overrides_parent() {
        let broadcaster = Arc::new(Broadcaster::new());
        let parent = Arc::new(Logger::new("parent", Arc::clone(&broadcaster)));
        let child = Logger::new("child", Arc::clone(&broadcaster));
        child.set_parent(Arc::clone(&parent));
        parent.set_level(LogLevel::Finest);
        child.set_level(LogLevel::Warn);

        assert!(!child.is_loggable(LogLevel::Info));
        assert!(parent.is_loggable(LogLevel::Finest));
    }

    #[test]
    fn test_level_change_reevaluated_per_call() {
        let broadcaster = Arc::new(Broadcaster::new());
        let parent = Arc::new(Logger::new("parent", Arc::clone(&broadcaster)));
        let child = Logger::new("child", Arc::clone(&broadcaster));
        child.set_parent(Arc::clone(&parent));

        assert!(!child.is_loggable(LogLevel::Fine));
        parent.set_level(LogLevel::Fine);
        assert!(child.is_loggable(LogLevel::Fine));
        parent.set_level(None);
        assert!(!child.is_loggable(LogLevel::Fine));
    }

    #[test]
    fn test_watcher_bubbling_counts() {
        let broadcaster = Arc::new(Broadcaster::new());
        let parent = Arc::new(Logger::new("parent", Arc::clone(&broadcaster)));
        let child = Logger::new("parent.child", Arc::clone(&broadcaster));
        child.set_parent(Arc::clone(&parent));

        let child_records = collect_records(&broadcaster, Channel::name("parent.child"));
        let parent_records = collect_records(&broadcaster, Channel::name("parent"));

        child.info(["test"]);
        assert_eq!(child_records.lock().len(), 1);
        assert_eq!(parent_records.lock().len(), 1);

        child.info(["test2"]);
        assert_eq!(child_records.lock().len(), 2);
        assert_eq!(parent_records.lock().len(), 2);

        parent.info(["parent"]);
        assert_eq!(child_records.lock().len(), 2);
        assert_eq!(parent_records.lock().len(), 3);
    }

    #[test]
    fn test_log_record_contents() {
        let (logger, broadcaster) = test_logger("test");
        let records = collect_records(&broadcaster, Channel::name("test"));

        logger.warn(vec![
            LogValue::from("test"),
            LogValue::from(serde_json::json!([1, 2, 3])),
        ]);

        let records = records.lock();
        let record = &records[0];
        assert_eq!(record.logger_name, "test");
        assert_eq!(record.level, LogLevel::Warn);
        assert_eq!(record.raw_args.len(), 2);
        assert_eq!(record.message, "test [ 1, 2, 3 ]");
    }

    #[test]
    fn test_global_channel_gated_by_loggability() {
        let (logger, broadcaster) = test_logger("test");
        let all_records = collect_records(&broadcaster, Channel::All);

        logger.fine(["below threshold"]);
        assert_eq!(all_records.lock().len(), 0);

        logger.info(["at threshold"]);
        assert_eq!(all_records.lock().len(), 1);
    }

    #[test]
    fn test_exact_level_tap_is_unconditional() {
        let (logger, broadcaster) = test_logger("test");
        logger.set_level(LogLevel::Warn);

        let all_records = collect_records(&broadcaster, Channel::All);
        let fine_tap = collect_records(&broadcaster, Channel::Level(LogLevel::Fine));

        logger.fine(["suppressed but tapped"]);
        assert_eq!(all_records.lock().len(), 0);
        assert_eq!(fine_tap.lock().len(), 1);
    }

    #[test]
    fn test_exact_level_tap_matches_level_exactly() {
        let (logger, broadcaster) = test_logger("test");
        let warn_tap = collect_records(&broadcaster, Channel::Level(LogLevel::Warn));

        logger.error(["severe, not warn"]);
        logger.warn(["warn"]);
        assert_eq!(warn_tap.lock().len(), 1);
    }

    #[test]
    fn test_name_channel_not_gated_by_loggability() {
        let (logger, broadcaster) = test_logger("quiet");
        logger.set_level(LogLevel::Severe);

        let name_records = collect_records(&broadcaster, Channel::name("quiet"));
        logger.info(["suppressed globally"]);
        assert_eq!(name_records.lock().len(), 1);
    }

    #[test]
    fn test_metadata_attached_to_records() {
        let (logger, broadcaster) = test_logger("svc");
        logger.set_meta("region", "eu").set_meta("shard", "7");

        let records = collect_records(&broadcaster, Channel::name("svc"));
        logger.info(["hello"]);

        let records = records.lock();
        assert_eq!(records[0].metadata.get("region").unwrap(), "eu");
        assert_eq!(records[0].metadata.get("shard").unwrap(), "7");
    }

    #[test]
    fn test_metadata_snapshot_not_live() {
        let (logger, broadcaster) = test_logger("svc");
        logger.set_meta("k", "before");

        let records = collect_records(&broadcaster, Channel::name("svc"));
        logger.info(["one"]);
        logger.set_meta("k", "after");

        assert_eq!(records.lock()[0].metadata.get("k").unwrap(), "before");
    }

    #[test]
    fn test_metadata_not_inherited() {
        let broadcaster = Arc::new(Broadcaster::new());
        let parent = Arc::new(Logger::new("parent", Arc::clone(&broadcaster)));
        parent.set_meta("parent_key", "v");
        let child = Logger::new("parent.child", Arc::clone(&broadcaster));
        child.set_parent(Arc::clone(&parent));

        let records = collect_records(&broadcaster, Channel::name("parent.child"));
        child.info(["hi"]);
        assert!(records.lock()[0].metadata.is_empty());
    }

    #[test]
    fn test_clone_metadata_independence() {
        let (logger, broadcaster) = test_logger("test");
        logger.set_meta("extraField1", "true");
        let cloned = logger.clone();
        cloned.set_meta("extraField2", "true");

        let records = collect_records(&broadcaster, Channel::name("test"));

        logger.warn(["test"]);
        {
            let records = records.lock();
            let meta = &records[0].metadata;
            assert!(meta.contains_key("extraField1"));
            assert!(!meta.contains_key("extraField2"));
        }

        cloned.warn(["test"]);
        {
            let records = records.lock();
            let meta = &records[1].metadata;
            assert!(meta.contains_key("extraField1"));
            assert!(meta.contains_key("extraField2"));
        }
    }

    #[test]
    fn test_clone_shares_parent_and_level() {
        let broadcaster = Arc::new(Broadcaster::new());
        let parent = Arc::new(Logger::new("parent", Arc::clone(&broadcaster)));
        let child = Logger::new("parent.child", Arc::clone(&broadcaster));
        child.set_parent(Arc::clone(&parent));
        child.set_level(LogLevel::Fine);

        let cloned = child.clone();
        assert_eq!(cloned.level(), Some(LogLevel::Fine));
        assert!(Arc::ptr_eq(&cloned.parent().unwrap(), &parent));
    }

    #[test]
    fn test_transient_style_logger_bubbles_through_parent() {
        // A logger that is never registered anywhere still participates in
        // inheritance and bubbling via its parent link.
        let broadcaster = Arc::new(Broadcaster::new());
        let parent = Arc::new(Logger::new("app", Arc::clone(&broadcaster)));
        let seen = Arc::new(AtomicUsize::new(0));
        {
            let seen = Arc::clone(&seen);
            broadcaster.register(
                Channel::name("app"),
                Arc::new(move |_record| {
                    seen.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        let transient = Logger::new("app.request", Arc::clone(&broadcaster));
        transient.set_parent(Arc::clone(&parent));
        transient.info(["one-shot"]);
        drop(transient);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
