//! Off-path watcher dispatch
//!
//! The core contract is synchronous: a log call blocks until every
//! watcher ran, and a slow watcher stalls the emitting thread. This
//! optional extension moves a watcher off the calling path: records are
//! queued over a bounded channel and drained by a dedicated worker
//! thread. Queue overflow drops the record rather than blocking the
//! caller.

use crate::core::error::{HierlogError, Result};
use crate::core::{LogRecord, Watcher};
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default drain timeout used when the dispatcher is dropped without an
/// explicit `shutdown()`.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Wraps a watcher with a bounded queue and a worker thread.
pub struct AsyncDispatch {
    sender: Arc<RwLock<Option<Sender<LogRecord>>>>,
    handle: Option<thread::JoinHandle<()>>,
    dropped: Arc<AtomicU64>,
}

impl AsyncDispatch {
    /// Spawn the worker draining into `target`.
    pub fn new(buffer_size: usize, target: Watcher) -> Self {
        let (sender, receiver) = bounded::<LogRecord>(buffer_size);

        let handle = thread::spawn(move || {
            for record in receiver.iter() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    target(&record);
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
                        "[HIERLOG ERROR] Async watcher panicked: {}. Worker continues.",
                        panic_msg
                    );
                }
            }
        });

        Self {
            sender: Arc::new(RwLock::new(Some(sender))),
            handle: Some(handle),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A watcher handle that enqueues records for the worker.
    ///
    /// Register this (not the wrapped target) on the broadcaster. When the
    /// queue is full the record is dropped and counted; the first drop and
    /// every thousandth thereafter emit a diagnostic.
    pub fn watcher(&self) -> Watcher {
        let sender = Arc::clone(&self.sender);
        let dropped = Arc::clone(&self.dropped);
        Arc::new(move |record: &LogRecord| {
            let guard = sender.read();
            let Some(sender) = guard.as_ref() else {
                // Dispatcher shut down; nothing to deliver to.
                return;
            };
            match sender.try_send(record.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    let count = dropped.fetch_add(1, Ordering::Relaxed);
                    if count == 0 || (count + 1).is_multiple_of(1000) {
                        eprintln!(
                            "[HIERLOG WARNING] Async dispatch queue full, {} records dropped. \
                             Consider a larger buffer.",
                            count + 1
                        );
                    }
                }
                Err(TrySendError::Disconnected(_)) => {}
            }
        })
    }

    /// Number of records dropped due to queue overflow.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Close the queue and wait for the worker to drain.
    pub fn shutdown(&mut self, timeout: Duration) -> Result<()> {
        let pending = {
            let mut guard = self.sender.write();
            let pending = guard.as_ref().map_or(0, Sender::len);
            // Dropping the only sender ends the worker's receive loop once
            // the queue is drained.
            *guard = None;
            pending
        };

        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                if handle.join().is_err() {
                    return Err(HierlogError::other("async worker panicked during shutdown"));
                }
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(HierlogError::shutdown_timeout(
                    timeout.as_millis() as u64,
                    pending,
                ));
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for AsyncDispatch {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
                eprintln!("[HIERLOG WARNING] {}", e);
            }
        }
        let dropped = self.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[HIERLOG WARNING] Async dispatch shut down with {} dropped records",
                dropped
            );
        }
    }
}
