//! Basic hierlog usage example
//!
//! Demonstrates namespace hierarchy, level inheritance, and watcher
//! channels with the console sink.
//!
//! Run with: cargo run --example basic_usage

use hierlog::prelude::*;
use hierlog::{error, fine, info, warn};

fn main() -> Result<()> {
    println!("=== Hierlog - Basic Usage Example ===\n");

    // Every registry is an independent logging context.
    let registry = LogRegistry::new();
    registry.install_console(ConsoleWatcher::new())?;

    let server = registry.get_logger("server");
    let db = registry.get_logger("server.db");

    println!("1. Default threshold is INFO:");
    fine!(server, "hidden below the default threshold");
    info!(server, "listening on port %s", 8080);
    warn!(db, "slow query: %s ms", 1500);

    println!("\n2. Lowering the subtree threshold to FINE:");
    registry.set_log_level("server", LogLevel::Fine);
    fine!(db, "connection pool warm, %s idle", 4);

    println!("\n3. Metadata travels with every record:");
    db.set_meta("shard", "eu-3");
    error!(db, "replica lag detected");

    println!("\n4. Watching a subtree:");
    registry.register_watcher(
        Channel::name("server"),
        std::sync::Arc::new(|record: &LogRecord| {
            println!("   [subtree watcher] {} -> {}", record.logger_name, record.message);
        }),
    );
    info!(db, "bubbles to the server watcher");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
