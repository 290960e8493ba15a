//! Basic logger usage example
//!
//! Demonstrates console logging, thresholds, causes and pretty-printing.
//!
//! Run with: cargo run --example basic_usage

use adapter_logger::prelude::*;
use adapter_logger::{info, warn};
use serde::Serialize;

#[derive(Serialize)]
struct Request {
    method: &'static str,
    path: &'static str,
    status: u16,
}

fn main() -> Result<()> {
    println!("=== Adapter Logger - Basic Usage Example ===\n");

    // Console adapter attached by default, threshold Debug
    let logger = Logger::new(256);

    println!("1. Logging at different levels:");
    logger.debug(&[&"This is a debug message"]);
    logger.info(&[&"This is an info message"]);
    logger.warn(&[&"This is a warning message"]);
    logger.error(&[&"This is an error message"]);
    logger.flush()?;

    println!("\n2. Raising the threshold to Warn:");
    logger.set_level(Severity::Warn);
    logger.info(&[&"Info message (hidden)"]);
    warn!(logger, "Retry attempt", 3, "of", 5);
    info!(logger, "Also hidden");

    println!("\n3. Errors with a cause:");
    let cause = TracedError::new("DB001", "connection reset");
    logger.error_with_cause(&[&"query failed"], &cause);

    println!("\n4. Pretty-printing a value:");
    logger.set_level(Severity::Debug);
    logger.pretty(
        "incoming request",
        &Request {
            method: "GET",
            path: "/health",
            status: 200,
        },
    );

    logger.close();
    println!(
        "\nDispatched {} messages, filtered {}",
        logger.metrics().dispatched(),
        logger.metrics().filtered()
    );
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
