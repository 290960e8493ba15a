//! File logging example
//!
//! Demonstrates the rotating file adapter and the process-wide logger.
//!
//! Run with: cargo run --example file_logging

use adapter_logger::global;
use adapter_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Adapter Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("adapter_logger_demo");
    let _ = fs::remove_dir_all(&dir);

    println!("1. Rotating every 5 lines, compressed:");
    let logger = Logger::builder().default_console(false).build();
    let config = serde_json::json!({
        "filename": dir.join("rotating.log"),
        "maxlines": 5,
        "compress": true,
    });
    logger.set_adapter("file", &config.to_string())?;
    for i in 0..12 {
        logger.info(&[&"request", &i, &"served"]);
    }
    logger.close();

    let mut names: Vec<String> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    for name in &names {
        println!("   {}", name);
    }

    println!("\n2. Process-wide file logger:");
    let path = dir.join("global").join("app.log");
    global::set_file_logger(&path);
    global::set_logger_level(Severity::Info);
    global::info(&[&"service", &"started"]);
    global::debug(&[&"hidden"]);
    global::shutdown();

    print!("{}", fs::read_to_string(&path)?);
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
