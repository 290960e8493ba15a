//! Criterion benchmarks for adapter_logger

use adapter_logger::core::render::{render, render_pretty};
use adapter_logger::core::{Adapter, AdapterRegistry, LoggerError, Result};
use adapter_logger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;

/// Adapter that discards everything, so only logger overhead is measured
struct Discard;

impl Adapter for Discard {
    fn init(&mut self, _config: &str) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, text: &str, _severity: Severity) -> Result<()> {
        black_box(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&mut self) {}

    fn name(&self) -> &str {
        "discard"
    }
}

fn discard_logger(capacity: usize, annotate: bool) -> Logger {
    let registry = AdapterRegistry::new();
    registry.register("discard", || Box::new(Discard));
    Logger::builder()
        .registry(Arc::new(registry))
        .queue_capacity(capacity)
        .default_console(false)
        .caller_annotation(annotate)
        .adapter("discard", "")
        .on_diagnostic(Arc::new(|_: &LoggerError| {}))
        .build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("build_and_close", |b| {
        b.iter(|| {
            let logger = discard_logger(1024, true);
            logger.close();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Emit Benchmarks
// ============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    group.throughput(Throughput::Elements(1));

    let plain = discard_logger(10_000, false);
    group.bench_function("info", |b| {
        b.iter(|| {
            plain.info(&[&black_box("user"), &black_box(42), &"logged in"]);
        });
    });

    let annotated = discard_logger(10_000, true);
    group.bench_function("info_annotated", |b| {
        b.iter(|| {
            annotated.info(&[&black_box("user"), &black_box(42), &"logged in"]);
        });
    });

    group.finish();
    plain.close();
    annotated.close();
}

fn bench_concurrent_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_emit");

    let logger = Arc::new(discard_logger(10_000, false));

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for i in 0..100 {
                            logger.info(&[&"Concurrent message", &i]);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
    logger.close();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    group.bench_function("body", |b| {
        b.iter(|| render(Severity::Warn, &[&"disk", &black_box(93.5), &"% full"], None));
    });

    let values: Vec<u32> = (0..32).collect();
    group.bench_function("pretty", |b| {
        b.iter(|| render_pretty("values", black_box(&values)));
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = discard_logger(10_000, false);
    logger.set_level(Severity::Warn);

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(&[&black_box("This should be filtered")]);
        });
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| {
            logger.error(&[&black_box("This should be logged")]);
        });
    });

    group.finish();
    logger.close();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_emit,
    bench_concurrent_emit,
    bench_rendering,
    bench_level_filtering
);

criterion_main!(benches);
