//! Logger metrics for observability
//!
//! Counters for monitoring logger health: messages filtered out by the
//! threshold, enqueued, dispatched, adapter write failures and enqueues that
//! had to wait for queue space.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use adapter_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_dispatched();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.dispatched(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages placed on the queue
    enqueued: AtomicU64,

    /// Messages skipped because they were below the threshold
    filtered: AtomicU64,

    /// Messages fanned out to the adapter set
    dispatched: AtomicU64,

    /// Individual adapter write calls that failed or panicked
    write_failures: AtomicU64,

    /// Enqueues that found the queue full and blocked
    blocked_enqueues: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            blocked_enqueues: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn blocked_enqueues(&self) -> u64 {
        self.blocked_enqueues.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_blocked(&self) -> u64 {
        self.blocked_enqueues.fetch_add(1, Ordering::Relaxed)
    }

    /// Messages enqueued but not yet dispatched
    pub fn pending(&self) -> u64 {
        self.enqueued().saturating_sub(self.dispatched())
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.blocked_enqueues.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            filtered: AtomicU64::new(self.filtered()),
            dispatched: AtomicU64::new(self.dispatched()),
            write_failures: AtomicU64::new(self.write_failures()),
            blocked_enqueues: AtomicU64::new(self.blocked_enqueues()),
        }
    }
}
