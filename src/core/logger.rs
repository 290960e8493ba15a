//! Main logger implementation

use super::{
    activation_policy::{stderr_diagnostics, ActivationPolicy, DiagnosticHook},
    adapter::Adapter,
    caller::{CallerResolver, TrackedCallerResolver},
    cause::StackTraced,
    config::LoggerConfig,
    error::{LoggerError, Result},
    message::Message,
    metrics::LoggerMetrics,
    registry::AdapterRegistry,
    render::{annotate, render, render_pretty},
    severity::Severity,
};
use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Queue capacity used by [`Logger::new_file_backed`] and the default context
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Caller depth of a freshly constructed logger
pub const DEFAULT_CALLER_DEPTH: usize = 2;

/// Retention, in days, of the file adapter attached by [`Logger::new_file_backed`]
pub const DEFAULT_FILE_RETENTION_DAYS: u64 = 7;

const DISPATCH_THREAD_NAME: &str = "adapter-logger-dispatch";

type AdapterMap = BTreeMap<String, Box<dyn Adapter>>;

/// State shared between the logger handle and its dispatch worker
struct Shared {
    adapters: RwLock<AdapterMap>,
    metrics: LoggerMetrics,
    diagnostics: DiagnosticHook,
}

impl Shared {
    /// Fan `message` out to every adapter active right now.
    ///
    /// **Per-Adapter Panic Isolation**: each write is wrapped in catch_unwind,
    /// so one failing adapter does not keep the message from the others.
    fn dispatch(&self, message: &Message) {
        let mut adapters = self.adapters.write();

        for (name, adapter) in adapters.iter_mut() {
            let write_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                adapter.write(message.text(), message.severity())
            }));

            let failure = match write_result {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(panic_info) => Some(format!("panicked: {}", panic_message(&*panic_info))),
            };

            if let Some(reason) = failure {
                self.metrics.record_write_failure();
                (self.diagnostics)(&LoggerError::dispatch_write(name.as_str(), reason));
            }
        }

        self.metrics.record_dispatched();
    }

    /// Flush then shut down an adapter leaving the active set
    fn retire(&self, name: &str, mut adapter: Box<dyn Adapter>) {
        if let Err(e) = adapter.flush() {
            (self.diagnostics)(&LoggerError::other(format!(
                "adapter '{}' failed to flush before shutdown: {}",
                name, e
            )));
        }
        adapter.shutdown();
    }

    fn report(&self, err: &LoggerError) {
        (self.diagnostics)(err);
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Dispatch loop: runs until the shutdown signal arrives or the queue
/// disconnects.
fn run_worker(queue: Receiver<Message>, shutdown: Receiver<()>, shared: Arc<Shared>) {
    loop {
        select! {
            recv(queue) -> message => match message {
                Ok(message) => shared.dispatch(&message),
                Err(_) => break,
            },
            recv(shutdown) -> _ => break,
        }
    }
}

/// Asynchronous logger fanning messages out to named adapters.
///
/// Emit operations filter by the threshold, render the message, and place it
/// on a bounded queue; a single dispatch thread delivers queued messages to
/// every active adapter. Enqueue blocks while the queue is full.
///
/// # Example
///
/// ```no_run
/// use adapter_logger::prelude::*;
///
/// let logger = Logger::new(1000);
/// logger.set_level(Severity::Info);
/// logger.info(&[&"listening on port", &8080]);
/// logger.debug(&[&"filtered out"]);
/// logger.close();
/// ```
pub struct Logger {
    threshold: AtomicU8,
    caller_depth: AtomicUsize,
    caller_annotation: AtomicBool,
    closed: AtomicBool,
    activation: ActivationPolicy,
    capacity: usize,
    registry: Arc<AdapterRegistry>,
    resolver: Arc<dyn CallerResolver>,
    shared: Arc<Shared>,
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    shutdown_tx: Sender<()>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    /// Serializes adapter management, level changes and close
    manage: Mutex<()>,
}

impl Logger {
    /// Create a logger with a queue of `queue_capacity` messages.
    ///
    /// The threshold starts at `Debug`, caller annotation is on with depth 2,
    /// and the `console` adapter is attached.
    #[must_use]
    pub fn new(queue_capacity: usize) -> Self {
        Self::builder().queue_capacity(queue_capacity).build()
    }

    /// Create a logger writing to `path` through the `file` adapter.
    ///
    /// The parent directory is created if needed; failures there or in the
    /// adapter setup are reported on the diagnostic channel, not returned.
    #[must_use]
    pub fn new_file_backed(path: impl AsRef<Path>) -> Self {
        let logger = Self::builder()
            .queue_capacity(DEFAULT_QUEUE_CAPACITY)
            .caller_depth(4)
            .build();
        logger.attach_file(path.as_ref());
        logger
    }

    /// Create a logger from a [`LoggerConfig`], failing on the first adapter
    /// that cannot be activated.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).try_build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn start(builder: &LoggerBuilder) -> Self {
        // Rendezvous channels are not supported; keep at least one slot
        let capacity = builder.queue_capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        let (shutdown_tx, shutdown_rx) = bounded(1);

        let shared = Arc::new(Shared {
            adapters: RwLock::new(BTreeMap::new()),
            metrics: LoggerMetrics::new(),
            diagnostics: builder
                .diagnostics
                .clone()
                .unwrap_or_else(stderr_diagnostics),
        });

        let worker_queue = receiver.clone();
        let worker_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(DISPATCH_THREAD_NAME.to_string())
            .spawn(move || run_worker(worker_queue, shutdown_rx, worker_shared))
            .expect("failed to spawn logger dispatch thread");

        Self {
            threshold: AtomicU8::new(builder.level as u8),
            caller_depth: AtomicUsize::new(builder.caller_depth),
            caller_annotation: AtomicBool::new(builder.caller_annotation),
            closed: AtomicBool::new(false),
            activation: builder.activation,
            capacity,
            registry: builder
                .registry
                .clone()
                .unwrap_or_else(AdapterRegistry::global),
            resolver: builder
                .resolver
                .clone()
                .unwrap_or_else(|| Arc::new(TrackedCallerResolver)),
            shared,
            sender,
            receiver,
            shutdown_tx,
            worker: Mutex::new(Some(handle)),
            manage: Mutex::new(()),
        }
    }

    fn attach_file(&self, path: &Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                self.shared.report(&LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                ));
            }
        }

        let config = serde_json::json!({
            "filename": path.to_string_lossy(),
            "maxdays": DEFAULT_FILE_RETENTION_DAYS,
        });
        if let Err(e) = self.set_adapter("file", &config.to_string()) {
            // AdapterInit was already reported by set_adapter
            if !e.is_adapter_init() {
                self.shared.report(&e);
            }
        }
    }

    // ------------------------------------------------------------------
    // Adapter management
    // ------------------------------------------------------------------

    /// Construct, initialize and activate the registered adapter `name`.
    ///
    /// `config` is adapter-specific JSON (empty for defaults). An adapter
    /// already active under `name` is flushed, shut down and replaced.
    ///
    /// # Errors
    ///
    /// - `UnknownAdapter` if `name` is not registered
    /// - `AdapterInit` if initialization failed. Under
    ///   [`ActivationPolicy::Lenient`] the adapter stays active anyway.
    /// - `LoggerClosed` after [`close`](Self::close)
    pub fn set_adapter(&self, name: &str, config: &str) -> Result<()> {
        let _guard = self.manage.lock();
        self.ensure_open()?;

        let constructor = self
            .registry
            .lookup(name)
            .ok_or_else(|| LoggerError::unknown_adapter(name))?;

        // Initialize outside the adapter map lock so dispatch keeps flowing
        let mut adapter = constructor();
        let init_result = adapter
            .init(config)
            .map_err(|e| LoggerError::adapter_init(name, e));

        if let Err(ref err) = init_result {
            self.shared.report(err);
            if self.activation == ActivationPolicy::Strict {
                adapter.shutdown();
                return init_result;
            }
        }

        let previous = self
            .shared
            .adapters
            .write()
            .insert(name.to_string(), adapter);
        if let Some(previous) = previous {
            self.shared.retire(name, previous);
        }

        init_result
    }

    /// Flush, shut down and deactivate the adapter `name`.
    ///
    /// Messages already dispatched to it are not replayed anywhere.
    pub fn remove_adapter(&self, name: &str) -> Result<()> {
        let _guard = self.manage.lock();
        self.ensure_open()?;

        let removed = self.shared.adapters.write().remove(name);
        match removed {
            Some(adapter) => {
                self.shared.retire(name, adapter);
                Ok(())
            }
            None => Err(LoggerError::unknown_adapter(name)),
        }
    }

    /// Change the threshold; only messages emitted afterwards are affected.
    pub fn set_level(&self, severity: Severity) {
        let _guard = self.manage.lock();
        self.threshold.store(severity as u8, Ordering::Release);
    }

    /// Set the depth handed to the caller resolver.
    ///
    /// The default [`TrackedCallerResolver`] ignores it: `#[track_caller]`
    /// already yields the user's call site. Only a resolver installed with
    /// [`LoggerBuilder::caller_resolver`] observes this value.
    pub fn set_caller_depth(&self, depth: usize) {
        self.caller_depth.store(depth, Ordering::Relaxed);
    }

    pub fn enable_caller_annotation(&self, enabled: bool) {
        self.caller_annotation.store(enabled, Ordering::Relaxed);
    }

    pub fn level(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn caller_depth(&self) -> usize {
        self.caller_depth.load(Ordering::Relaxed)
    }

    pub fn caller_annotation_enabled(&self) -> bool {
        self.caller_annotation.load(Ordering::Relaxed)
    }

    pub fn activation_policy(&self) -> ActivationPolicy {
        self.activation
    }

    /// Names of the active adapters in dispatch order
    pub fn adapter_names(&self) -> Vec<String> {
        self.shared.adapters.read().keys().cloned().collect()
    }

    pub fn has_adapter(&self, name: &str) -> bool {
        self.shared.adapters.read().contains_key(name)
    }

    pub fn queue_capacity(&self) -> usize {
        self.capacity
    }

    /// Messages currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(LoggerError::LoggerClosed)
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Emit `args`, space-separated, at `severity`.
    ///
    /// Returns immediately when `severity` is below the threshold. Otherwise
    /// blocks only while the queue is full.
    #[track_caller]
    pub fn emit(&self, severity: Severity, args: &[&dyn fmt::Display]) {
        self.emit_at(severity, args, None, Location::caller());
    }

    /// Emit like [`emit`](Self::emit) and append the stack trace of `cause`
    #[track_caller]
    pub fn emit_with_cause(
        &self,
        severity: Severity,
        args: &[&dyn fmt::Display],
        cause: &dyn StackTraced,
    ) {
        self.emit_at(severity, args, Some(cause), Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.emit_at(Severity::Error, args, None, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn warn(&self, args: &[&dyn fmt::Display]) {
        self.emit_at(Severity::Warn, args, None, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, args: &[&dyn fmt::Display]) {
        self.emit_at(Severity::Info, args, None, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, args: &[&dyn fmt::Display]) {
        self.emit_at(Severity::Debug, args, None, Location::caller());
    }

    #[track_caller]
    pub fn error_with_cause(&self, args: &[&dyn fmt::Display], cause: &dyn StackTraced) {
        self.emit_at(Severity::Error, args, Some(cause), Location::caller());
    }

    #[track_caller]
    pub fn warn_with_cause(&self, args: &[&dyn fmt::Display], cause: &dyn StackTraced) {
        self.emit_at(Severity::Warn, args, Some(cause), Location::caller());
    }

    /// Emit `value` as indented JSON at `Debug`.
    ///
    /// The message reads `[Pretty]\n<message>\n<json>`; an empty `message` is
    /// replaced with the type name of `value`.
    #[track_caller]
    pub fn pretty<T: Serialize + ?Sized>(&self, message: &str, value: &T) {
        let location = Location::caller();
        if !self.accepts(Severity::Debug) {
            return;
        }

        let (text, err) = render_pretty(message, value);
        if let Some(e) = err {
            self.shared.report(&LoggerError::from(e));
        }
        self.enqueue(Severity::Debug, text, location);
    }

    fn emit_at(
        &self,
        severity: Severity,
        args: &[&dyn fmt::Display],
        cause: Option<&dyn StackTraced>,
        location: &'static Location<'static>,
    ) {
        if !self.accepts(severity) {
            return;
        }

        let text = render(severity, args, cause);
        self.enqueue(severity, text, location);
    }

    fn accepts(&self, severity: Severity) -> bool {
        if severity.passes(self.level()) {
            true
        } else {
            self.shared.metrics.record_filtered();
            false
        }
    }

    fn enqueue(&self, severity: Severity, text: String, location: &'static Location<'static>) {
        if self.is_closed() {
            self.shared.report(&LoggerError::LoggerClosed);
            return;
        }

        let text = if self.caller_annotation_enabled() {
            let site = self.resolver.resolve(self.caller_depth(), location);
            annotate(text, site.as_ref())
        } else {
            text
        };

        self.shared.metrics.record_enqueued();
        match self.sender.try_send(Message::new(severity, text)) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                // Backpressure: wait for the dispatcher to free a slot
                self.shared.metrics.record_blocked();
                let _ = self.sender.send(message);
            }
            Err(TrySendError::Disconnected(_)) => {
                // The logger owns a receiver, so the queue outlives every sender
            }
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Flush every active adapter.
    ///
    /// All adapters are attempted; the first failure is returned.
    pub fn flush(&self) -> Result<()> {
        let mut adapters = self.shared.adapters.write();
        let mut first_error = None;
        for adapter in adapters.values_mut() {
            if let Err(e) = adapter.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Stop the dispatch worker, deliver every queued message on the calling
    /// thread, then flush and shut down every adapter.
    ///
    /// The logger is unusable afterwards: emits are dropped with a diagnostic
    /// and management calls return `LoggerClosed`. Calling `close` again is a
    /// no-op.
    pub fn close(&self) {
        let _guard = self.manage.lock();
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.worker.lock().take() {
            if handle.join().is_err() {
                self.shared
                    .report(&LoggerError::other("dispatch worker panicked before close"));
            }
        }

        while let Ok(message) = self.receiver.try_recv() {
            self.shared.dispatch(&message);
        }

        let adapters = std::mem::take(&mut *self.shared.adapters.write());
        for (name, adapter) in adapters {
            self.shared.retire(&name, adapter);
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("adapters", &self.adapter_names())
            .field("queue_capacity", &self.capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use adapter_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .queue_capacity(256)
///     .level(Severity::Info)
///     .caller_annotation(false)
///     .activation_policy(ActivationPolicy::Strict)
///     .adapter("file", r#"{"filename":"logs/app.log"}"#)
///     .build();
/// ```
#[derive(Clone)]
pub struct LoggerBuilder {
    queue_capacity: usize,
    level: Severity,
    caller_depth: usize,
    caller_annotation: bool,
    activation: ActivationPolicy,
    default_console: bool,
    adapters: Vec<(String, String)>,
    registry: Option<Arc<AdapterRegistry>>,
    resolver: Option<Arc<dyn CallerResolver>>,
    diagnostics: Option<DiagnosticHook>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            level: Severity::Debug,
            caller_depth: DEFAULT_CALLER_DEPTH,
            caller_annotation: true,
            activation: ActivationPolicy::default(),
            default_console: true,
            adapters: Vec::new(),
            registry: None,
            resolver: None,
            diagnostics: None,
        }
    }

    /// Builder pre-filled from a [`LoggerConfig`]
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mut builder = Self::new()
            .queue_capacity(config.queue_capacity)
            .level(config.level)
            .caller_depth(config.caller_depth)
            .caller_annotation(config.caller_annotation)
            .activation_policy(config.activation)
            .default_console(config.default_console);
        for spec in &config.adapters {
            builder = builder.adapter(&spec.name, spec.config_string());
        }
        builder
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_depth(mut self, depth: usize) -> Self {
        self.caller_depth = depth;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_annotation(mut self, enabled: bool) -> Self {
        self.caller_annotation = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn activation_policy(mut self, policy: ActivationPolicy) -> Self {
        self.activation = policy;
        self
    }

    /// Whether the `console` adapter is attached at construction (default on)
    #[must_use = "builder methods return a new value"]
    pub fn default_console(mut self, enabled: bool) -> Self {
        self.default_console = enabled;
        self
    }

    /// Activate adapter `name` with `config` once the logger is running
    #[must_use = "builder methods return a new value"]
    pub fn adapter(mut self, name: &str, config: impl Into<String>) -> Self {
        self.adapters.push((name.to_string(), config.into()));
        self
    }

    /// Look adapters up in `registry` instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<AdapterRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_resolver(mut self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Receive dispatch write failures and other off-path errors.
    ///
    /// The hook runs on the dispatch thread while adapters are locked; it
    /// must not log through the same logger.
    #[must_use = "builder methods return a new value"]
    pub fn on_diagnostic(mut self, hook: DiagnosticHook) -> Self {
        self.diagnostics = Some(hook);
        self
    }

    /// Build the Logger, reporting adapter activation failures on the
    /// diagnostic channel
    pub fn build(self) -> Logger {
        let logger = Logger::start(&self);
        for (name, config) in self.initial_adapters() {
            if let Err(e) = logger.set_adapter(&name, &config) {
                if !e.is_adapter_init() {
                    logger.shared.report(&e);
                }
            }
        }
        logger
    }

    /// Build the Logger, failing on the first adapter that cannot be
    /// activated
    pub fn try_build(self) -> Result<Logger> {
        let logger = Logger::start(&self);
        for (name, config) in self.initial_adapters() {
            if let Err(e) = logger.set_adapter(&name, &config) {
                logger.close();
                return Err(e);
            }
        }
        Ok(logger)
    }

    fn initial_adapters(&self) -> Vec<(String, String)> {
        let mut adapters = Vec::with_capacity(self.adapters.len() + 1);
        if self.default_console {
            adapters.push(("console".to_string(), String::new()));
        }
        adapters.extend(self.adapters.iter().cloned());
        adapters
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::caller::CallSite;
    use crate::core::cause::WithTrace;
    use std::time::Duration;

    type Events = Arc<Mutex<Vec<String>>>;

    /// Records every call so tests can assert on delivery and lifecycle
    struct Recording {
        events: Events,
        fail_init: bool,
        fail_write: bool,
    }

    impl Adapter for Recording {
        fn init(&mut self, config: &str) -> Result<()> {
            self.events.lock().push(format!("init:{}", config));
            if self.fail_init {
                Err(LoggerError::config("recording", "rejected"))
            } else {
                Ok(())
            }
        }

        fn write(&mut self, text: &str, severity: Severity) -> Result<()> {
            self.events.lock().push(format!("write:{}:{}", severity, text));
            if self.fail_write {
                Err(LoggerError::other("write rejected"))
            } else {
                Ok(())
            }
        }

        fn flush(&mut self) -> Result<()> {
            self.events.lock().push("flush".to_string());
            Ok(())
        }

        fn shutdown(&mut self) {
            self.events.lock().push("shutdown".to_string());
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn registry_with(events: &Events) -> Arc<AdapterRegistry> {
        let registry = AdapterRegistry::new();
        let ok = Arc::clone(events);
        registry.register("recording", move || {
            Box::new(Recording {
                events: Arc::clone(&ok),
                fail_init: false,
                fail_write: false,
            })
        });
        let bad = Arc::clone(events);
        registry.register("broken", move || {
            Box::new(Recording {
                events: Arc::clone(&bad),
                fail_init: true,
                fail_write: false,
            })
        });
        let failing = Arc::clone(events);
        registry.register("failing", move || {
            Box::new(Recording {
                events: Arc::clone(&failing),
                fail_init: false,
                fail_write: true,
            })
        });
        Arc::new(registry)
    }

    fn quiet_builder(registry: Arc<AdapterRegistry>) -> LoggerBuilder {
        Logger::builder()
            .registry(registry)
            .caller_annotation(false)
            .on_diagnostic(Arc::new(|_: &LoggerError| {}))
    }

    fn writes(events: &Events) -> Vec<String> {
        events
            .lock()
            .iter()
            .filter(|e| e.starts_with("write:"))
            .cloned()
            .collect()
    }

    #[test]
    fn test_new_defaults() {
        let logger = Logger::new(16);
        assert_eq!(logger.level(), Severity::Debug);
        assert_eq!(logger.caller_depth(), DEFAULT_CALLER_DEPTH);
        assert!(logger.caller_annotation_enabled());
        assert_eq!(logger.queue_capacity(), 16);
        assert_eq!(logger.activation_policy(), ActivationPolicy::Lenient);
        #[cfg(feature = "console")]
        assert_eq!(logger.adapter_names(), vec!["console"]);
        logger.close();
    }

    #[test]
    fn test_missing_console_is_not_fatal() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events)).build();
        assert!(logger.adapter_names().is_empty());
    }

    #[test]
    fn test_unknown_adapter() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .build();

        let err = logger.set_adapter("syslog", "").unwrap_err();
        assert!(matches!(err, LoggerError::UnknownAdapter { .. }));

        let err = logger.remove_adapter("syslog").unwrap_err();
        assert!(matches!(err, LoggerError::UnknownAdapter { .. }));
    }

    #[test]
    fn test_close_delivers_in_order_then_flushes_and_shuts_down() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .adapter("recording", "{}")
            .build();

        for i in 0..20 {
            logger.info(&[&"message", &i]);
        }
        logger.close();

        let recorded = events.lock().clone();
        assert_eq!(recorded.first().map(String::as_str), Some("init:{}"));
        let expected: Vec<String> = (0..20)
            .map(|i| format!("write:Info:[Info] message {}", i))
            .collect();
        assert_eq!(writes(&events), expected);
        assert_eq!(
            &recorded[recorded.len() - 2..],
            &["flush".to_string(), "shutdown".to_string()]
        );
        assert_eq!(recorded.iter().filter(|e| e.as_str() == "flush").count(), 1);
        assert_eq!(recorded.iter().filter(|e| e.as_str() == "shutdown").count(), 1);
        assert_eq!(logger.metrics().dispatched(), 20);

        // Neither a second close nor drop retires the adapters again
        logger.close();
        drop(logger);
        assert_eq!(*events.lock(), recorded);
    }

    #[test]
    fn test_threshold_filters_before_enqueue() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .adapter("recording", "")
            .build();

        logger.set_level(Severity::Warn);
        logger.debug(&[&"dropped"]);
        logger.info(&[&"dropped"]);
        logger.warn(&[&"kept"]);
        logger.error(&[&"kept"]);
        logger.close();

        assert_eq!(
            writes(&events),
            vec!["write:Warn:[Warn] kept", "write:Error:[Error] kept"]
        );
        assert_eq!(logger.metrics().filtered(), 2);
        assert_eq!(logger.metrics().enqueued(), 2);
    }

    #[test]
    fn test_lenient_policy_keeps_failed_adapter() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .build();

        let err = logger.set_adapter("broken", "").unwrap_err();
        assert!(err.is_adapter_init());
        assert!(logger.has_adapter("broken"));

        logger.info(&[&"still delivered"]);
        logger.close();
        assert_eq!(writes(&events), vec!["write:Info:[Info] still delivered"]);
    }

    #[test]
    fn test_strict_policy_rolls_back_failed_adapter() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .activation_policy(ActivationPolicy::Strict)
            .build();

        let err = logger.set_adapter("broken", "").unwrap_err();
        assert!(err.is_adapter_init());
        assert!(!logger.has_adapter("broken"));
        assert_eq!(events.lock().as_slice(), &["init:", "shutdown"]);
    }

    #[test]
    fn test_replacing_adapter_retires_previous_instance() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .build();

        logger.set_adapter("recording", "first").unwrap();
        logger.set_adapter("recording", "second").unwrap();

        assert_eq!(
            events.lock().as_slice(),
            &["init:first", "init:second", "flush", "shutdown"]
        );
        assert_eq!(logger.adapter_names(), vec!["recording"]);
    }

    #[test]
    fn test_remove_adapter_stops_delivery() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .adapter("recording", "")
            .build();

        logger.info(&[&"before"]);
        // Wait for the worker to deliver "before"
        while logger.metrics().dispatched() < 1 {
            thread::sleep(Duration::from_millis(1));
        }
        logger.remove_adapter("recording").unwrap();
        logger.info(&[&"after"]);
        logger.close();

        assert_eq!(writes(&events), vec!["write:Info:[Info] before"]);
    }

    #[test]
    fn test_write_failure_is_reported_and_others_still_receive() {
        let events = Events::default();
        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reported);

        let logger = Logger::builder()
            .registry(registry_with(&events))
            .caller_annotation(false)
            .default_console(false)
            .on_diagnostic(Arc::new(move |e: &LoggerError| sink.lock().push(e.to_string())))
            .adapter("failing", "")
            .adapter("recording", "")
            .build();

        logger.error(&[&"boom"]);
        logger.close();

        // Both adapters record the write; only "failing" reports an error
        assert_eq!(writes(&events).len(), 2);
        assert_eq!(logger.metrics().write_failures(), 1);
        let reported = reported.lock();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("adapter 'failing' failed to write message"));
    }

    #[test]
    fn test_caller_annotation_uses_resolver() {
        let events = Events::default();
        let resolver = |depth: usize, _loc: &'static Location<'static>| -> Option<CallSite> {
            Some(CallSite::new("/tmp/stub.rs", depth as u32))
        };
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .caller_annotation(true)
            .caller_depth(9)
            .caller_resolver(Arc::new(resolver))
            .adapter("recording", "")
            .build();

        logger.info(&[&"hi"]);
        logger.enable_caller_annotation(false);
        logger.info(&[&"plain"]);
        logger.close();

        assert_eq!(
            writes(&events),
            vec![
                "write:Info:[stub.rs:9] [Info] hi",
                "write:Info:[Info] plain",
            ]
        );
    }

    #[test]
    fn test_unresolved_caller_omits_prefix() {
        let events = Events::default();
        let resolver =
            |_depth: usize, _loc: &'static Location<'static>| -> Option<CallSite> { None };
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .caller_annotation(true)
            .caller_resolver(Arc::new(resolver))
            .adapter("recording", "")
            .build();

        logger.warn(&[&"no site"]);
        logger.close();
        assert_eq!(writes(&events), vec!["write:Warn:[Warn] no site"]);
    }

    #[test]
    fn test_default_annotation_points_at_call_site() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .caller_annotation(true)
            .adapter("recording", "")
            .build();

        let line = line!() + 1;
        logger.info(&[&"located"]);
        logger.close();

        assert_eq!(
            writes(&events),
            vec![format!("write:Info:[logger.rs:{}] [Info] located", line)]
        );
    }

    #[test]
    fn test_emit_with_cause_appends_trace() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .adapter("recording", "")
            .build();

        let trace = "frame a\nframe b";
        let cause = WithTrace {
            code: "E7",
            trace: &trace,
        };
        logger.error_with_cause(&[&"query failed"], &cause);
        logger.close();

        assert_eq!(
            writes(&events),
            vec!["write:Error:[Error] query failed\nframe a\nframe b"]
        );
    }

    #[test]
    fn test_pretty_emits_at_debug() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .adapter("recording", "")
            .build();

        logger.pretty("", &vec![1, 2]);
        logger.pretty("numbers", &vec![3]);
        logger.set_level(Severity::Info);
        logger.pretty("hidden", &vec![4]);
        logger.close();

        let expected_first = format!(
            "write:Debug:[Pretty]\n{}\n[\n  1,\n  2\n]",
            std::any::type_name::<Vec<i32>>()
        );
        assert_eq!(
            writes(&events),
            vec![
                expected_first,
                "write:Debug:[Pretty]\nnumbers\n[\n  3\n]".to_string(),
            ]
        );
    }

    #[test]
    fn test_closed_logger_rejects_management() {
        let events = Events::default();
        let logger = quiet_builder(registry_with(&events))
            .default_console(false)
            .build();
        logger.close();
        logger.close();

        assert!(logger.is_closed());
        assert!(matches!(
            logger.set_adapter("recording", ""),
            Err(LoggerError::LoggerClosed)
        ));
        logger.info(&[&"ignored"]);
        assert_eq!(logger.metrics().enqueued(), 0);
    }

    #[test]
    fn test_try_build_fails_on_bad_adapter() {
        let events = Events::default();
        let result = quiet_builder(registry_with(&events))
            .default_console(false)
            .adapter("broken", "")
            .try_build();
        assert!(matches!(result, Err(LoggerError::AdapterInit { .. })));
    }
}
