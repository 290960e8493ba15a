//! Adapter registry
//!
//! Maps adapter names to constructors. Every adapter implementation
//! registers itself once during startup wiring; loggers then look adapters up
//! by name when `set_adapter` is called.

use super::adapter::Adapter;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Constructor producing a fresh, uninitialized adapter instance
pub type AdapterConstructor = Arc<dyn Fn() -> Box<dyn Adapter> + Send + Sync>;

static GLOBAL: OnceLock<Arc<AdapterRegistry>> = OnceLock::new();

/// Name → constructor table, write-once per name.
///
/// # Example
///
/// ```
/// use adapter_logger::core::{Adapter, AdapterRegistry, Result, Severity};
///
/// struct Discard;
///
/// impl Adapter for Discard {
///     fn init(&mut self, _config: &str) -> Result<()> { Ok(()) }
///     fn write(&mut self, _text: &str, _severity: Severity) -> Result<()> { Ok(()) }
///     fn flush(&mut self) -> Result<()> { Ok(()) }
///     fn shutdown(&mut self) {}
///     fn name(&self) -> &str { "discard" }
/// }
///
/// let registry = AdapterRegistry::new();
/// registry.register("discard", || Box::new(Discard));
/// assert!(registry.lookup("discard").is_some());
/// ```
#[derive(Default)]
pub struct AdapterRegistry {
    constructors: RwLock<HashMap<String, AdapterConstructor>>,
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in adapters (`console`, `file`)
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        crate::adapters::register_builtins(&registry);
        registry
    }

    /// The process-wide registry, built-ins registered on first access
    pub fn global() -> Arc<AdapterRegistry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::with_builtins())))
    }

    /// Register `constructor` under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or already registered. Registration is
    /// startup wiring; either case is a programming error.
    pub fn register<F>(&self, name: &str, constructor: F)
    where
        F: Fn() -> Box<dyn Adapter> + Send + Sync + 'static,
    {
        if name.is_empty() {
            panic!("adapter_logger: register called with an empty adapter name");
        }

        let mut constructors = self.constructors.write();
        if constructors.contains_key(name) {
            panic!("adapter_logger: register called twice for adapter {}", name);
        }
        constructors.insert(name.to_string(), Arc::new(constructor));
    }

    pub fn lookup(&self, name: &str) -> Option<AdapterConstructor> {
        self.constructors.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    /// Registered adapter names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Register an adapter with the process-wide registry.
///
/// # Panics
///
/// See [`AdapterRegistry::register`].
pub fn register<F>(name: &str, constructor: F)
where
    F: Fn() -> Box<dyn Adapter> + Send + Sync + 'static,
{
    AdapterRegistry::global().register(name, constructor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Result, Severity};

    struct Null;

    impl Adapter for Null {
        fn init(&mut self, _config: &str) -> Result<()> {
            Ok(())
        }

        fn write(&mut self, _text: &str, _severity: Severity) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn shutdown(&mut self) {}

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = AdapterRegistry::new();
        registry.register("null", || Box::new(Null));

        let constructor = registry.lookup("null").expect("registered");
        assert_eq!(constructor().name(), "null");
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "adapter_logger: register called twice for adapter null")]
    fn test_duplicate_registration_panics() {
        let registry = AdapterRegistry::new();
        registry.register("null", || Box::new(Null));
        registry.register("null", || Box::new(Null));
    }

    #[test]
    #[should_panic(expected = "adapter_logger: register called with an empty adapter name")]
    fn test_empty_name_panics() {
        let registry = AdapterRegistry::new();
        registry.register("", || Box::new(Null));
    }

    #[test]
    fn test_names_sorted() {
        let registry = AdapterRegistry::new();
        registry.register("zeta", || Box::new(Null));
        registry.register("alpha", || Box::new(Null));
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
    }

    #[test]
    #[cfg(all(feature = "console", feature = "file"))]
    fn test_global_has_builtins() {
        let registry = AdapterRegistry::global();
        assert!(registry.contains("console"));
        assert!(registry.contains("file"));
    }
}
