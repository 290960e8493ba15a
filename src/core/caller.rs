//! Call-site resolution for message annotation

use std::panic::Location;
use std::path::Path;

/// Source position a message was emitted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// `[<basename>:<line>] ` prefix prepended to annotated messages
    pub fn prefix(&self) -> String {
        let basename = Path::new(&self.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.file);
        format!("[{}:{}] ", basename, self.line)
    }
}

/// Resolves the call site of an emit operation.
///
/// `depth` is the logger's configured caller depth; `tracked` is the location
/// propagated through the `#[track_caller]` emit chain. Returning `None`
/// leaves the message unannotated.
pub trait CallerResolver: Send + Sync {
    fn resolve(&self, depth: usize, tracked: &'static Location<'static>) -> Option<CallSite>;
}

/// Default resolver: the location recorded by `#[track_caller]`.
///
/// Every public emit entry point is `#[track_caller]`, so the tracked location
/// is already the user's call site regardless of how many wrappers sit in
/// between. The depth is therefore not consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackedCallerResolver;

impl CallerResolver for TrackedCallerResolver {
    fn resolve(&self, _depth: usize, tracked: &'static Location<'static>) -> Option<CallSite> {
        Some(CallSite::new(tracked.file(), tracked.line()))
    }
}

impl<F> CallerResolver for F
where
    F: Fn(usize, &'static Location<'static>) -> Option<CallSite> + Send + Sync,
{
    fn resolve(&self, depth: usize, tracked: &'static Location<'static>) -> Option<CallSite> {
        self(depth, tracked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_uses_basename() {
        let site = CallSite::new("src/server/handler.rs", 42);
        assert_eq!(site.prefix(), "[handler.rs:42] ");
    }

    #[test]
    fn test_tracked_resolver_reports_this_file() {
        let site = TrackedCallerResolver
            .resolve(2, Location::caller())
            .expect("tracked location always resolves");
        assert!(site.file.ends_with("caller.rs"));
        assert!(site.line > 0);
    }

    #[test]
    fn test_tracked_resolver_ignores_depth() {
        let here = Location::caller();
        assert_eq!(
            TrackedCallerResolver.resolve(0, here),
            TrackedCallerResolver.resolve(9, here)
        );
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |_depth: usize, _loc: &'static Location<'static>| -> Option<CallSite> { None };
        assert!(resolver.resolve(4, Location::caller()).is_none());
    }
}
