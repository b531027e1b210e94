//! Pluggable registry of named check predicates.
//!
//! The engine never hard-codes a predicate library; it looks check rules up
//! here by name. `evalid-checks` ships a registry seeded with the standard
//! string/format/numeric checks, and callers may register their own.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A named check predicate: `(value, args) -> bool`.
///
/// `value` is the resolved attribute value (`None` when the path did not
/// resolve); `args` are the extra arguments from the check descriptor.
pub type CheckFn = dyn Fn(Option<&Value>, &[Value]) -> bool + Send + Sync;

/// Name → predicate table consulted by check rules.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<String, Arc<CheckFn>>,
}

impl CheckRegistry {
    /// New empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(Option<&Value>, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.checks.insert(name.into(), Arc::new(check));
    }

    /// Register `alias` for an existing check. Returns `false` (and
    /// registers nothing) when `name` is unknown.
    pub fn alias(&mut self, alias: impl Into<String>, name: &str) -> bool {
        match self.checks.get(name) {
            Some(check) => {
                let check = Arc::clone(check);
                self.checks.insert(alias.into(), check);
                true
            }
            None => false,
        }
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Arc<CheckFn>> {
        self.checks.get(name)
    }

    /// Registered check names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }

    /// Number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.checks.len())
            .finish()
    }
}
