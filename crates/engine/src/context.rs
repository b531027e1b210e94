//! Per-invocation rule context.
//!
//! Everything call-scoped lives here rather than on the engine, so
//! concurrent `validate` calls on one engine instance never share mutable
//! state.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::EngineError;
use crate::path;
use crate::rule::RuleFlow;

/// Capability handle passed to custom rules.
///
/// The context is owned and clonable so asynchronous rules can move it into
/// their futures. It shares the validation target of the current call; the
/// target lock is only ever held inside a single accessor, never across an
/// await point.
#[derive(Debug, Clone)]
pub struct RuleContext {
    attr: Arc<str>,
    target: Arc<Mutex<Value>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RuleContext {
    pub(crate) fn new(attr: &str, target: Arc<Mutex<Value>>) -> Self {
        Self {
            attr: Arc::from(attr),
            target,
            errors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The attribute path this rule was registered for.
    #[must_use]
    pub fn attr(&self) -> &str {
        &self.attr
    }

    /// Re-read this rule's own attribute from the target.
    ///
    /// Useful after a sibling rule (or this one) normalized the value with
    /// [`set`](Self::set).
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.get(&self.attr)
    }

    /// Read any attribute of the target, with the same literal-key
    /// precedence and dot-path traversal as rule resolution.
    #[must_use]
    pub fn get(&self, attr: &str) -> Option<Value> {
        path::resolve(&self.target.lock(), attr).cloned()
    }

    /// Write a literal top-level attribute on the target.
    ///
    /// This is a real mutation of the object under validation, visible to
    /// every subsequent rule and to the caller once the run completes. It is
    /// the intended normalization hook (trimming, canonicalizing case, ...).
    pub fn set(&self, attr: &str, value: impl Into<Value>) {
        path::write(&mut self.target.lock(), attr, value.into());
    }

    /// Record a validation message for this rule's attribute.
    pub fn add_error(&self, message: impl Into<String>) {
        self.errors.lock().push(message.into());
    }

    /// Whether this invocation has recorded any message yet.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.lock().is_empty()
    }

    /// The cooperative early-exit signal, for rules that want to stop
    /// further evaluation without failing:
    /// `return Ok(ctx.early_exit());`
    #[must_use]
    pub fn early_exit(&self) -> RuleFlow {
        RuleFlow::EarlyExit
    }

    /// Hard failure attributed to this rule's attribute.
    #[must_use]
    pub fn fail(&self, reason: impl Into<String>) -> EngineError {
        EngineError::message(self.attr.as_ref(), reason)
    }

    /// Drain accumulated messages; called by the executor after the rule
    /// settles.
    pub(crate) fn take_errors(&self) -> Vec<String> {
        std::mem::take(&mut self.errors.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context_for(attr: &str, target: Value) -> RuleContext {
        RuleContext::new(attr, Arc::new(Mutex::new(target)))
    }

    #[test]
    fn value_reads_own_attribute() {
        let ctx = context_for("name", json!({ "name": "flux" }));
        assert_eq!(ctx.value(), Some(json!("flux")));
    }

    #[test]
    fn get_resolves_nested_paths() {
        let ctx = context_for("name", json!({ "a": { "b": 1 } }));
        assert_eq!(ctx.get("a.b"), Some(json!(1)));
        assert_eq!(ctx.get("a.missing"), None);
    }

    #[test]
    fn set_mutates_shared_target() {
        let target = Arc::new(Mutex::new(json!({ "name": " flux " })));
        let ctx = RuleContext::new("name", Arc::clone(&target));
        ctx.set("name", "flux");
        assert_eq!(*target.lock(), json!({ "name": "flux" }));
    }

    #[test]
    fn errors_accumulate_and_drain() {
        let ctx = context_for("name", json!({}));
        assert!(!ctx.has_errors());
        ctx.add_error("first");
        ctx.add_error("second");
        assert!(ctx.has_errors());
        assert_eq!(ctx.take_errors(), vec!["first", "second"]);
        assert!(!ctx.has_errors());
    }

    #[test]
    fn clones_share_buffer() {
        let ctx = context_for("name", json!({}));
        ctx.clone().add_error("from clone");
        assert_eq!(ctx.take_errors(), vec!["from clone"]);
    }

    #[test]
    fn fail_names_the_attribute() {
        let ctx = context_for("email", json!({}));
        assert!(ctx.fail("boom").to_string().contains("email"));
    }
}
