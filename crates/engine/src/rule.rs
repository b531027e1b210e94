//! Rule descriptors and rule groups.
//!
//! A [`Rule`] is a tagged descriptor: its calling convention is chosen at
//! registration time, never inferred from the shape of the function. A
//! [`RuleGroup`] is an ordered map from attribute path to the rules declared
//! for it; both the attribute order and the per-attribute rule order are
//! insertion order, and that order is the execution order within the group.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::Value;

use crate::context::RuleContext;
use crate::error::EngineError;

/// Cooperative outcome of one rule step.
///
/// `EarlyExit` is a success-like signal, distinct from both validation
/// messages and hard failures: it stops further rule evaluation in scope
/// (see [`ExitScope`](crate::ExitScope)) without the run being a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleFlow {
    /// Keep evaluating subsequent rules.
    #[default]
    Continue,
    /// Stop evaluating further rules in scope; not a failure.
    EarlyExit,
}

/// What a custom rule returns: a control-flow outcome or a hard failure.
pub type RuleResult = Result<RuleFlow, EngineError>;

/// Synchronous rule closure.
pub type SyncRuleFn = dyn Fn(Option<&Value>, &RuleContext) -> RuleResult + Send + Sync;

/// Future-producing rule closure.
pub type AsyncRuleFn =
    dyn Fn(Option<Value>, RuleContext) -> BoxFuture<'static, RuleResult> + Send + Sync;

/// A named-check descriptor: `{name, args, message, allow_empty}`.
///
/// The name is looked up in the engine's
/// [`CheckRegistry`](crate::CheckRegistry) at execution time; an unknown
/// name is a hard failure, not a validation error.
#[derive(Debug, Clone)]
pub struct CheckRule {
    pub(crate) name: String,
    pub(crate) args: Vec<Value>,
    pub(crate) message: Option<String>,
    pub(crate) allow_empty: bool,
}

impl CheckRule {
    /// New check descriptor with no args and the default message (the
    /// check's own name).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            message: None,
            allow_empty: false,
        }
    }

    /// Extra arguments handed to the predicate after the value.
    #[must_use]
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Message recorded when the predicate rejects the value.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Skip the predicate entirely when the value is absent or falsy
    /// (null, `false`, `0`, empty string).
    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

impl From<CheckRule> for Rule {
    fn from(check: CheckRule) -> Self {
        Self::Check(check)
    }
}

/// One validation rule for an attribute.
#[derive(Clone)]
pub enum Rule {
    /// Named predicate from the check registry.
    Check(CheckRule),
    /// Synchronous custom rule.
    Sync(Arc<SyncRuleFn>),
    /// Asynchronous custom rule.
    Async(Arc<AsyncRuleFn>),
}

impl Rule {
    /// Start a named-check descriptor; finish it with the [`CheckRule`]
    /// builder methods.
    ///
    /// ```rust,ignore
    /// let rule = Rule::check("len").with_args([2, 16]).with_message("2-16 chars");
    /// ```
    pub fn check(name: impl Into<String>) -> CheckRule {
        CheckRule::new(name)
    }

    /// A synchronous rule over the resolved value and its context.
    pub fn sync<F>(rule: F) -> Self
    where
        F: Fn(Option<&Value>, &RuleContext) -> RuleResult + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(rule))
    }

    /// An asynchronous rule. The closure receives the resolved value by
    /// value and an owned context it may move into the future.
    ///
    /// ```rust,ignore
    /// let rule = Rule::async_fn(|value, ctx| async move {
    ///     if taken(&value).await {
    ///         ctx.add_error("Name already taken");
    ///     }
    ///     Ok(RuleFlow::Continue)
    /// });
    /// ```
    pub fn async_fn<F, Fut>(rule: F) -> Self
    where
        F: Fn(Option<Value>, RuleContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RuleResult> + Send + 'static,
    {
        Self::Async(Arc::new(move |value, ctx| Box::pin(rule(value, ctx))))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check(check) => f.debug_tuple("Check").field(check).finish(),
            Self::Sync(_) => f.write_str("Sync(..)"),
            Self::Async(_) => f.write_str("Async(..)"),
        }
    }
}

/// An ordered mapping from attribute path to its declared rules.
///
/// A group is one sequential unit of evaluation; the engine runs distinct
/// groups concurrently. Groups are immutable once handed to the engine.
#[derive(Debug, Clone, Default)]
pub struct RuleGroup {
    pub(crate) rules: IndexMap<String, Vec<Rule>>,
}

impl RuleGroup {
    /// New empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule for `attr`, preserving declaration order.
    #[must_use]
    pub fn rule(mut self, attr: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.rules.entry(attr.into()).or_default().push(rule.into());
        self
    }

    /// Append a sequence of rules for `attr`.
    #[must_use]
    pub fn rules<I, R>(mut self, attr: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        self.rules
            .entry(attr.into())
            .or_default()
            .extend(rules.into_iter().map(Into::into));
        self
    }

    /// Number of attributes with declared rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the group declares no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
