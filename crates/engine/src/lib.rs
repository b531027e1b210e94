#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # evalid
//!
//! A declarative, scenario-aware object-validation engine.
//!
//! Rules are registered against attribute paths of a JSON target and grouped
//! into [`RuleGroup`]s. Groups registered without a scenario always run;
//! groups registered under a scenario name run only when that scenario is
//! requested. Each group evaluates its rules strictly in order, groups run
//! concurrently, and the per-attribute error messages merge back in
//! registration order into an immutable [`Report`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use evalid::{Engine, Rule, RuleGroup};
//! use serde_json::json;
//!
//! let mut engine = Engine::with_checks(evalid_checks::registry());
//! engine.add_rules(
//!     RuleGroup::new()
//!         .rule("name", Rule::check("notEmpty").with_message("Name is empty!"))
//!         .rule("email", Rule::check("isEmail")),
//! );
//!
//! let mut target = json!({ "name": "flux", "email": "flux@example.com" });
//! let report = engine.validate(&mut target).await?;
//! assert!(!report.has_errors());
//! ```
//!
//! ## Rule shapes
//!
//! An attribute maps to one or more [`Rule`]s, each one of:
//!
//! - [`Rule::check`] — a named predicate looked up in the engine's
//!   [`CheckRegistry`] (`{name, args, message, allow_empty}`).
//! - [`Rule::sync`] — a synchronous closure over the resolved value and a
//!   [`RuleContext`].
//! - [`Rule::async_fn`] — a future-producing closure for rules that need to
//!   await (lookups, rate limits, anything I/O-shaped).
//!
//! Custom rules accumulate messages through [`RuleContext::add_error`], stop
//! their group cooperatively by returning [`RuleFlow::EarlyExit`], or abort
//! the whole call by returning an [`EngineError`].

// Boxed rule closures produce involved types at the dispatch seams; the
// aliases in `rule` keep the public surface readable.
#![allow(clippy::type_complexity)]

pub mod context;
pub mod engine;
pub mod error;
pub mod exec;
pub mod path;
pub mod registry;
pub mod report;
pub mod rule;

pub use context::RuleContext;
pub use engine::Engine;
pub use error::{BoxError, EngineError};
pub use exec::ExitScope;
pub use registry::{CheckFn, CheckRegistry};
pub use report::{ErrorMap, Report};
pub use rule::{CheckRule, Rule, RuleFlow, RuleGroup, RuleResult};

/// Common imports for building and running validations.
pub mod prelude {
    pub use crate::{
        CheckRegistry, Engine, EngineError, ExitScope, Report, Rule, RuleContext, RuleFlow,
        RuleGroup, RuleResult,
    };
}
