//! Rule and group execution.
//!
//! A group's rules run strictly sequentially: step *k+1* does not start
//! until step *k* fully settles, including any future an async rule
//! produced. Suspension points exist only at async rules; sync steps run to
//! completion without yielding.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

use crate::context::RuleContext;
use crate::error::EngineError;
use crate::path;
use crate::registry::CheckRegistry;
use crate::report::ErrorMap;
use crate::rule::{CheckRule, Rule, RuleFlow, RuleGroup, RuleResult};

/// Blast radius of [`RuleFlow::EarlyExit`] within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitScope {
    /// Early exit stops the remaining rules of the exiting attribute only;
    /// sibling attributes in the group still run (default).
    #[default]
    Attribute,
    /// Early exit stops the remainder of the whole group, sibling
    /// attributes included. This matches engines that flatten a group into
    /// one shared queue; prefer [`ExitScope::Attribute`] unless you rely on
    /// that coupling.
    Group,
}

/// Run one rule group to completion, producing its per-attribute error map.
///
/// A hard failure at any step aborts the rest of the group and propagates.
pub(crate) async fn run_group(
    checks: &CheckRegistry,
    target: &Arc<Mutex<Value>>,
    group: &RuleGroup,
    scope: ExitScope,
) -> Result<ErrorMap, EngineError> {
    let mut map = ErrorMap::new();

    'attrs: for (attr, rules) in &group.rules {
        for rule in rules {
            match run_rule(checks, target, attr, rule, &mut map).await? {
                RuleFlow::Continue => {}
                RuleFlow::EarlyExit => {
                    trace!(attr, ?scope, "rule requested early exit");
                    match scope {
                        ExitScope::Attribute => continue 'attrs,
                        ExitScope::Group => break 'attrs,
                    }
                }
            }
        }
    }

    Ok(map)
}

/// Run a single rule against the resolved attribute value, folding any
/// messages it produced into `map`. Empty entries never appear.
async fn run_rule(
    checks: &CheckRegistry,
    target: &Arc<Mutex<Value>>,
    attr: &str,
    rule: &Rule,
    map: &mut ErrorMap,
) -> RuleResult {
    let value = path::resolve(&target.lock(), attr).cloned();
    let ctx = RuleContext::new(attr, Arc::clone(target));

    let flow = match rule {
        Rule::Check(check) => run_check(checks, attr, check, value.as_ref(), &ctx)?,
        Rule::Sync(rule) => rule(value.as_ref(), &ctx)?,
        Rule::Async(rule) => rule(value, ctx.clone()).await?,
    };

    let errors = ctx.take_errors();
    if !errors.is_empty() {
        map.entry(attr.to_owned()).or_default().extend(errors);
    }
    Ok(flow)
}

fn run_check(
    checks: &CheckRegistry,
    attr: &str,
    check: &CheckRule,
    value: Option<&Value>,
    ctx: &RuleContext,
) -> RuleResult {
    if check.name.is_empty() {
        return Err(EngineError::InvalidRule {
            attr: attr.to_owned(),
            reason: "check rule has an empty name".to_owned(),
        });
    }

    if check.allow_empty && is_falsy(value) {
        return Ok(RuleFlow::Continue);
    }

    let Some(predicate) = checks.get(&check.name) else {
        return Err(EngineError::UnknownCheck {
            check: check.name.clone(),
            attr: attr.to_owned(),
        });
    };

    if !predicate(value, &check.args) {
        ctx.add_error(check.message.clone().unwrap_or_else(|| check.name.clone()));
    }
    Ok(RuleFlow::Continue)
}

/// Falsy in the `allow_empty` sense: absent, null, `false`, `0`, or the
/// empty string.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f == 0.0),
        Some(_) => false,
    }
}
