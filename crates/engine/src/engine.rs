//! The validation engine: rule registration and orchestration.

use std::sync::Arc;

use futures::future;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::EngineError;
use crate::exec::{self, ExitScope};
use crate::registry::CheckRegistry;
use crate::report::{ErrorMap, Report};
use crate::rule::RuleGroup;

/// Accumulates rule groups and validates targets against them.
///
/// Always-groups run on every call; scenario groups run only when their
/// scenario is requested. All selected groups run concurrently within the
/// caller's task and their error maps merge in registration order, so final
/// per-attribute message order is deterministic regardless of which group
/// settles first.
///
/// The engine holds no per-call state: every `validate` call builds its own
/// shared target and contexts, so one engine instance can serve concurrent
/// calls. Registration borrows the engine mutably, which also guarantees
/// groups cannot change under an in-flight call.
#[derive(Debug, Default)]
pub struct Engine {
    checks: CheckRegistry,
    always: Vec<RuleGroup>,
    scenarios: IndexMap<String, Vec<RuleGroup>>,
    exit_scope: ExitScope,
}

impl Engine {
    /// New engine with an empty check registry; only custom rules will work
    /// until checks are registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// New engine over the given check registry (typically
    /// `evalid_checks::registry()`).
    #[must_use]
    pub fn with_checks(checks: CheckRegistry) -> Self {
        Self {
            checks,
            ..Self::default()
        }
    }

    /// Choose the early-exit blast radius for all groups.
    #[must_use]
    pub fn with_exit_scope(mut self, scope: ExitScope) -> Self {
        self.exit_scope = scope;
        self
    }

    /// The engine's check registry, for registering project-specific checks.
    pub fn checks_mut(&mut self) -> &mut CheckRegistry {
        &mut self.checks
    }

    /// Append a group that runs on every `validate` call.
    pub fn add_rules(&mut self, group: RuleGroup) -> &mut Self {
        self.always.push(group);
        self
    }

    /// Append a group under `scenario`, creating the scenario on first use.
    pub fn add_scenario_rules(
        &mut self,
        scenario: impl Into<String>,
        group: RuleGroup,
    ) -> &mut Self {
        self.scenarios.entry(scenario.into()).or_default().push(group);
        self
    }

    /// Whether `scenario` has been registered.
    #[must_use]
    pub fn has_scenario(&self, scenario: &str) -> bool {
        self.scenarios.contains_key(scenario)
    }

    /// Validate `target` against the always-groups.
    ///
    /// Rule-driven normalization writes back into `target` on successful
    /// completion. A non-object target is validated as an empty object and
    /// left untouched.
    pub async fn validate(&self, target: &mut Value) -> Result<Report, EngineError> {
        self.run(target, None).await
    }

    /// Validate against the always-groups plus the groups of `scenario`.
    ///
    /// The scenario must be registered; an unknown name is a hard failure
    /// raised before any group runs.
    pub async fn validate_in(
        &self,
        target: &mut Value,
        scenario: &str,
    ) -> Result<Report, EngineError> {
        self.run(target, Some(scenario)).await
    }

    /// Continuation-style variant: drives the validation and hands the
    /// outcome to `done` instead of returning it.
    pub async fn validate_with<F>(&self, target: &mut Value, scenario: Option<&str>, done: F)
    where
        F: FnOnce(Result<Report, EngineError>),
    {
        done(self.run(target, scenario).await);
    }

    async fn run(&self, target: &mut Value, scenario: Option<&str>) -> Result<Report, EngineError> {
        let scenario_groups = match scenario {
            Some(name) => Some(
                self.scenarios
                    .get(name)
                    .ok_or_else(|| EngineError::UnknownScenario(name.to_owned()))?,
            ),
            None => None,
        };

        let selected: Vec<&RuleGroup> = self
            .always
            .iter()
            .chain(scenario_groups.into_iter().flatten())
            .collect();
        if selected.is_empty() {
            return Ok(Report::default());
        }

        debug!(groups = selected.len(), ?scenario, "running validation");

        // Per-call shared target: an absent or non-object target validates
        // as an empty object, and its mutations are discarded.
        let was_object = target.is_object();
        let value = if was_object {
            std::mem::take(target)
        } else {
            Value::Object(serde_json::Map::new())
        };
        let shared = Arc::new(Mutex::new(value));

        let runs = selected
            .iter()
            .map(|group| exec::run_group(&self.checks, &shared, group, self.exit_scope));
        let outcome = future::try_join_all(runs).await;

        // Hand the (possibly normalized) target back before reporting, on
        // failure as well. All group futures have settled or been dropped
        // here, so the Arc is sole ownership again in practice.
        let value = Arc::try_unwrap(shared)
            .map_or_else(|shared| shared.lock().clone(), Mutex::into_inner);
        if was_object {
            *target = value;
        }

        let maps = outcome?;
        let report = Report::new(merge(maps));
        trace!(errors = report.error_count(), "validation settled");
        Ok(report)
    }
}

/// Merge per-group error maps in registration order, concatenating message
/// lists per attribute.
fn merge(maps: Vec<ErrorMap>) -> ErrorMap {
    let mut merged = ErrorMap::new();
    for map in maps {
        for (attr, errors) in map {
            merged.entry(attr).or_default().extend(errors);
        }
    }
    merged
}
