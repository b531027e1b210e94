//! Engine error types.
//!
//! Hard failures are kept strictly apart from validation messages: an
//! [`EngineError`] aborts the in-flight call and no [`Report`](crate::Report)
//! is produced, while validation messages accumulate inside a successfully
//! produced `Report` and never abort evaluation on their own.

use thiserror::Error;

/// Boxed error type carried by failing user rules.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Operational failures raised during rule registration lookup or execution.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A check rule referenced a name that is not in the [`CheckRegistry`](crate::CheckRegistry).
    #[error("unknown check `{check}` for attribute `{attr}`")]
    UnknownCheck {
        /// The unregistered check name.
        check: String,
        /// Attribute the rule was registered for.
        attr: String,
    },

    /// A rule descriptor was malformed.
    #[error("invalid rule for attribute `{attr}`: {reason}")]
    InvalidRule {
        /// Attribute the rule was registered for.
        attr: String,
        /// What was wrong with the descriptor.
        reason: String,
    },

    /// `validate` requested a scenario that was never registered.
    #[error("scenario not registered: {0}")]
    UnknownScenario(String),

    /// A user rule failed hard (as opposed to adding a validation message).
    #[error("rule for attribute `{attr}` failed: {source}")]
    Rule {
        /// Attribute the rule was running for.
        attr: String,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },
}

impl EngineError {
    /// Wrap an arbitrary error as a hard rule failure for `attr`.
    pub fn rule(attr: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Rule {
            attr: attr.into(),
            source: source.into(),
        }
    }

    /// Hard rule failure described by a plain message.
    pub fn message(attr: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self::Rule {
            attr: attr.into(),
            source: reason.into(),
        }
    }
}
