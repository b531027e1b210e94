//! Immutable validation report.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Attribute path → ordered validation messages.
///
/// An attribute appears iff at least one rule produced a message for it;
/// message order equals rule execution order (merged across groups in group
/// registration order).
pub type ErrorMap = IndexMap<String, Vec<String>>;

/// Immutable snapshot of the merged error map of one `validate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    errors: ErrorMap,
}

impl Report {
    pub(crate) fn new(errors: ErrorMap) -> Self {
        Self { errors }
    }

    /// Whether any attribute collected a message.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Messages for one attribute, in execution order. Empty when the
    /// attribute has none.
    #[must_use]
    pub fn errors(&self, attr: &str) -> &[String] {
        self.errors.get(attr).map_or(&[], Vec::as_slice)
    }

    /// The full attribute → messages mapping.
    #[must_use]
    pub fn all(&self) -> &ErrorMap {
        &self.errors
    }

    /// Total number of messages across all attributes.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Consume the report, yielding the underlying map.
    #[must_use]
    pub fn into_inner(self) -> ErrorMap {
        self.errors
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("validation passed");
        }
        writeln!(f, "validation failed with {} message(s):", self.error_count())?;
        for (attr, messages) in &self.errors {
            for message in messages {
                writeln!(f, "  {attr}: {message}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(entries: &[(&str, &[&str])]) -> Report {
        Report::new(
            entries
                .iter()
                .map(|(attr, msgs)| {
                    (
                        (*attr).to_owned(),
                        msgs.iter().map(|m| (*m).to_owned()).collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn empty_report() {
        let report = Report::default();
        assert!(!report.has_errors());
        assert_eq!(report.errors("name"), &[] as &[String]);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn errors_keep_order() {
        let report = report(&[("name", &["A", "B"]), ("email", &["C"])]);
        assert!(report.has_errors());
        assert_eq!(report.errors("name"), ["A", "B"]);
        assert_eq!(report.errors("email"), ["C"]);
        assert_eq!(report.error_count(), 3);
    }

    #[test]
    fn missing_attribute_is_empty_slice() {
        let report = report(&[("name", &["A"])]);
        assert!(report.errors("email").is_empty());
    }

    #[test]
    fn display_lists_messages() {
        let report = report(&[("name", &["too short"])]);
        let rendered = report.to_string();
        assert!(rendered.contains("name: too short"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let report = report(&[("name", &["A"])]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({ "name": ["A"] }));
    }
}
