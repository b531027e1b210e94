//! Date checks: parsing and chronological comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use evalid::CheckRegistry;
use serde_json::Value;

use crate::coerce::{arg_text, text};

pub(crate) fn register(checks: &mut CheckRegistry) {
    checks.register("isDate", is_date);
    checks.register("isAfter", is_after);
    checks.register("isBefore", is_before);
}

/// Parse a date or datetime string. RFC 3339 first, then the common
/// `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` forms; a bare date lands on
/// midnight so dates and datetimes compare consistently.
fn parse_moment(t: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn is_date(value: Option<&Value>, _args: &[Value]) -> bool {
    parse_moment(&text(value)).is_some()
}

/// `isAfter([date])` — strictly after the argument, or after now when no
/// argument is given. An unparseable value or argument fails.
fn is_after(value: Option<&Value>, args: &[Value]) -> bool {
    compare(value, args).is_some_and(|(moment, bound)| moment > bound)
}

/// `isBefore([date])` — strictly before the argument, or before now when no
/// argument is given.
fn is_before(value: Option<&Value>, args: &[Value]) -> bool {
    compare(value, args).is_some_and(|(moment, bound)| moment < bound)
}

fn compare(
    value: Option<&Value>,
    args: &[Value],
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let moment = parse_moment(&text(value))?;
    let bound = if args.is_empty() {
        Utc::now().naive_utc()
    } else {
        parse_moment(&arg_text(args, 0))?
    };
    Some((moment, bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dates_parse_in_common_forms() {
        assert!(is_date(Some(&json!("2024-02-29")), &[]));
        assert!(is_date(Some(&json!("2024-01-15T10:30:00Z")), &[]));
        assert!(is_date(Some(&json!("2024-01-15 10:30:00")), &[]));
        assert!(!is_date(Some(&json!("2023-02-29")), &[]));
        assert!(!is_date(Some(&json!("not a date")), &[]));
        assert!(!is_date(None, &[]));
    }

    #[test]
    fn after_and_before_against_an_argument() {
        assert!(is_after(Some(&json!("2024-06-01")), &[json!("2024-01-01")]));
        assert!(!is_after(Some(&json!("2024-01-01")), &[json!("2024-06-01")]));
        assert!(is_before(Some(&json!("2024-01-01")), &[json!("2024-06-01")]));
        assert!(!is_before(Some(&json!("2024-06-01")), &[json!("2024-01-01")]));
    }

    #[test]
    fn comparison_is_strict() {
        assert!(!is_after(Some(&json!("2024-01-01")), &[json!("2024-01-01")]));
        assert!(!is_before(Some(&json!("2024-01-01")), &[json!("2024-01-01")]));
    }

    #[test]
    fn missing_argument_compares_against_now() {
        assert!(is_after(Some(&json!("2999-01-01")), &[]));
        assert!(!is_after(Some(&json!("1999-01-01")), &[]));
        assert!(is_before(Some(&json!("1999-01-01")), &[]));
    }

    #[test]
    fn unparseable_input_fails() {
        assert!(!is_after(Some(&json!("soon")), &[json!("2024-01-01")]));
        assert!(!is_after(Some(&json!("2024-06-01")), &[json!("later")]));
    }
}
