//! Value-to-text coercion shared by all checks.

use std::borrow::Cow;

use serde_json::Value;

/// Coerce a resolved value to text: absent and null become the empty
/// string, strings pass through, everything else uses its display form.
pub(crate) fn text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Coerce argument `index` to text (empty when absent).
pub(crate) fn arg_text(args: &[Value], index: usize) -> Cow<'_, str> {
    text(args.get(index))
}

/// Argument `index` as a number, accepting numeric strings.
pub(crate) fn arg_f64(args: &[Value], index: usize) -> Option<f64> {
    let arg = args.get(index)?;
    arg.as_f64()
        .or_else(|| arg.as_str().and_then(|s| s.parse().ok()))
}

/// Argument `index` as an unsigned count, accepting numeric strings.
pub(crate) fn arg_u64(args: &[Value], index: usize) -> Option<u64> {
    let arg = args.get(index)?;
    arg.as_u64()
        .or_else(|| arg.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_coerce_to_empty() {
        assert_eq!(text(None), "");
        assert_eq!(text(Some(&json!(null))), "");
    }

    #[test]
    fn scalars_coerce_to_display_form() {
        assert_eq!(text(Some(&json!("abc"))), "abc");
        assert_eq!(text(Some(&json!(42))), "42");
        assert_eq!(text(Some(&json!(true))), "true");
    }

    #[test]
    fn numeric_args_accept_strings() {
        assert_eq!(arg_f64(&[json!("2.5")], 0), Some(2.5));
        assert_eq!(arg_u64(&[json!("16")], 0), Some(16));
        assert_eq!(arg_u64(&[json!(16)], 0), Some(16));
        assert_eq!(arg_f64(&[], 0), None);
    }
}
