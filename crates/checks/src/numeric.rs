//! Numeric checks over text-coerced values.

use evalid::CheckRegistry;
use serde_json::Value;

use crate::coerce::{arg_f64, text};

pub(crate) fn register(checks: &mut CheckRegistry) {
    checks.register("isInt", is_int);
    checks.register("isFloat", is_float);
    checks.register("isDivisibleBy", is_divisible_by);
    checks.register("min", min);
    checks.register("max", max);
    checks.register("isIn", is_in);
}

/// Decimal integer with an optional sign and no leading zeros.
fn is_int(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    let digits = t.strip_prefix('-').unwrap_or(&t);
    match digits.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        rest => rest.iter().all(u8::is_ascii_digit),
    }
}

/// Finite decimal number, integer or fractional.
fn is_float(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    t.contains(|c: char| c.is_ascii_digit()) && t.parse::<f64>().is_ok_and(f64::is_finite)
}

/// `isDivisibleBy(n)`.
fn is_divisible_by(value: Option<&Value>, args: &[Value]) -> bool {
    let Ok(number) = text(value).parse::<f64>() else {
        return false;
    };
    match arg_f64(args, 0) {
        Some(divisor) if divisor != 0.0 => number % divisor == 0.0,
        _ => false,
    }
}

/// `min(bound)` — passes non-numeric values through, as the value may be
/// covered by a dedicated numeric check in the same rule list.
fn min(value: Option<&Value>, args: &[Value]) -> bool {
    let Ok(number) = text(value).parse::<f64>() else {
        return true;
    };
    arg_f64(args, 0).is_none_or(|bound| number >= bound)
}

/// `max(bound)` — same pass-through behavior as `min`.
fn max(value: Option<&Value>, args: &[Value]) -> bool {
    let Ok(number) = text(value).parse::<f64>() else {
        return true;
    };
    arg_f64(args, 0).is_none_or(|bound| number <= bound)
}

/// `isIn(values)` — membership in the array argument, with text coercion
/// on both sides.
fn is_in(value: Option<&Value>, args: &[Value]) -> bool {
    let t = text(value);
    args.first()
        .and_then(Value::as_array)
        .is_some_and(|allowed| allowed.iter().any(|candidate| text(Some(candidate)) == t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers() {
        assert!(is_int(Some(&json!("42")), &[]));
        assert!(is_int(Some(&json!("-7")), &[]));
        assert!(is_int(Some(&json!("0")), &[]));
        assert!(is_int(Some(&json!(42)), &[]));
        assert!(!is_int(Some(&json!("007")), &[]));
        assert!(!is_int(Some(&json!("4.2")), &[]));
        assert!(!is_int(Some(&json!("")), &[]));
    }

    #[test]
    fn floats() {
        assert!(is_float(Some(&json!("4.2")), &[]));
        assert!(is_float(Some(&json!("-0.5")), &[]));
        assert!(is_float(Some(&json!("42")), &[]));
        assert!(!is_float(Some(&json!("abc")), &[]));
        assert!(!is_float(Some(&json!("NaN")), &[]));
        assert!(!is_float(None, &[]));
    }

    #[test]
    fn divisibility() {
        assert!(is_divisible_by(Some(&json!("10")), &[json!(5)]));
        assert!(!is_divisible_by(Some(&json!("10")), &[json!(3)]));
        assert!(!is_divisible_by(Some(&json!("10")), &[json!(0)]));
        assert!(!is_divisible_by(Some(&json!("abc")), &[json!(5)]));
    }

    #[test]
    fn min_and_max_bounds() {
        assert!(min(Some(&json!(10)), &[json!(5)]));
        assert!(!min(Some(&json!(3)), &[json!(5)]));
        assert!(max(Some(&json!(3)), &[json!(5)]));
        assert!(!max(Some(&json!(10)), &[json!(5)]));
    }

    #[test]
    fn min_and_max_pass_non_numeric_values() {
        assert!(min(Some(&json!("abc")), &[json!(5)]));
        assert!(max(Some(&json!("abc")), &[json!(5)]));
        assert!(min(None, &[json!(5)]));
    }

    #[test]
    fn membership() {
        let allowed = json!(["red", "green", "blue"]);
        assert!(is_in(Some(&json!("green")), &[allowed.clone()]));
        assert!(!is_in(Some(&json!("black")), &[allowed.clone()]));
        // coercion: numbers compare by display form
        assert!(is_in(Some(&json!(2)), &[json!([1, 2, 3])]));
        assert!(!is_in(Some(&json!("x")), &[]));
    }
}
