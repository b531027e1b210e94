//! String content and shape checks.

use std::sync::LazyLock;

use evalid::CheckRegistry;
use regex::Regex;
use serde_json::Value;

use crate::coerce::{arg_text, arg_u64, text};

static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

pub(crate) fn register(checks: &mut CheckRegistry) {
    checks.register("notEmpty", not_empty);
    checks.register("notNull", not_null);
    checks.register("isNull", is_null);
    checks.register("equals", equals);
    checks.register("contains", contains);
    checks.register("notContains", not_contains);
    checks.register("len", len);
    checks.register("matches", matches);
    checks.register("notRegex", not_regex);
    checks.register("isLowercase", is_lowercase);
    checks.register("isUppercase", is_uppercase);
    checks.register("isAlpha", is_alpha);
    checks.register("isNumeric", is_numeric);
    checks.register("isAlphanumeric", is_alphanumeric);
    checks.register("isAscii", is_ascii);
    checks.register("isHexadecimal", is_hexadecimal);
    checks.register("isHexColor", is_hex_color);
}

/// Rejects values that are empty or whitespace-only after coercion.
fn not_empty(value: Option<&Value>, _args: &[Value]) -> bool {
    !text(value).trim().is_empty()
}

/// Rejects absent, null, and empty-string values.
fn not_null(value: Option<&Value>, _args: &[Value]) -> bool {
    !text(value).is_empty()
}

/// Accepts only absent, null, and empty-string values.
fn is_null(value: Option<&Value>, _args: &[Value]) -> bool {
    text(value).is_empty()
}

/// `equals(comparison)` — textual equality after coercing both sides.
fn equals(value: Option<&Value>, args: &[Value]) -> bool {
    text(value) == arg_text(args, 0)
}

/// `contains(seed)`.
fn contains(value: Option<&Value>, args: &[Value]) -> bool {
    text(value).contains(arg_text(args, 0).as_ref())
}

fn not_contains(value: Option<&Value>, args: &[Value]) -> bool {
    !contains(value, args)
}

/// `len(min [, max])` — character count within the inclusive range.
fn len(value: Option<&Value>, args: &[Value]) -> bool {
    let count = text(value).chars().count() as u64;
    let min = arg_u64(args, 0).unwrap_or(0);
    count >= min && arg_u64(args, 1).is_none_or(|max| count <= max)
}

/// `matches(pattern [, flags])` — `"i"` in flags enables case-insensitive
/// matching. A pattern that fails to compile rejects every value.
fn matches(value: Option<&Value>, args: &[Value]) -> bool {
    compile(args).is_some_and(|re| re.is_match(&text(value)))
}

/// `notRegex(pattern [, flags])`.
fn not_regex(value: Option<&Value>, args: &[Value]) -> bool {
    compile(args).is_none_or(|re| !re.is_match(&text(value)))
}

fn compile(args: &[Value]) -> Option<Regex> {
    let pattern = arg_text(args, 0);
    let pattern = if arg_text(args, 1).contains('i') {
        format!("(?i){pattern}")
    } else {
        pattern.into_owned()
    };
    Regex::new(&pattern).ok()
}

fn is_lowercase(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    t == t.to_lowercase()
}

fn is_uppercase(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    t == t.to_uppercase()
}

fn is_alpha(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    !t.is_empty() && t.chars().all(|c| c.is_ascii_alphabetic())
}

/// Digits with an optional leading minus sign.
fn is_numeric(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    let digits = t.strip_prefix('-').unwrap_or(&t);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_alphanumeric(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    !t.is_empty() && t.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_ascii(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    !t.is_empty() && t.is_ascii()
}

fn is_hexadecimal(value: Option<&Value>, _args: &[Value]) -> bool {
    let t = text(value);
    !t.is_empty() && t.chars().all(|c| c.is_ascii_hexdigit())
}

/// 3- or 6-digit hex color with an optional `#` prefix.
fn is_hex_color(value: Option<&Value>, _args: &[Value]) -> bool {
    HEX_COLOR_REGEX.is_match(&text(value))
}
