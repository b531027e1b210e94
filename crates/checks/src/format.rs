//! Format checks: email, URL, IP, UUID, JSON.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use evalid::CheckRegistry;
use regex::Regex;
use serde_json::Value;

use crate::coerce::{arg_u64, text};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

pub(crate) fn register(checks: &mut CheckRegistry) {
    checks.register("isEmail", is_email);
    checks.register("isUrl", is_url);
    checks.register("isIP", is_ip);
    checks.register("isIPv4", is_ipv4);
    checks.register("isIPv6", is_ipv6);
    checks.register("isUUID", is_uuid);
    checks.register("isUUIDv3", |value: Option<&Value>, _: &[Value]| {
        check_uuid(&text(value), Some(3))
    });
    checks.register("isUUIDv4", |value: Option<&Value>, _: &[Value]| {
        check_uuid(&text(value), Some(4))
    });
    checks.register("isUUIDv5", |value: Option<&Value>, _: &[Value]| {
        check_uuid(&text(value), Some(5))
    });
    checks.register("isJSON", is_json);
}

fn is_email(value: Option<&Value>, _args: &[Value]) -> bool {
    EMAIL_REGEX.is_match(&text(value))
}

fn is_url(value: Option<&Value>, _args: &[Value]) -> bool {
    URL_REGEX.is_match(&text(value))
}

/// `isIP([version])` — either family by default, or only v4/v6 when the
/// version argument is `4` or `6`.
fn is_ip(value: Option<&Value>, args: &[Value]) -> bool {
    let t = text(value);
    match arg_u64(args, 0) {
        Some(4) => t.parse::<Ipv4Addr>().is_ok(),
        Some(6) => t.parse::<Ipv6Addr>().is_ok(),
        _ => t.parse::<IpAddr>().is_ok(),
    }
}

fn is_ipv4(value: Option<&Value>, _args: &[Value]) -> bool {
    text(value).parse::<Ipv4Addr>().is_ok()
}

fn is_ipv6(value: Option<&Value>, _args: &[Value]) -> bool {
    text(value).parse::<Ipv6Addr>().is_ok()
}

/// `isUUID([version])` — hyphenated 8-4-4-4-12 hex form, optionally pinned
/// to a specific version digit.
fn is_uuid(value: Option<&Value>, args: &[Value]) -> bool {
    let version = arg_u64(args, 0).and_then(|v| u32::try_from(v).ok());
    check_uuid(&text(value), version)
}

fn check_uuid(t: &str, version: Option<u32>) -> bool {
    let groups: Vec<&str> = t.split('-').collect();
    let [a, b, c, d, e] = groups.as_slice() else {
        return false;
    };
    let shape_ok = [(a, 8), (b, 4), (c, 4), (d, 4), (e, 12)]
        .iter()
        .all(|(group, width)| {
            group.len() == *width && group.chars().all(|ch| ch.is_ascii_hexdigit())
        });
    if !shape_ok {
        return false;
    }
    version.is_none_or(|v| {
        char::from_digit(v, 10).is_some_and(|digit| c.starts_with(digit))
    })
}

fn is_json(value: Option<&Value>, _args: &[Value]) -> bool {
    serde_json::from_str::<Value>(&text(value)).is_ok()
}
