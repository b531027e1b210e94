#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # evalid-checks
//!
//! The standard library of named check predicates for the
//! [`evalid`](https://docs.rs/evalid) validation engine.
//!
//! [`registry()`] returns a [`CheckRegistry`] seeded with the string, format
//! and numeric checks below; hand it to
//! [`Engine::with_checks`](evalid::Engine::with_checks) and reference checks
//! by name from rule descriptors:
//!
//! ```rust,ignore
//! let mut engine = Engine::with_checks(evalid_checks::registry());
//! engine.add_rules(
//!     RuleGroup::new()
//!         .rule("name", Rule::check("notEmpty"))
//!         .rule("name", Rule::check("len").with_args([2, 16]))
//!         .rule("email", Rule::check("isEmail")),
//! );
//! ```
//!
//! All checks coerce the resolved value to text first: an absent or null
//! value coerces to the empty string, numbers and booleans to their display
//! form. A "notEmpty" check against a missing attribute therefore fails, as
//! one would expect.
//!
//! ## Check names
//!
//! - string: `notEmpty`, `notNull`, `isNull`, `equals`, `contains`,
//!   `notContains`, `len` (alias `lengthBetween`), `matches` (aliases
//!   `regex`, `is`), `notRegex` (alias `not`), `isLowercase`, `isUppercase`,
//!   `isAlpha`, `isNumeric`, `isAlphanumeric`, `isAscii`, `isHexadecimal`,
//!   `isHexColor`
//! - format: `isEmail`, `isUrl`, `isIP`, `isIPv4`, `isIPv6`, `isUUID`,
//!   `isUUIDv3`, `isUUIDv4`, `isUUIDv5`, `isJSON`
//! - numeric: `isInt`, `isFloat` (alias `isDecimal`), `isDivisibleBy`,
//!   `min`, `max`, `isIn`
//! - temporal: `isDate`, `isAfter`, `isBefore`

mod coerce;
mod format;
mod numeric;
mod string;
mod temporal;

pub use evalid::CheckRegistry;

/// A registry seeded with every built-in check.
#[must_use]
pub fn registry() -> CheckRegistry {
    let mut checks = CheckRegistry::new();

    string::register(&mut checks);
    format::register(&mut checks);
    numeric::register(&mut checks);
    temporal::register(&mut checks);

    checks.alias("lengthBetween", "len");
    checks.alias("regex", "matches");
    checks.alias("is", "matches");
    checks.alias("not", "notRegex");
    checks.alias("isDecimal", "isFloat");

    checks
}
