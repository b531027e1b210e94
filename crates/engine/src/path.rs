//! Attribute resolution on JSON targets.
//!
//! Attribute paths are plain strings; a `.` delimits nested access. A key
//! that literally exists on the target always wins over path traversal, so
//! an object with an actual `"a.b"` key resolves to that entry rather than
//! to `b` inside `a`.

use serde_json::Value;

/// Resolve `path` against `target`.
///
/// Literal-key lookup has precedence. Otherwise the path is split on `.` and
/// traversed through objects (by key) and arrays (by numeric index); a
/// missing or non-structured intermediate yields `None` without failing.
#[must_use]
pub fn resolve<'a>(target: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(found) = target.as_object().and_then(|obj| obj.get(path)) {
        return Some(found);
    }

    if !path.contains('.') {
        return None;
    }

    let mut current = target;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set a literal top-level key on `target`.
///
/// Used by rule-driven normalization through
/// [`RuleContext::set`](crate::RuleContext::set). A non-object target is
/// left untouched.
pub fn write(target: &mut Value, name: &str, value: Value) {
    if let Some(obj) = target.as_object_mut() {
        obj.insert(name.to_owned(), value);
    }
}
