//! Dotted-path resolution over a [`State`].
//!
//! `a.b.c` names the top-level key `a`, then `b` inside it, then `c`. Numeric
//! segments index into arrays. Reading through a missing or scalar value fails;
//! only the final segment may be absent.

use crate::error::LookupError;
use crate::types::State;
use serde_json::Value;

/// Resolve `path` against `state`.
///
/// An empty path yields the whole state as a JSON object.
pub fn resolve(state: &State, path: &str) -> Result<Option<Value>, LookupError> {
    if path.is_empty() {
        return Ok(Some(state.to_value()));
    }

    let mut segments = path.split('.');
    // split always yields at least one item
    let first = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments.collect();

    match state.slot(first) {
        Some(slot) => slot.with(|root| descend(Some(root), first.len(), &rest, path).map(|v| v.cloned())),
        None => descend(None, first.len(), &rest, path).map(|v| v.cloned()),
    }
}

fn descend<'a>(
    root: Option<&'a Value>,
    mut consumed: usize,
    rest: &[&str],
    path: &str,
) -> Result<Option<&'a Value>, LookupError> {
    let mut current = root;

    for (i, segment) in rest.iter().enumerate() {
        let parent = &path[..consumed];
        let is_last = i + 1 == rest.len();
        current = match current {
            None | Some(Value::Null) => {
                return Err(LookupError::MissingSegment {
                    path: path.to_string(),
                    parent: parent.to_string(),
                    segment: segment.to_string(),
                })
            }
            Some(Value::Object(map)) => map.get(*segment),
            Some(Value::Array(items)) => match parse_index(segment) {
                Some(index) => items.get(index),
                None if is_last => None,
                None => {
                    return Err(LookupError::InvalidIndex {
                        path: path.to_string(),
                        parent: parent.to_string(),
                        segment: segment.to_string(),
                    })
                }
            },
            Some(other) => {
                return Err(LookupError::NotAMapping {
                    path: path.to_string(),
                    parent: parent.to_string(),
                    segment: segment.to_string(),
                    found: kind(other),
                })
            }
        };
        consumed += 1 + segment.len();
    }

    Ok(current)
}

/// Canonical decimal index: digits only, no sign, no leading zero.
fn parse_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
