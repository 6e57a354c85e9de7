//! Snapshot comparison for dirty detection and change summaries.
//!
//! Comparison is strict and structural: no coercion between `null`, absent
//! fields, and empty strings - callers normalize payloads before handing
//! them in if they want those treated as equal. Mapping keys compare
//! order-insensitively; sequences compare order-sensitively, so re-ordering
//! a list of page modules counts as a change.

use serde_json::Value;

use crate::item::Payload;

/// Whether two payloads differ structurally.
///
/// `IndexMap` equality ignores key order, and nested JSON objects compare
/// by key as well, so `{"a":1,"b":2}` equals `{"b":2,"a":1}`. Arrays are
/// position-sensitive.
pub fn is_dirty(a: &Payload, b: &Payload) -> bool {
    a != b
}

/// Ordered list of dotted field paths that differ between two payloads.
///
/// Paths follow `a`'s key order first, then keys present only in `b` in
/// `b`'s order. Nested mappings recurse (`parent.child`); sequences and
/// scalar mismatches report the field path itself - element-level diffs
/// are a non-goal.
pub fn changed_paths(a: &Payload, b: &Payload) -> Vec<String> {
    let mut out = Vec::new();
    for (key, value_a) in a {
        match b.get(key) {
            Some(value_b) => diff_value(key, value_a, value_b, &mut out),
            None => out.push(key.clone()),
        }
    }
    for key in b.keys() {
        if !a.contains_key(key) {
            out.push(key.clone());
        }
    }
    out
}

/// Human-readable one-line change summary, used for version record
/// summaries. Returns `"no changes"` when the payloads are equal.
pub fn summarize(a: &Payload, b: &Payload) -> String {
    let paths = changed_paths(a, b);
    if paths.is_empty() {
        "no changes".to_string()
    } else {
        format!("changed: {}", paths.join(", "))
    }
}

fn diff_value(path: &str, a: &Value, b: &Value, out: &mut Vec<String>) {
    if a == b {
        return;
    }
    match (a, b) {
        (Value::Object(map_a), Value::Object(map_b)) => {
            for (key, value_a) in map_a {
                let child = format!("{}.{}", path, key);
                match map_b.get(key) {
                    Some(value_b) => diff_value(&child, value_a, value_b, out),
                    None => out.push(child),
                }
            }
            for key in map_b.keys() {
                if !map_a.contains_key(key) {
                    out.push(format!("{}.{}", path, key));
                }
            }
        }
        // Sequences, scalars, and type changes report the field itself
        _ => out.push(path.to_string()),
    }
}
