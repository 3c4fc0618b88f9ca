//! Recursive JSON tree comparison

use serde_json::{Map, Number, Value};
use std::collections::BTreeSet;

use super::rules::CompareRules;
use super::DiffReport;

/// Compare two JSON trees rooted at `path`.
///
/// Mismatch lines, in traversal order:
///
/// - `path: a != b` for differing scalars or a null against a non-null
/// - `path: a != b (float diff > tol)` for numbers outside the tolerance
/// - `path: list length n != m`, without descending further
/// - `path.key: missing in first` / `path.key: missing in second`
///
/// Mapping keys are visited in sorted order. A string equal to the decimal
/// rendering of an integer on the other side compares equal, so an
/// identifier written as a number still matches its string form.
pub fn compare_values(
    first: &Value,
    second: &Value,
    path: &str,
    rules: &CompareRules,
) -> DiffReport {
    let mut report = DiffReport::new();
    walk(first, second, path, rules, &mut report);
    report
}

fn walk(first: &Value, second: &Value, path: &str, rules: &CompareRules, out: &mut DiffReport) {
    if rules.skips(path) {
        return;
    }

    match (first, second) {
        (Value::Null, Value::Null) => {}
        (Value::Null, _) | (_, Value::Null) => {
            out.push(format!("{}: {} != {}", path, first, second));
        }
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            compare_floats(a, b, path, rules, out);
        }
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                out.push(format!("{}: list length {} != {}", path, a.len(), b.len()));
                return;
            }
            for (i, (x, y)) in a.iter().zip(b).enumerate() {
                walk(x, y, &format!("{}[{}]", path, i), rules, out);
            }
        }
        (Value::Object(a), Value::Object(b)) => compare_maps(a, b, path, rules, out),
        _ => {
            if first != second && !integer_matches_string(first, second) {
                out.push(format!("{}: {} != {}", path, first, second));
            }
        }
    }
}

fn compare_floats(a: &Number, b: &Number, path: &str, rules: &CompareRules, out: &mut DiffReport) {
    let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) else {
        return;
    };
    if (x - y).abs() > rules.float_tolerance {
        out.push(format!(
            "{}: {} != {} (float diff > {:e})",
            path, a, b, rules.float_tolerance
        ));
    }
}

fn compare_maps(
    first: &Map<String, Value>,
    second: &Map<String, Value>,
    path: &str,
    rules: &CompareRules,
    out: &mut DiffReport,
) {
    let keys: BTreeSet<&String> = first.keys().chain(second.keys()).collect();
    for key in keys {
        let key_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };
        match (first.get(key), second.get(key)) {
            (Some(a), Some(b)) => walk(a, b, &key_path, rules, out),
            (None, _) => out.push(format!("{}: missing in first", key_path)),
            (_, None) => out.push(format!("{}: missing in second", key_path)),
        }
    }
}

fn integer_matches_string(first: &Value, second: &Value) -> bool {
    match (first, second) {
        (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
            (n.is_i64() || n.is_u64()) && *s == n.to_string()
        }
        _ => false,
    }
}
