//! Identifier invariant check

use bundlesnap_core_types::is_identifier_field;
use serde_json::Value;

/// Paths of identifier-named fields whose value is not a string.
///
/// Identifier fields are not descended into. Paths use the comparator's
/// `parent.key` / `parent[i]` form, rooted at `path`.
pub fn find_non_string_identifiers(value: &Value, path: &str) -> Vec<String> {
    let mut issues = Vec::new();
    visit(value, path, &mut issues);
    issues
}

fn visit(value: &Value, path: &str, issues: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                if is_identifier_field(key) {
                    if !child.is_string() {
                        issues.push(format!(
                            "{}: identifier is {}, should be a string",
                            key_path,
                            json_type_name(child)
                        ));
                    }
                } else {
                    visit(child, &key_path, issues);
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                visit(item, &format!("{}[{}]", path, i), issues);
            }
        }
        _ => {}
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_identifiers_pass() {
        let doc = json!({
            "metadata": {"path_id": "-8911878726397676121"},
            "data": {"m_GameObject": {"m_FileID": 0, "m_PathID": "12"}}
        });
        assert!(find_non_string_identifiers(&doc, "").is_empty());
    }

    #[test]
    fn test_numeric_identifiers_reported_with_path() {
        let doc = json!({
            "object_list": [{"path_id": "1"}, {"path_id": 2}],
            "data": {"m_Materials": [{"m_PathID": 3.0}]}
        });
        let mut issues = find_non_string_identifiers(&doc, "summary");
        issues.sort();
        assert_eq!(
            issues,
            vec![
                "summary.data.m_Materials[0].m_PathID: identifier is float, should be a string",
                "summary.object_list[1].path_id: identifier is integer, should be a string",
            ]
        );
    }

    #[test]
    fn test_identifier_lists_are_reported() {
        let issues = find_non_string_identifiers(&json!({"PathID": ["1", "2"]}), "");
        assert_eq!(issues.len(), 1);
    }
}
