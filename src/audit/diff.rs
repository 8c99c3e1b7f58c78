//! Change summaries for audit update entries
//!
//! Walks two JSON snapshots and lists each changed leaf as
//! `path: old -> new`, with nested fields joined by dots
//! (e.g. `amounts.food: 30000 -> 35000`).

use serde_json::{Map, Value};

/// Bookkeeping fields that change on every update
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Summarize what changed between two snapshots, or `None` if nothing did
pub fn describe_changes(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn collect_changes(before: &Value, after: &Value, path: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => collect_object_changes(b, a, path, changes),
        _ if before != after => changes.push(format!(
            "{}: {} -> {}",
            if path.is_empty() { "value" } else { path },
            format_value(before),
            format_value(after)
        )),
        _ => {}
    }
}

fn collect_object_changes(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    prefix: &str,
    changes: &mut Vec<String>,
) {
    for (key, old) in before {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let path = join_path(prefix, key);
        match after.get(key) {
            Some(new) => collect_changes(old, new, &path, changes),
            None => changes.push(format!("{}: {} -> (removed)", path, format_value(old))),
        }
    }

    for (key, new) in after {
        if !before.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
            changes.push(format!(
                "{}: (added) -> {}",
                join_path(prefix, key),
                format_value(new)
            ));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_amount_change_uses_dotted_path() {
        let before = json!({"month": "2025-03", "amounts": {"food": 30000, "bills": 90000}});
        let after = json!({"month": "2025-03", "amounts": {"food": 35000, "bills": 90000}});

        assert_eq!(
            describe_changes(&before, &after).unwrap(),
            "amounts.food: 30000 -> 35000"
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"amounts": {"food": 100}});
        let after = json!({"amounts": {"other": 50}});

        let diff = describe_changes(&before, &after).unwrap();
        assert!(diff.contains("amounts.food: 100 -> (removed)"));
        assert!(diff.contains("amounts.other: (added) -> 50"));
    }

    #[test]
    fn test_updated_at_is_ignored() {
        let before = json!({"daily_limit": 2000, "updated_at": "a"});
        let after = json!({"daily_limit": 2000, "updated_at": "b"});
        assert!(describe_changes(&before, &after).is_none());
    }

    #[test]
    fn test_arrays_are_summarized() {
        let before = json!({"history": [1]});
        let after = json!({"history": [1, 2]});
        assert_eq!(
            describe_changes(&before, &after).unwrap(),
            "history: [1 items] -> [2 items]"
        );
    }

    #[test]
    fn test_long_strings_truncated() {
        let before = json!({"name": "x".repeat(80)});
        let after = json!({"name": "short"});
        assert!(describe_changes(&before, &after).unwrap().contains("...\""));
    }
}
