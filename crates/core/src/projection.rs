//! Field projection over heterogeneous Jira records
//!
//! Every operation returns structurally different records, so records flow
//! through the adapter as plain JSON trees and projection is a path walk:
//! each requested dotted path (e.g. `fields.assignee.displayName`) is
//! resolved against the record, with `null` standing in for anything the
//! record does not have. Output field order follows the requested path order
//! so downstream table rendering stays deterministic.

use serde::Serialize;
use serde_json::{Map, Value};

/// The single result shape returned to callers by every operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedResult {
    pub items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<u64>,
}

/// Resolve one dotted path against a record. `None` when any segment along
/// the way is absent or not an object.
pub fn lookup_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Project one record down to the requested paths.
///
/// The output is an object keyed by the full dotted path, in request order;
/// absent paths map to `null` instead of failing. An empty path list passes
/// the record through untouched.
pub fn project_record(record: &Value, paths: &[String]) -> Value {
    if paths.is_empty() {
        return record.clone();
    }

    let mut projected = Map::with_capacity(paths.len());
    for path in paths {
        let value = lookup_path(record, path).cloned().unwrap_or(Value::Null);
        projected.insert(path.clone(), value);
    }
    Value::Object(projected)
}

/// Project a whole page of records.
pub fn project_items(items: Vec<Value>, paths: &[String]) -> Vec<Value> {
    if paths.is_empty() {
        return items;
    }
    items
        .iter()
        .map(|record| project_record(record, paths))
        .collect()
}

/// Parse a caller-supplied comma-separated field list into paths.
/// `None` or a blank string means "use the operation's default subset".
pub fn parse_field_list(fields: Option<&str>) -> Vec<String> {
    fields
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Derive the server-side `fields` query parameter from requested paths.
///
/// Jira only accepts top-level field names there, so `fields.status.name`
/// contributes `status`. Paths outside the `fields` object (like `key`) are
/// issue properties the server always returns and are skipped. `None` when
/// nothing maps, in which case the parameter is omitted and Jira sends its
/// navigable default.
pub fn server_field_names(paths: &[String]) -> Option<String> {
    let mut names: Vec<&str> = Vec::new();
    for path in paths {
        let name = match path.strip_prefix("fields.") {
            Some(rest) => rest.split('.').next().unwrap_or(rest),
            None => continue,
        };
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    if names.is_empty() {
        None
    } else {
        Some(names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_issue() -> Value {
        json!({
            "key": "PROJ-123",
            "fields": {
                "summary": "Fix login flow",
                "status": {"name": "In Progress"},
                "assignee": {"displayName": "Ada Lovelace", "accountId": "abc"},
                "labels": ["auth", "backend"]
            }
        })
    }

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_nested_path() {
        let issue = sample_issue();
        assert_eq!(
            lookup_path(&issue, "fields.assignee.displayName"),
            Some(&json!("Ada Lovelace"))
        );
        assert_eq!(lookup_path(&issue, "key"), Some(&json!("PROJ-123")));
    }

    #[test]
    fn test_lookup_missing_path_is_none() {
        let issue = sample_issue();
        assert_eq!(lookup_path(&issue, "fields.reporter.displayName"), None);
        // Intermediate segment that is not an object
        assert_eq!(lookup_path(&issue, "key.inner"), None);
    }

    #[test]
    fn test_project_present_path_returns_exact_value() {
        let issue = sample_issue();
        let projected = project_record(&issue, &paths(&["fields.status.name"]));
        assert_eq!(projected, json!({"fields.status.name": "In Progress"}));
    }

    #[test]
    fn test_project_absent_path_yields_null_marker() {
        let issue = sample_issue();
        let projected = project_record(
            &issue,
            &paths(&["key", "fields.duedate", "fields.assignee.timeZone"]),
        );
        assert_eq!(projected["key"], json!("PROJ-123"));
        assert_eq!(projected["fields.duedate"], Value::Null);
        assert_eq!(projected["fields.assignee.timeZone"], Value::Null);
    }

    #[test]
    fn test_projection_preserves_request_order() {
        let issue = sample_issue();
        let requested = paths(&["fields.summary", "key", "fields.status.name"]);
        let projected = project_record(&issue, &requested);

        let keys: Vec<&String> = projected.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["fields.summary", "key", "fields.status.name"]);
    }

    #[test]
    fn test_projection_does_not_mutate_source() {
        let issue = sample_issue();
        let before = issue.clone();
        let _ = project_record(&issue, &paths(&["fields.summary", "missing.path"]));
        assert_eq!(issue, before);
    }

    #[test]
    fn test_empty_paths_pass_records_through() {
        let items = vec![sample_issue()];
        assert_eq!(project_items(items.clone(), &[]), items);
    }

    #[test]
    fn test_parse_field_list() {
        assert_eq!(
            parse_field_list(Some("key, fields.summary ,fields.status.name")),
            paths(&["key", "fields.summary", "fields.status.name"])
        );
        assert!(parse_field_list(Some("  ")).is_empty());
        assert!(parse_field_list(None).is_empty());
    }

    #[test]
    fn test_server_field_names_from_paths() {
        let requested = paths(&[
            "key",
            "fields.summary",
            "fields.status.name",
            "fields.status.statusCategory.key",
            "fields.assignee.displayName",
        ]);
        assert_eq!(
            server_field_names(&requested),
            Some("summary,status,assignee".to_string())
        );
    }

    #[test]
    fn test_server_field_names_empty_for_non_field_paths() {
        assert_eq!(server_field_names(&paths(&["key", "id"])), None);
        assert_eq!(server_field_names(&[]), None);
    }
}
