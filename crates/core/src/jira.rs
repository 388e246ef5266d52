//! Jira-specific pure helpers
//!
//! Base-URL shaping and the documented default field subset for each
//! operation. Defaults are deliberately compact: the raw Jira payloads are
//! verbose and most callers only want the navigable core of each record.

/// Normalize a configured Jira site URL: trim trailing slashes and default
/// the scheme to https when the operator left it off.
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Default projection for issue search and sprint-issue listing.
pub fn default_search_paths() -> Vec<String> {
    paths(&[
        "key",
        "fields.summary",
        "fields.status.name",
        "fields.assignee.displayName",
        "fields.priority.name",
    ])
}

/// Default projection for the issue-detail operation.
///
/// The changelog is bulky, so it only joins the default subset when the
/// caller explicitly asked for it through `expand`.
pub fn default_issue_paths(expand: Option<&str>) -> Vec<String> {
    let mut defaults = paths(&[
        "key",
        "fields.summary",
        "fields.description",
        "fields.status.name",
        "fields.assignee.displayName",
        "fields.priority.name",
        "fields.issuetype.name",
        "fields.created",
        "fields.updated",
        "fields.labels",
    ]);
    if expand
        .map(|e| e.split(',').any(|part| part.trim() == "changelog"))
        .unwrap_or(false)
    {
        defaults.push("changelog".to_string());
    }
    defaults
}

pub fn default_comment_paths() -> Vec<String> {
    paths(&["id", "author.displayName", "created", "body"])
}

pub fn default_changelog_paths() -> Vec<String> {
    paths(&["id", "author.displayName", "created", "items"])
}

pub fn default_transition_paths() -> Vec<String> {
    paths(&["id", "name", "to.name"])
}

pub fn default_project_paths() -> Vec<String> {
    paths(&["id", "key", "name", "projectTypeKey", "lead.displayName"])
}

pub fn default_board_paths() -> Vec<String> {
    paths(&["id", "name", "type", "location.projectKey"])
}

pub fn default_sprint_paths() -> Vec<String> {
    paths(&["id", "name", "state", "startDate", "endDate", "goal"])
}

pub fn default_user_paths() -> Vec<String> {
    paths(&["accountId", "displayName", "emailAddress", "active"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_adds_scheme() {
        assert_eq!(
            normalize_base_url("example.atlassian.net"),
            "https://example.atlassian.net"
        );
    }

    #[test]
    fn test_normalize_base_url_keeps_scheme_and_trims_slash() {
        assert_eq!(
            normalize_base_url("https://example.atlassian.net/"),
            "https://example.atlassian.net"
        );
        assert_eq!(
            normalize_base_url("http://jira.internal:8080//"),
            "http://jira.internal:8080"
        );
    }

    #[test]
    fn test_issue_defaults_exclude_changelog_unless_expanded() {
        let plain = default_issue_paths(None);
        assert!(!plain.iter().any(|p| p == "changelog"));

        let with_names = default_issue_paths(Some("renderedFields,names"));
        assert!(!with_names.iter().any(|p| p == "changelog"));

        let expanded = default_issue_paths(Some("changelog"));
        assert!(expanded.iter().any(|p| p == "changelog"));

        let expanded_among_others = default_issue_paths(Some("renderedFields, changelog"));
        assert!(expanded_among_others.iter().any(|p| p == "changelog"));
    }

    #[test]
    fn test_search_defaults_are_a_compact_subset() {
        let defaults = default_search_paths();
        assert!(defaults.contains(&"key".to_string()));
        assert!(defaults.contains(&"fields.summary".to_string()));
        assert!(defaults.len() <= 6);
    }
}
