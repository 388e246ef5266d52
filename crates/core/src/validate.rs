//! Structural validation of operation parameters
//!
//! Checks run before anything touches the network: required strings present,
//! constrained fields inside their enums, pagination already handled by
//! [`crate::pagination::Page`]. JQL itself is deliberately not parsed here;
//! the dialect is Jira's to interpret and dialect errors come back through
//! the remote error path.

use crate::error::ErrorEnvelope;

/// Reject empty or whitespace-only required parameters.
pub fn require_non_empty(name: &str, value: &str) -> Result<(), ErrorEnvelope> {
    if value.trim().is_empty() {
        Err(ErrorEnvelope::validation(format!(
            "{name} must not be empty"
        )))
    } else {
        Ok(())
    }
}

/// Sprint lifecycle states accepted by the board sprint listing.
pub const SPRINT_STATES: [&str; 3] = ["active", "closed", "future"];

/// Board types accepted by the board listing filter.
pub const BOARD_TYPES: [&str; 3] = ["scrum", "kanban", "simple"];

/// Comment orderings accepted by the comment listing.
pub const COMMENT_ORDERINGS: [&str; 3] = ["created", "-created", "+created"];

/// Expansions the issue-detail operation will forward to Jira.
pub const EXPANSIONS: [&str; 4] = ["changelog", "renderedFields", "names", "transitions"];

/// Validate a comma-separated sprint state filter (e.g. "active,future") and
/// return it in canonical lowercase form.
pub fn parse_sprint_states(states: &str) -> Result<String, ErrorEnvelope> {
    parse_enum_list("sprint state", states, &SPRINT_STATES)
}

/// Validate a board type filter.
pub fn parse_board_type(board_type: &str) -> Result<String, ErrorEnvelope> {
    parse_enum_list("board type", board_type, &BOARD_TYPES)
}

/// Validate the comment ordering parameter. Unlike the lowercase enums, the
/// leading sign is significant and kept as-is.
pub fn parse_comment_order(order_by: &str) -> Result<String, ErrorEnvelope> {
    let trimmed = order_by.trim();
    if COMMENT_ORDERINGS.contains(&trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ErrorEnvelope::validation(format!(
            "order_by must be one of {} (got '{order_by}')",
            COMMENT_ORDERINGS.join(", ")
        )))
    }
}

/// Validate a comma-separated expand list (e.g. "changelog,renderedFields").
pub fn parse_expand(expand: &str) -> Result<String, ErrorEnvelope> {
    let mut parts = Vec::new();
    for part in expand.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if !EXPANSIONS.contains(&part) {
            return Err(ErrorEnvelope::validation(format!(
                "expand must be drawn from {} (got '{part}')",
                EXPANSIONS.join(", ")
            )));
        }
        parts.push(part);
    }
    if parts.is_empty() {
        return Err(ErrorEnvelope::validation("expand must not be empty"));
    }
    Ok(parts.join(","))
}

fn parse_enum_list(name: &str, value: &str, allowed: &[&str]) -> Result<String, ErrorEnvelope> {
    let mut parts = Vec::new();
    for part in value.split(',') {
        let part = part.trim().to_ascii_lowercase();
        if part.is_empty() {
            continue;
        }
        if !allowed.contains(&part.as_str()) {
            return Err(ErrorEnvelope::validation(format!(
                "{name} must be one of {} (got '{part}')",
                allowed.join(", ")
            )));
        }
        parts.push(part);
    }
    if parts.is_empty() {
        return Err(ErrorEnvelope::validation(format!("{name} must not be empty")));
    }
    Ok(parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("jql", "project = PROJ").is_ok());
        let err = require_non_empty("jql", "   ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("jql"));
    }

    #[test]
    fn test_sprint_states_accepted_and_canonicalized() {
        assert_eq!(parse_sprint_states("active").unwrap(), "active");
        assert_eq!(
            parse_sprint_states(" Active , FUTURE ").unwrap(),
            "active,future"
        );
    }

    #[test]
    fn test_unknown_sprint_state_rejected() {
        let err = parse_sprint_states("active,paused").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("paused"));
    }

    #[test]
    fn test_board_types() {
        assert_eq!(parse_board_type("scrum").unwrap(), "scrum");
        assert!(parse_board_type("waterfall").is_err());
    }

    #[test]
    fn test_comment_orderings() {
        assert_eq!(parse_comment_order("-created").unwrap(), "-created");
        assert_eq!(parse_comment_order("+created").unwrap(), "+created");
        assert!(parse_comment_order("updated").is_err());
    }

    #[test]
    fn test_expand_tokens() {
        assert_eq!(
            parse_expand("changelog,renderedFields").unwrap(),
            "changelog,renderedFields"
        );
        assert!(parse_expand("everything").is_err());
        assert!(parse_expand("").is_err());
    }
}
