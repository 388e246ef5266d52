//! Error taxonomy for the Jira adapter
//!
//! Every failure that crosses the adapter boundary is one [`ErrorEnvelope`].
//! The envelope carries the failure class, a diagnosable message, whether the
//! call is worth repeating, and the remote status code when one exists.

use std::time::Duration;

use serde::Serialize;

/// Number of extra attempts after the first failed transient call.
pub const MAX_RETRIES: u32 = 2;

/// Failure classes surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing parameter. Never sent over the network.
    Validation,
    /// Connection failure, timeout, or 5xx after the retry budget ran out.
    Transport,
    /// Non-transient rejection from Jira (400, 401, 403, 404, ...).
    RemoteRejection,
    /// 429 after exhausting backoff retries.
    RateLimited,
}

/// The only failure representation returned across the adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ErrorEnvelope {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl ErrorEnvelope {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            retryable: false,
            status: None,
            retry_after_secs: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            retryable: true,
            status: None,
            retry_after_secs: None,
        }
    }

    /// A response body that could not be decoded as JSON. Not worth retrying.
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            retryable: false,
            status: None,
            retry_after_secs: None,
        }
    }

    /// A non-2xx response. The remote message is kept verbatim for
    /// diagnosability; 5xx statuses stay marked retryable.
    pub fn rejection(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            kind: ErrorKind::RemoteRejection,
            message: format!("Jira API error [{status}]: {body}"),
            retryable: is_transient(status),
            status: Some(status),
            retry_after_secs: None,
        }
    }

    pub fn rate_limited(retry_after_secs: Option<u64>) -> Self {
        Self {
            kind: ErrorKind::RateLimited,
            message: "Jira API rate limit exceeded".to_string(),
            retryable: true,
            status: Some(429),
            retry_after_secs,
        }
    }
}

/// Whether a status is expected to resolve on retry.
pub fn is_transient(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Delay before the next attempt. A server-supplied `Retry-After` hint wins;
/// otherwise exponential backoff starting at 250ms.
pub fn backoff_delay(attempt: u32, retry_after_secs: Option<u64>) -> Duration {
    match retry_after_secs {
        Some(secs) => Duration::from_secs(secs.max(1)),
        None => Duration::from_millis(250 * 2u64.pow(attempt)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        assert!(is_transient(429));
        assert!(is_transient(500));
        assert!(is_transient(503));
        assert!(!is_transient(400));
        assert!(!is_transient(401));
        assert!(!is_transient(404));
        assert!(!is_transient(200));
    }

    #[test]
    fn test_rejection_for_unknown_issue_is_not_retryable() {
        let envelope = ErrorEnvelope::rejection(404, "Issue does not exist");
        assert_eq!(envelope.kind, ErrorKind::RemoteRejection);
        assert!(!envelope.retryable);
        assert_eq!(envelope.status, Some(404));
        assert!(envelope.message.contains("404"));
        assert!(envelope.message.contains("Issue does not exist"));
    }

    #[test]
    fn test_rejection_for_server_error_stays_retryable() {
        let envelope = ErrorEnvelope::rejection(502, "bad gateway");
        assert!(envelope.retryable);
    }

    #[test]
    fn test_backoff_honors_retry_after_hint() {
        // A `Retry-After: 1` header must produce a wait of at least one second.
        let delay = backoff_delay(0, Some(1));
        assert!(delay >= Duration::from_secs(1));

        let delay = backoff_delay(2, Some(5));
        assert_eq!(delay, Duration::from_secs(5));
    }

    #[test]
    fn test_backoff_grows_exponentially_without_hint() {
        assert_eq!(backoff_delay(0, None), Duration::from_millis(250));
        assert_eq!(backoff_delay(1, None), Duration::from_millis(500));
        assert_eq!(backoff_delay(2, None), Duration::from_millis(1000));
    }

    #[test]
    fn test_envelope_serializes_kind_as_snake_case() {
        let envelope = ErrorEnvelope::rate_limited(Some(3));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["kind"], "rate_limited");
        assert_eq!(json["retryable"], true);
        assert_eq!(json["status"], 429);
        assert_eq!(json["retry_after_secs"], 3);
    }

    #[test]
    fn test_validation_envelope_has_no_status() {
        let envelope = ErrorEnvelope::validation("jql query must not be empty");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["kind"], "validation");
        assert!(json.get("status").is_none());
    }
}
