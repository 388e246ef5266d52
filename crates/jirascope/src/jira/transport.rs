//! HTTP executor with bounded retries
//!
//! Every adapter operation is a read, so every call is retry-eligible.
//! Transient failures (timeouts, connection errors, 429, 5xx) are retried up
//! to [`MAX_RETRIES`] extra attempts with exponential backoff; a 429 with a
//! `Retry-After` header waits out the server's hint instead. Anything else
//! fails immediately and comes back as one [`ErrorEnvelope`].

use std::time::Duration;

use jirascope_core::error::{backoff_delay, is_transient, ErrorEnvelope, MAX_RETRIES};
use serde_json::Value;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What to do with a non-success status: wait and go around again, or give
/// up with the final envelope.
#[derive(Debug)]
enum StatusAction {
    Retry(Duration),
    Fail(ErrorEnvelope),
}

/// Classify a non-2xx response given how many retries have already been
/// spent. Kept free of I/O so the retry wiring is testable.
fn dispose_status(
    status: u16,
    body: String,
    retry_after: Option<u64>,
    attempt: u32,
) -> StatusAction {
    if is_transient(status) && attempt < MAX_RETRIES {
        StatusAction::Retry(backoff_delay(attempt, retry_after))
    } else if status == 429 {
        StatusAction::Fail(ErrorEnvelope::rate_limited(retry_after))
    } else {
        StatusAction::Fail(ErrorEnvelope::rejection(status, body))
    }
}

/// Execute one authenticated GET against Jira and decode the JSON body.
pub async fn get_json(
    client: &reqwest::Client,
    url: &str,
    params: &[(&'static str, String)],
) -> Result<Value, ErrorEnvelope> {
    let mut attempt: u32 = 0;

    loop {
        let response = match client.get(url).query(params).send().await {
            Ok(response) => response,
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt < MAX_RETRIES {
                    tokio::time::sleep(backoff_delay(attempt, None)).await;
                    attempt += 1;
                    continue;
                }
                return Err(ErrorEnvelope::transport(format!(
                    "request to Jira failed after {} attempt(s): {e}",
                    attempt + 1
                )));
            }
        };

        let status = response.status().as_u16();
        if response.status().is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| ErrorEnvelope::decode(format!("failed to decode Jira response: {e}")));
        }

        let retry_after = retry_after_secs(response.headers());
        let body = response.text().await.unwrap_or_default();

        match dispose_status(status, body, retry_after, attempt) {
            StatusAction::Retry(delay) => {
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            StatusAction::Fail(envelope) => return Err(envelope),
        }
    }
}

/// Parse a `Retry-After` header carrying a delay in seconds. Date-form
/// values are ignored and fall back to exponential backoff.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jirascope_core::error::ErrorKind;

    #[test]
    fn test_rate_limit_retries_with_server_hint() {
        match dispose_status(429, String::new(), Some(2), 0) {
            StatusAction::Retry(delay) => assert_eq!(delay, Duration::from_secs(2)),
            StatusAction::Fail(e) => panic!("expected a retry, got {e:?}"),
        }
    }

    #[test]
    fn test_rate_limit_exhausted_budget_fails_as_rate_limited() {
        match dispose_status(429, String::new(), Some(7), MAX_RETRIES) {
            StatusAction::Fail(e) => {
                assert_eq!(e.kind, ErrorKind::RateLimited);
                assert_eq!(e.retry_after_secs, Some(7));
            }
            StatusAction::Retry(_) => panic!("retry budget was already spent"),
        }
    }

    #[test]
    fn test_not_found_is_never_retried() {
        match dispose_status(404, "issue does not exist".to_string(), None, 0) {
            StatusAction::Fail(e) => {
                assert_eq!(e.kind, ErrorKind::RemoteRejection);
                assert!(!e.retryable);
                assert_eq!(e.status, Some(404));
            }
            StatusAction::Retry(_) => panic!("4xx rejections must fail immediately"),
        }
    }

    #[test]
    fn test_server_error_retries_then_fails_retryable() {
        match dispose_status(502, String::new(), None, 0) {
            StatusAction::Retry(delay) => assert_eq!(delay, Duration::from_millis(250)),
            StatusAction::Fail(e) => panic!("expected a retry, got {e:?}"),
        }

        match dispose_status(502, "bad gateway".to_string(), None, MAX_RETRIES) {
            StatusAction::Fail(e) => {
                assert_eq!(e.kind, ErrorKind::RemoteRejection);
                assert!(e.retryable);
            }
            StatusAction::Retry(_) => panic!("retry budget was already spent"),
        }
    }
}
