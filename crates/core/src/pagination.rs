//! Cursor normalization over Jira's pagination styles
//!
//! Jira paginates two ways: the search-style endpoints report
//! `{items, total, startAt}` while the agile-resource endpoints report
//! `{values, isLast}`. Both are collapsed here into one caller-facing
//! contract: a plain integer cursor that is the start offset of the next
//! page, present only when more results are known to exist.

use serde_json::Value;

use crate::error::ErrorEnvelope;

/// Hard ceiling on one page; Jira itself refuses more than 100 per request.
pub const MAX_PAGE_SIZE: u64 = 100;
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// A validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start_at: u64,
    pub max_results: u64,
}

impl Page {
    /// Build a page from caller-supplied values: negative offsets are
    /// rejected, the page size is clamped into `[1, MAX_PAGE_SIZE]`.
    pub fn new(start_at: Option<i64>, max_results: Option<i64>) -> Result<Self, ErrorEnvelope> {
        let start_at = match start_at {
            Some(s) if s < 0 => {
                return Err(ErrorEnvelope::validation(format!(
                    "start_at must not be negative (got {s})"
                )))
            }
            Some(s) => s as u64,
            None => 0,
        };

        let max_results = match max_results {
            Some(m) => (m.max(1) as u64).min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            start_at,
            max_results,
        })
    }
}

/// Which remote signal is authoritative for "is there another page".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    /// `{items, total, startAt}` endpoints (issue search, comments,
    /// changelog, project search, sprint issues).
    Offset,
    /// `{values, isLast}` agile endpoints (boards, board sprints).
    Flagged,
}

/// The pagination-relevant parts of one raw Jira response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage {
    pub items: Vec<Value>,
    pub total: Option<u64>,
    pub is_last: Option<bool>,
    pub start_at: Option<u64>,
}

/// Split a raw response into its item array and pagination envelope.
///
/// Accepts either an object with the item array at `items_key` (the common
/// case) or a bare array (user search). An object without the key yields an
/// empty page rather than an error.
pub fn split_envelope(raw: Value, items_key: &str) -> Result<RawPage, ErrorEnvelope> {
    match raw {
        Value::Array(items) => Ok(RawPage {
            items,
            total: None,
            is_last: None,
            start_at: None,
        }),
        Value::Object(mut map) => {
            let items = match map.remove(items_key) {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(ErrorEnvelope::decode(format!(
                        "expected '{items_key}' to be an array, got {other}"
                    )))
                }
                None => Vec::new(),
            };
            Ok(RawPage {
                items,
                total: map.get("total").and_then(Value::as_u64),
                is_last: map.get("isLast").and_then(Value::as_bool),
                start_at: map.get("startAt").and_then(Value::as_u64),
            })
        }
        other => Err(ErrorEnvelope::decode(format!(
            "expected a JSON object or array, got {other}"
        ))),
    }
}

/// Compute `(items, total, next_cursor)` for one fetched page.
///
/// The returned item list never exceeds the requested page size, and the
/// cursor is the verbatim start offset for the next request. A page shorter
/// than requested with no authoritative remote signal is treated as the last
/// one; assuming more pages from an ambiguous response risks looping forever.
pub fn normalize(
    style: PageStyle,
    page: Page,
    raw: RawPage,
) -> (Vec<Value>, Option<u64>, Option<u64>) {
    let mut items = raw.items;
    items.truncate(page.max_results as usize);

    let start = raw.start_at.unwrap_or(page.start_at);
    let fetched = items.len() as u64;

    let next_cursor = match style {
        PageStyle::Offset => match raw.total {
            Some(total) if fetched > 0 && start + fetched < total => Some(start + fetched),
            Some(_) => None,
            None => short_page_cursor(start, fetched, page.max_results),
        },
        PageStyle::Flagged => match raw.is_last {
            // An empty page never yields a cursor, even under isLast: false;
            // re-requesting the same offset would loop forever.
            Some(false) if fetched > 0 => Some(start + fetched),
            Some(_) => None,
            None => short_page_cursor(start, fetched, page.max_results),
        },
    };

    (items, raw.total, next_cursor)
}

/// Collapse a response from an endpoint that returns its whole collection at
/// once (issue transitions). Nothing is truncated and no cursor is ever
/// produced; the collection length stands in for a missing total.
pub fn unpaginated(raw: RawPage) -> (Vec<Value>, Option<u64>, Option<u64>) {
    let total = raw.total.unwrap_or(raw.items.len() as u64);
    (raw.items, Some(total), None)
}

/// Tie-break when the remote gives neither a total nor a last-page flag:
/// a full page means "assume more", anything shorter means "end of results".
fn short_page_cursor(start: u64, fetched: u64, requested: u64) -> Option<u64> {
    if fetched > 0 && fetched == requested {
        Some(start + fetched)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issues(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({"key": format!("PROJ-{i}")})).collect()
    }

    #[test]
    fn test_page_defaults() {
        let page = Page::new(None, None).unwrap();
        assert_eq!(page.start_at, 0);
        assert_eq!(page.max_results, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_clamped_to_max() {
        let page = Page::new(Some(0), Some(5000)).unwrap();
        assert_eq!(page.max_results, MAX_PAGE_SIZE);

        let page = Page::new(Some(0), Some(0)).unwrap();
        assert_eq!(page.max_results, 1);

        let page = Page::new(Some(0), Some(-3)).unwrap();
        assert_eq!(page.max_results, 1);
    }

    #[test]
    fn test_negative_start_rejected() {
        let err = Page::new(Some(-1), Some(10)).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_offset_style_first_page_of_five() {
        // search "project = PROJ" with page_size=2 against 5 total matches
        let page = Page::new(Some(0), Some(2)).unwrap();
        let raw = split_envelope(
            json!({"issues": issues(2), "total": 5, "startAt": 0, "maxResults": 2}),
            "issues",
        )
        .unwrap();

        let (items, total, next) = normalize(PageStyle::Offset, page, raw);
        assert_eq!(items.len(), 2);
        assert_eq!(total, Some(5));
        assert_eq!(next, Some(2));
    }

    #[test]
    fn test_offset_style_last_page_has_no_cursor() {
        let page = Page::new(Some(4), Some(2)).unwrap();
        let raw = split_envelope(
            json!({"issues": issues(1), "total": 5, "startAt": 4}),
            "issues",
        )
        .unwrap();

        let (items, total, next) = normalize(PageStyle::Offset, page, raw);
        assert_eq!(items.len(), 1);
        assert_eq!(total, Some(5));
        assert_eq!(next, None);
    }

    #[test]
    fn test_offset_pages_concatenate_without_gaps() {
        // Walking cursor=0,2,4 over 5 items must visit exactly total items.
        let all: Vec<Value> = issues(5);
        let page_size = 2i64;
        let mut cursor = 0u64;
        let mut seen = Vec::new();

        loop {
            let page = Page::new(Some(cursor as i64), Some(page_size)).unwrap();
            let slice: Vec<Value> = all
                .iter()
                .skip(cursor as usize)
                .take(page.max_results as usize)
                .cloned()
                .collect();
            let raw = RawPage {
                items: slice,
                total: Some(5),
                is_last: None,
                start_at: Some(cursor),
            };
            let (items, _, next) = normalize(PageStyle::Offset, page, raw);
            seen.extend(items);
            match next {
                Some(n) => cursor = n,
                None => break,
            }
        }

        assert_eq!(seen, all);
    }

    #[test]
    fn test_flagged_style_more_pages() {
        let page = Page::new(Some(0), Some(3)).unwrap();
        let raw = split_envelope(json!({"values": issues(3), "isLast": false}), "values").unwrap();

        let (items, total, next) = normalize(PageStyle::Flagged, page, raw);
        assert_eq!(items.len(), 3);
        assert_eq!(total, None);
        assert_eq!(next, Some(3));
    }

    #[test]
    fn test_flagged_style_last_page() {
        let page = Page::new(Some(3), Some(3)).unwrap();
        let raw = split_envelope(json!({"values": issues(3), "isLast": true}), "values").unwrap();

        let (_, _, next) = normalize(PageStyle::Flagged, page, raw);
        assert_eq!(next, None);
    }

    #[test]
    fn test_short_page_without_flag_treated_as_last() {
        let page = Page::new(Some(0), Some(10)).unwrap();
        let raw = split_envelope(json!({"values": issues(4)}), "values").unwrap();

        let (items, _, next) = normalize(PageStyle::Flagged, page, raw);
        assert_eq!(items.len(), 4);
        assert_eq!(next, None);
    }

    #[test]
    fn test_full_page_without_signal_assumes_more() {
        // Bare-array responses (user search) report nothing; a full page is
        // the only hint that more results may exist.
        let page = Page::new(Some(0), Some(4)).unwrap();
        let raw = split_envelope(Value::Array(issues(4)), "values").unwrap();

        let (items, total, next) = normalize(PageStyle::Offset, page, raw);
        assert_eq!(items.len(), 4);
        assert_eq!(total, None);
        assert_eq!(next, Some(4));
    }

    #[test]
    fn test_items_never_exceed_requested_page_size() {
        let page = Page::new(Some(0), Some(2)).unwrap();
        let raw = RawPage {
            items: issues(7),
            total: Some(7),
            is_last: None,
            start_at: Some(0),
        };

        let (items, _, next) = normalize(PageStyle::Offset, page, raw);
        assert_eq!(items.len(), 2);
        assert_eq!(next, Some(2));
    }

    #[test]
    fn test_flagged_empty_page_with_more_flag_yields_no_cursor() {
        // A remote claiming isLast: false while returning nothing must not
        // hand out a cursor pointing back at the same offset.
        let page = Page::new(Some(10), Some(10)).unwrap();
        let raw = split_envelope(json!({"values": [], "isLast": false}), "values").unwrap();

        let (items, _, next) = normalize(PageStyle::Flagged, page, raw);
        assert!(items.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn test_unpaginated_collection_is_never_truncated() {
        // Transitions come back as one complete list; even a collection
        // larger than the page ceiling is returned whole with no cursor.
        let raw = split_envelope(json!({"transitions": issues(151)}), "transitions").unwrap();

        let (items, total, next) = unpaginated(raw);
        assert_eq!(items.len(), 151);
        assert_eq!(total, Some(151));
        assert_eq!(next, None);
    }

    #[test]
    fn test_unpaginated_prefers_remote_total() {
        let raw = RawPage {
            items: issues(3),
            total: Some(3),
            is_last: None,
            start_at: None,
        };

        let (_, total, next) = unpaginated(raw);
        assert_eq!(total, Some(3));
        assert_eq!(next, None);
    }

    #[test]
    fn test_empty_page_has_no_cursor() {
        let page = Page::new(Some(0), Some(10)).unwrap();
        let raw = split_envelope(json!({"values": []}), "values").unwrap();

        let (items, _, next) = normalize(PageStyle::Flagged, page, raw);
        assert!(items.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn test_envelope_missing_items_key_yields_empty_page() {
        let raw = split_envelope(json!({"total": 0}), "issues").unwrap();
        assert!(raw.items.is_empty());
        assert_eq!(raw.total, Some(0));
    }

    #[test]
    fn test_envelope_with_non_array_items_is_a_decode_error() {
        let err = split_envelope(json!({"issues": "nope"}), "issues").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Transport);
        assert!(!err.retryable);
    }
}
