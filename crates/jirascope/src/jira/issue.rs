//! Single-issue reads: detail, comments, changelog, transitions
//!
//! All four operations are parametrized by one issue key and need no
//! chaining. Comments and the changelog paginate offset-style; transitions
//! come back as one unpaginated list.

use jirascope_core::error::ErrorEnvelope;
use jirascope_core::jira::{
    default_changelog_paths, default_comment_paths, default_issue_paths, default_transition_paths,
};
use jirascope_core::pagination::{split_envelope, unpaginated, Page, PageStyle};
use jirascope_core::projection::{
    parse_field_list, project_items, project_record, server_field_names, ProjectedResult,
};
use jirascope_core::validate::{parse_comment_order, parse_expand, require_non_empty};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Options for reading a single issue
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Issue key (e.g. 'PROJ-123')
    pub issue_key: String,

    /// Comma-separated field paths to return (default: a compact subset)
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Comma-separated expansions (e.g. 'changelog,renderedFields')
    #[arg(short, long)]
    pub expand: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for listing issue comments
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct CommentOptions {
    /// Issue key (e.g. 'PROJ-123')
    pub issue_key: String,

    /// Sort order: '-created' for newest first, '+created' for oldest first
    #[arg(long, default_value = "-created")]
    pub order_by: String,

    /// Maximum number of comments to return per page
    #[arg(short, long, default_value = "50")]
    pub limit: i64,

    /// Index of the first result, for pagination
    #[arg(long, default_value = "0")]
    pub start_at: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for reading an issue changelog
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ChangelogOptions {
    /// Issue key (e.g. 'PROJ-123')
    pub issue_key: String,

    /// Maximum number of changelog entries to return per page
    #[arg(short, long, default_value = "50")]
    pub limit: i64,

    /// Index of the first result, for pagination
    #[arg(long, default_value = "0")]
    pub start_at: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for listing issue transitions
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct TransitionOptions {
    /// Issue key (e.g. 'PROJ-123')
    pub issue_key: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Fetch one issue as a single-item result.
pub async fn get_issue_data(
    jira: &super::JiraClient,
    issue_key: String,
    fields: Option<String>,
    expand: Option<String>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    require_non_empty("issue_key", &issue_key)?;
    let expand = match expand {
        Some(e) => Some(parse_expand(&e)?),
        None => None,
    };

    let requested = parse_field_list(fields.as_deref());
    let paths = if requested.is_empty() {
        default_issue_paths(expand.as_deref())
    } else {
        requested
    };

    let mut params = Vec::new();
    if let Some(names) = server_field_names(&paths) {
        params.push(("fields", names));
    }
    if let Some(expand) = expand {
        params.push(("expand", expand));
    }

    let record = jira
        .get(&format!("/rest/api/3/issue/{issue_key}"), &params)
        .await?;

    Ok(ProjectedResult {
        items: vec![project_record(&record, &paths)],
        total: None,
        next_cursor: None,
    })
}

/// List comments on an issue, newest first by default.
pub async fn get_comments_data(
    jira: &super::JiraClient,
    issue_key: String,
    order_by: String,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    require_non_empty("issue_key", &issue_key)?;
    let order_by = parse_comment_order(&order_by)?;
    let page = Page::new(start_at, limit)?;

    let params = vec![
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
        ("orderBy", order_by),
    ];

    jira.fetch_page(
        &format!("/rest/api/3/issue/{issue_key}/comment"),
        params,
        PageStyle::Offset,
        "comments",
        page,
        &default_comment_paths(),
    )
    .await
}

/// Read the changelog of an issue: status transitions, reassignments, and
/// field changes with timestamps.
pub async fn get_changelog_data(
    jira: &super::JiraClient,
    issue_key: String,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    require_non_empty("issue_key", &issue_key)?;
    let page = Page::new(start_at, limit)?;

    let params = vec![
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
    ];

    jira.fetch_page(
        &format!("/rest/api/3/issue/{issue_key}/changelog"),
        params,
        PageStyle::Offset,
        "values",
        page,
        &default_changelog_paths(),
    )
    .await
}

/// List the workflow transitions currently available for an issue. The
/// endpoint returns the whole list in one response, so no cursor is ever
/// produced and nothing is cut off at a page boundary.
pub async fn get_transitions_data(
    jira: &super::JiraClient,
    issue_key: String,
) -> Result<ProjectedResult, ErrorEnvelope> {
    require_non_empty("issue_key", &issue_key)?;

    let raw = jira
        .get(&format!("/rest/api/3/issue/{issue_key}/transitions"), &[])
        .await?;
    let (items, total, next_cursor) = unpaginated(split_envelope(raw, "transitions")?);

    Ok(ProjectedResult {
        items: project_items(items, &default_transition_paths()),
        total,
        next_cursor,
    })
}

pub async fn get_handler(jira: &super::JiraClient, options: GetOptions) -> Result<()> {
    let data = get_issue_data(jira, options.issue_key, options.fields, options.expand).await?;
    super::print_result(&data, options.json)
}

pub async fn comments_handler(jira: &super::JiraClient, options: CommentOptions) -> Result<()> {
    let data = get_comments_data(
        jira,
        options.issue_key,
        options.order_by,
        Some(options.limit),
        Some(options.start_at),
    )
    .await?;
    super::print_result(&data, options.json)
}

pub async fn changelog_handler(jira: &super::JiraClient, options: ChangelogOptions) -> Result<()> {
    let data = get_changelog_data(
        jira,
        options.issue_key,
        Some(options.limit),
        Some(options.start_at),
    )
    .await?;
    super::print_result(&data, options.json)
}

pub async fn transitions_handler(
    jira: &super::JiraClient,
    options: TransitionOptions,
) -> Result<()> {
    let data = get_transitions_data(jira, options.issue_key).await?;
    super::print_result(&data, options.json)
}
