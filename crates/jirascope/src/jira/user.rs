use jirascope_core::error::ErrorEnvelope;
use jirascope_core::jira::default_user_paths;
use jirascope_core::pagination::{Page, PageStyle};
use jirascope_core::projection::ProjectedResult;
use jirascope_core::validate::require_non_empty;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Options for searching users
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "NOTES:
  - Use this to resolve display names or emails to account IDs for JQL
    (e.g. assignee = <accountId>)
  - The endpoint returns a bare list without a total; a full page means
    there may be more results at the next offset")]
pub struct UserSearchOptions {
    /// Search string (matches name, email, or username)
    pub query: String,

    /// Maximum number of results to return per page
    #[arg(short, long, default_value = "10")]
    pub limit: i64,

    /// Index of the first result, for pagination
    #[arg(long, default_value = "0")]
    pub start_at: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Search Jira users by name or email.
pub async fn search_users_data(
    jira: &super::JiraClient,
    query: String,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    require_non_empty("query", &query)?;
    let page = Page::new(start_at, limit)?;

    let params = vec![
        ("query", query),
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
    ];

    jira.fetch_page(
        "/rest/api/3/user/search",
        params,
        PageStyle::Offset,
        "values",
        page,
        &default_user_paths(),
    )
    .await
}

/// Handle the users command
pub async fn handler(jira: &super::JiraClient, options: UserSearchOptions) -> Result<()> {
    let data = search_users_data(jira, options.query, Some(options.limit), Some(options.start_at))
        .await?;
    super::print_result(&data, options.json)
}
