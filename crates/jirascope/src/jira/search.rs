use jirascope_core::error::ErrorEnvelope;
use jirascope_core::jira::default_search_paths;
use jirascope_core::pagination::{Page, PageStyle};
use jirascope_core::projection::{parse_field_list, server_field_names, ProjectedResult};
use jirascope_core::validate::require_non_empty;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Options for searching Jira issues
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Get all tickets assigned to the current user:
  jirascope jira search \"assignee = currentUser()\"

  # Get only active tickets (excluding Done/Closed):
  jirascope jira search \"assignee = currentUser() AND status NOT IN (Done, Closed)\"

  # Ask for specific fields, dotted paths allowed:
  jirascope jira search \"project = PROJ\" --fields key,fields.summary,fields.assignee.displayName

  # Fetch the next page using the cursor from the previous response:
  jirascope jira search \"project = PROJ\" --limit 50 --start-at 50

NOTES:
  - JQL queries use Jira Query Language syntax; the query string is passed
    through to Jira verbatim, so any JQL error is Jira's to report
  - Use currentUser() to reference the logged-in user
  - Results are limited to 50 per page by default; the hard cap is 100")]
pub struct SearchOptions {
    /// JQL query (e.g., "project = PROJ AND status = Open")
    #[clap(env = "JIRA_QUERY")]
    pub jql: String,

    /// Comma-separated field paths to return (default: a compact subset)
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Maximum number of results to return per page
    #[arg(short, long, default_value = "50")]
    pub limit: i64,

    /// Index of the first result, for pagination
    #[arg(long, default_value = "0")]
    pub start_at: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP.
pub async fn search_issues_data(
    jira: &super::JiraClient,
    jql: String,
    fields: Option<String>,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    require_non_empty("jql", &jql)?;
    let page = Page::new(start_at, limit)?;

    let requested = parse_field_list(fields.as_deref());
    let paths = if requested.is_empty() {
        default_search_paths()
    } else {
        requested
    };

    let mut params = vec![
        ("jql", jql),
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
    ];
    if let Some(names) = server_field_names(&paths) {
        params.push(("fields", names));
    }

    jira.fetch_page(
        "/rest/api/3/search/jql",
        params,
        PageStyle::Offset,
        "issues",
        page,
        &paths,
    )
    .await
}

/// Handle the search command
pub async fn handler(jira: &super::JiraClient, options: SearchOptions) -> Result<()> {
    let data = search_issues_data(
        jira,
        options.jql,
        options.fields,
        Some(options.limit),
        Some(options.start_at),
    )
    .await?;

    super::print_result(&data, options.json)
}
