use jirascope_core::error::ErrorEnvelope;
use jirascope_core::jira::default_project_paths;
use jirascope_core::pagination::{Page, PageStyle};
use jirascope_core::projection::ProjectedResult;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Options for listing projects
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ProjectListOptions {
    /// Filter projects by name (case-insensitive substring match)
    #[arg(short, long)]
    pub query: Option<String>,

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

/// List projects visible to the current user.
pub async fn list_projects_data(
    jira: &super::JiraClient,
    query: Option<String>,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    let page = Page::new(start_at, limit)?;

    let mut params = vec![
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
    ];
    if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
        params.push(("query", query));
    }

    jira.fetch_page(
        "/rest/api/3/project/search",
        params,
        PageStyle::Offset,
        "values",
        page,
        &default_project_paths(),
    )
    .await
}

/// Handle the projects command
pub async fn handler(jira: &super::JiraClient, options: ProjectListOptions) -> Result<()> {
    let data = list_projects_data(jira, options.query, Some(options.limit), Some(options.start_at))
        .await?;
    super::print_result(&data, options.json)
}
