//! Agile reads: boards, board sprints, sprint issues
//!
//! Board discovery, sprint discovery, and sprint contents are three
//! independent operations rather than one hidden chain; a caller that
//! already knows a board or sprint id can start anywhere in the
//! boards -> sprints -> sprint-issues composition.

use jirascope_core::error::ErrorEnvelope;
use jirascope_core::jira::{default_board_paths, default_search_paths, default_sprint_paths};
use jirascope_core::pagination::{Page, PageStyle};
use jirascope_core::projection::{parse_field_list, server_field_names, ProjectedResult};
use jirascope_core::validate::{parse_board_type, parse_sprint_states};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Options for listing boards
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct BoardListOptions {
    /// Filter boards by project key or ID
    #[arg(short, long)]
    pub project: Option<String>,

    /// Filter by board type ('scrum', 'kanban', 'simple')
    #[arg(short = 't', long = "type")]
    pub board_type: Option<String>,

    /// Filter boards by name (substring match)
    #[arg(short, long)]
    pub name: Option<String>,

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

/// Options for listing sprints on a board
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SprintListOptions {
    /// Board ID (or set JIRA_BOARD_ID)
    #[arg(long, env = "JIRA_BOARD_ID")]
    pub board: u64,

    /// Filter by sprint state(s), comma-separated ('active', 'closed', 'future')
    #[arg(long)]
    pub state: Option<String>,

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

/// Options for listing the issues in a sprint
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SprintIssueOptions {
    /// Sprint ID
    pub sprint_id: u64,

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

/// List agile boards, optionally filtered by project, type, or name.
pub async fn list_boards_data(
    jira: &super::JiraClient,
    project: Option<String>,
    board_type: Option<String>,
    name: Option<String>,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    let page = Page::new(start_at, limit)?;

    let mut params = vec![
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
    ];
    if let Some(project) = project.filter(|p| !p.trim().is_empty()) {
        params.push(("projectKeyOrId", project));
    }
    if let Some(board_type) = board_type {
        params.push(("type", parse_board_type(&board_type)?));
    }
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        params.push(("name", name));
    }

    jira.fetch_page(
        "/rest/agile/1.0/board",
        params,
        PageStyle::Flagged,
        "values",
        page,
        &default_board_paths(),
    )
    .await
}

/// List sprints for a board, optionally filtered by state.
pub async fn list_sprints_data(
    jira: &super::JiraClient,
    board_id: u64,
    state: Option<String>,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    let page = Page::new(start_at, limit)?;

    let mut params = vec![
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
    ];
    if let Some(state) = state {
        params.push(("state", parse_sprint_states(&state)?));
    }

    jira.fetch_page(
        &format!("/rest/agile/1.0/board/{board_id}/sprint"),
        params,
        PageStyle::Flagged,
        "values",
        page,
        &default_sprint_paths(),
    )
    .await
}

/// List the issues in a sprint. Takes the sprint id directly; resolving a
/// board to its sprints is the caller's composition.
pub async fn get_sprint_issues_data(
    jira: &super::JiraClient,
    sprint_id: u64,
    fields: Option<String>,
    limit: Option<i64>,
    start_at: Option<i64>,
) -> Result<ProjectedResult, ErrorEnvelope> {
    let page = Page::new(start_at, limit)?;

    let requested = parse_field_list(fields.as_deref());
    let paths = if requested.is_empty() {
        default_search_paths()
    } else {
        requested
    };

    let mut params = vec![
        ("maxResults", page.max_results.to_string()),
        ("startAt", page.start_at.to_string()),
    ];
    if let Some(names) = server_field_names(&paths) {
        params.push(("fields", names));
    }

    // The sprint issue endpoint reports an offset envelope (issues + total),
    // unlike its sibling agile listings.
    jira.fetch_page(
        &format!("/rest/agile/1.0/sprint/{sprint_id}/issue"),
        params,
        PageStyle::Offset,
        "issues",
        page,
        &paths,
    )
    .await
}

pub async fn boards_handler(jira: &super::JiraClient, options: BoardListOptions) -> Result<()> {
    let data = list_boards_data(
        jira,
        options.project,
        options.board_type,
        options.name,
        Some(options.limit),
        Some(options.start_at),
    )
    .await?;
    super::print_result(&data, options.json)
}

pub async fn sprints_handler(jira: &super::JiraClient, options: SprintListOptions) -> Result<()> {
    let data = list_sprints_data(
        jira,
        options.board,
        options.state,
        Some(options.limit),
        Some(options.start_at),
    )
    .await?;
    super::print_result(&data, options.json)
}

pub async fn sprint_issues_handler(
    jira: &super::JiraClient,
    options: SprintIssueOptions,
) -> Result<()> {
    let data = get_sprint_issues_data(
        jira,
        options.sprint_id,
        options.fields,
        Some(options.limit),
        Some(options.start_at),
    )
    .await?;
    super::print_result(&data, options.json)
}
