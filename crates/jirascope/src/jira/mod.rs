pub mod board;
pub mod issue;
pub mod project;
pub mod search;
pub mod transport;
pub mod user;

use colored::Colorize;
use jirascope_core::error::ErrorEnvelope;
use jirascope_core::jira::normalize_base_url;
use jirascope_core::pagination::{normalize, split_envelope, Page, PageStyle};
use jirascope_core::projection::{project_items, ProjectedResult};
use serde_json::Value;

use crate::prelude::{println, *};

/// Jira commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search issues using JQL
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Get detailed information about a single issue
    #[clap(name = "get")]
    Get(issue::GetOptions),

    /// List comments on an issue
    #[clap(name = "comments")]
    Comments(issue::CommentOptions),

    /// Show the changelog of an issue
    #[clap(name = "changelog")]
    Changelog(issue::ChangelogOptions),

    /// Show the workflow transitions available for an issue
    #[clap(name = "transitions")]
    Transitions(issue::TransitionOptions),

    /// List projects visible to the current user
    #[clap(name = "projects")]
    Projects(project::ProjectListOptions),

    /// List agile boards
    #[clap(name = "boards")]
    Boards(board::BoardListOptions),

    /// List sprints on a board
    #[clap(name = "sprints")]
    Sprints(board::SprintListOptions),

    /// List the issues in a sprint
    #[clap(name = "sprint-issues")]
    SprintIssues(board::SprintIssueOptions),

    /// Search users by name or email
    #[clap(name = "users")]
    Users(user::UserSearchOptions),
}

/// Run Jira commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running Jira command...");
    }

    let jira = JiraClient::from_env()?;

    match cmd {
        Commands::Search(options) => search::handler(&jira, options).await,
        Commands::Get(options) => issue::get_handler(&jira, options).await,
        Commands::Comments(options) => issue::comments_handler(&jira, options).await,
        Commands::Changelog(options) => issue::changelog_handler(&jira, options).await,
        Commands::Transitions(options) => issue::transitions_handler(&jira, options).await,
        Commands::Projects(options) => project::handler(&jira, options).await,
        Commands::Boards(options) => board::boards_handler(&jira, options).await,
        Commands::Sprints(options) => board::sprints_handler(&jira, options).await,
        Commands::SprintIssues(options) => board::sprint_issues_handler(&jira, options).await,
        Commands::Users(options) => user::handler(&jira, options).await,
    }
}

/// Jira configuration from environment variables
#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl JiraConfig {
    /// Load configuration from environment variables. Read once per
    /// process and never mutated afterwards.
    pub fn from_env() -> Result<Self, ErrorEnvelope> {
        let base_url = std::env::var("JIRA_URL")
            .map_err(|_| ErrorEnvelope::validation("JIRA_URL environment variable not set"))?;
        let email = std::env::var("JIRA_EMAIL")
            .map_err(|_| ErrorEnvelope::validation("JIRA_EMAIL environment variable not set"))?;
        let api_token = std::env::var("JIRA_API_TOKEN").map_err(|_| {
            ErrorEnvelope::validation("JIRA_API_TOKEN environment variable not set")
        })?;

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            email,
            api_token,
        })
    }
}

/// An authenticated Jira connection: one pooled HTTP client plus the
/// normalized base URL. Built once at process start and shared by every
/// operation, so the environment is read and the connection pool created
/// exactly once per CLI invocation or MCP server lifetime.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
}

impl JiraClient {
    pub fn from_env() -> Result<Self, ErrorEnvelope> {
        Self::new(&JiraConfig::from_env()?)
    }

    /// Build the client with Basic Auth default headers. The token only
    /// ever lives inside the Authorization header.
    pub fn new(config: &JiraConfig) -> Result<Self, ErrorEnvelope> {
        use base64::Engine;
        use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

        let auth_string = format!("{}:{}", config.email, config.api_token);
        let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);

        let mut auth_value = HeaderValue::from_str(&format!("Basic {auth_encoded}")).map_err(
            |_| ErrorEnvelope::validation("credentials contain invalid header characters"),
        )?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(transport::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ErrorEnvelope::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// One raw authenticated GET, path relative to the base URL.
    pub(crate) async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, ErrorEnvelope> {
        let url = format!("{}{path}", self.base_url);
        transport::get_json(&self.http, &url, params).await
    }

    /// Execute one paginated read: call the endpoint, normalize the page
    /// into the uniform cursor contract, and project the items.
    pub(crate) async fn fetch_page(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
        style: PageStyle,
        items_key: &'static str,
        page: Page,
        paths: &[String],
    ) -> Result<ProjectedResult, ErrorEnvelope> {
        let raw = self.get(path, &params).await?;
        let raw_page = split_envelope(raw, items_key)?;
        let (items, total, next_cursor) = normalize(style, page, raw_page);

        Ok(ProjectedResult {
            items: project_items(items, paths),
            total,
            next_cursor,
        })
    }
}

/// Shared CLI rendering for any projected result: a compact table whose
/// columns are the projected paths, plus a pagination footer.
pub(crate) fn display_result(data: &ProjectedResult) {
    if data.items.is_empty() {
        println!("No results.");
    } else {
        let header: Vec<prettytable::Cell> = match data.items[0].as_object() {
            Some(first) => first
                .keys()
                .map(|path| prettytable::Cell::new(&column_label(path).bold().cyan().to_string()))
                .collect(),
            None => vec![prettytable::Cell::new(&"value".bold().cyan().to_string())],
        };
        let mut table = new_table(prettytable::Row::new(header));

        for item in &data.items {
            match item.as_object() {
                Some(record) => {
                    let cells: Vec<prettytable::Cell> = record
                        .values()
                        .map(|value| prettytable::Cell::new(&cell_text(value)))
                        .collect();
                    table.add_row(prettytable::Row::new(cells));
                }
                None => {
                    table.add_row(prettytable::row![cell_text(item)]);
                }
            }
        }

        table.printstd();
    }

    if let Some(total) = data.total {
        println!("\n{} {}", "Total:".bold().cyan(), total);
    }
    if let Some(cursor) = data.next_cursor {
        println!(
            "{} rerun with --start-at {} for the next page",
            "More results:".bold().cyan(),
            cursor
        );
    }
}

fn column_label(path: &str) -> &str {
    path.strip_prefix("fields.").unwrap_or(path)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Print a result either as pretty JSON or as a table.
pub(crate) fn print_result(data: &ProjectedResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        display_result(data);
    }
    Ok(())
}
