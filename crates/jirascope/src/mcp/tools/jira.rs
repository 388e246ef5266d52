use crate::jira::JiraClient;
use crate::prelude::{eprintln, *};
use jirascope_core::error::ErrorEnvelope;
use jirascope_core::projection::ProjectedResult;
use serde::Deserialize;

use super::{CallToolResult, Content, JsonRpcError};

fn invalid_args(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError::invalid_params(format!("Invalid arguments: {e}"))
}

fn parse_args<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(invalid_args)
}

/// Wrap an operation outcome as an MCP tool result. Failures stay inside the
/// protocol: the serialized error envelope travels as tool content flagged
/// with `isError`, never as an uncaught fault.
fn into_tool_result(
    outcome: Result<ProjectedResult, ErrorEnvelope>,
) -> Result<serde_json::Value, JsonRpcError> {
    let (text, is_error) = match outcome {
        Ok(data) => (serde_json::to_string_pretty(&data), None),
        Err(envelope) => (serde_json::to_string_pretty(&envelope), Some(true)),
    };

    let text = text.map_err(|e| JsonRpcError::internal(format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

/// Handle the jira_search tool
pub async fn handle_search(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SearchArgs {
        jql: String,
        fields: Option<String>,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: SearchArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling jira_search: jql={}, limit={:?}, startAt={:?}",
            args.jql, args.limit, args.start_at
        );
    }

    into_tool_result(
        crate::jira::search::search_issues_data(
            client,
            args.jql,
            args.fields,
            args.limit,
            args.start_at,
        )
        .await,
    )
}

/// Handle the jira_get tool
pub async fn handle_get(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetArgs {
        #[serde(rename = "issueKey")]
        issue_key: String,
        fields: Option<String>,
        expand: Option<String>,
    }

    let args: GetArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling jira_get: issueKey={}, expand={:?}",
            args.issue_key, args.expand
        );
    }

    into_tool_result(
        crate::jira::issue::get_issue_data(client, args.issue_key, args.fields, args.expand).await,
    )
}

/// Handle the jira_comments tool
pub async fn handle_comments(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CommentArgs {
        #[serde(rename = "issueKey")]
        issue_key: String,
        #[serde(rename = "orderBy")]
        order_by: Option<String>,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: CommentArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling jira_comments: issueKey={}", args.issue_key);
    }

    into_tool_result(
        crate::jira::issue::get_comments_data(
            client,
            args.issue_key,
            args.order_by.unwrap_or_else(|| "-created".to_string()),
            args.limit,
            args.start_at,
        )
        .await,
    )
}

/// Handle the jira_changelog tool
pub async fn handle_changelog(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ChangelogArgs {
        #[serde(rename = "issueKey")]
        issue_key: String,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: ChangelogArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling jira_changelog: issueKey={}", args.issue_key);
    }

    into_tool_result(
        crate::jira::issue::get_changelog_data(client, args.issue_key, args.limit, args.start_at)
            .await,
    )
}

/// Handle the jira_transitions tool
pub async fn handle_transitions(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct TransitionArgs {
        #[serde(rename = "issueKey")]
        issue_key: String,
    }

    let args: TransitionArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling jira_transitions: issueKey={}", args.issue_key);
    }

    into_tool_result(crate::jira::issue::get_transitions_data(client, args.issue_key).await)
}

/// Handle the jira_projects tool
pub async fn handle_projects(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ProjectArgs {
        query: Option<String>,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: ProjectArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling jira_projects: query={:?}", args.query);
    }

    into_tool_result(
        crate::jira::project::list_projects_data(client, args.query, args.limit, args.start_at)
            .await,
    )
}

/// Handle the jira_boards tool
pub async fn handle_boards(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct BoardArgs {
        #[serde(rename = "projectKeyOrId")]
        project: Option<String>,
        #[serde(rename = "boardType")]
        board_type: Option<String>,
        name: Option<String>,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: BoardArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling jira_boards: project={:?}, type={:?}, name={:?}",
            args.project, args.board_type, args.name
        );
    }

    into_tool_result(
        crate::jira::board::list_boards_data(
            client,
            args.project,
            args.board_type,
            args.name,
            args.limit,
            args.start_at,
        )
        .await,
    )
}

/// Handle the jira_sprints tool
pub async fn handle_sprints(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SprintArgs {
        #[serde(rename = "boardId")]
        board_id: u64,
        state: Option<String>,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: SprintArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling jira_sprints: boardId={}, state={:?}",
            args.board_id, args.state
        );
    }

    into_tool_result(
        crate::jira::board::list_sprints_data(
            client,
            args.board_id,
            args.state,
            args.limit,
            args.start_at,
        )
        .await,
    )
}

/// Handle the jira_sprint_issues tool
pub async fn handle_sprint_issues(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SprintIssueArgs {
        #[serde(rename = "sprintId")]
        sprint_id: u64,
        fields: Option<String>,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: SprintIssueArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling jira_sprint_issues: sprintId={}", args.sprint_id);
    }

    into_tool_result(
        crate::jira::board::get_sprint_issues_data(
            client,
            args.sprint_id,
            args.fields,
            args.limit,
            args.start_at,
        )
        .await,
    )
}

/// Handle the jira_users tool
pub async fn handle_users(
    arguments: Option<serde_json::Value>,
    client: &JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UserArgs {
        query: String,
        limit: Option<i64>,
        #[serde(rename = "startAt")]
        start_at: Option<i64>,
    }

    let args: UserArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling jira_users: query={}", args.query);
    }

    into_tool_result(
        crate::jira::user::search_users_data(
            client,
            args.query,
            Some(args.limit.unwrap_or(10)),
            args.start_at,
        )
        .await,
    )
}
