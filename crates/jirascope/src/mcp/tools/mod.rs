mod jira;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "jirascope".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

fn paging_properties() -> serde_json::Value {
    serde_json::json!({
        "limit": {
            "type": "number",
            "description": "Maximum number of results per page (default: 50, max: 100)"
        },
        "startAt": {
            "type": "number",
            "description": "Start offset for pagination. Pass the next_cursor from the previous response to fetch the following page."
        }
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let paging = paging_properties();
    let tools = vec![
        Tool {
            name: "jira_search".to_string(),
            description: "Search Jira issues using JQL (Jira Query Language). The query string is passed to Jira verbatim. Returns a compact projection of each issue plus total and next_cursor for pagination. Requires JIRA_URL, JIRA_EMAIL, and JIRA_API_TOKEN environment variables.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "jql": {
                        "type": "string",
                        "description": "JQL query (e.g., 'project = PROJ AND status = \"In Progress\"')"
                    },
                    "fields": {
                        "type": "string",
                        "description": "Comma-separated field paths to return, dotted paths allowed (e.g., 'key,fields.summary,fields.assignee.displayName'). Defaults to a compact subset."
                    },
                    "limit": paging["limit"],
                    "startAt": paging["startAt"]
                },
                "required": ["jql"]
            }),
        },
        Tool {
            name: "jira_get".to_string(),
            description: "Get details of a single issue by key. Defaults to a compact field subset; pass expand='changelog' to include the changelog, or fields to pick exact paths.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issueKey": {
                        "type": "string",
                        "description": "Issue key (e.g., 'PROJ-123')"
                    },
                    "fields": {
                        "type": "string",
                        "description": "Comma-separated field paths to return"
                    },
                    "expand": {
                        "type": "string",
                        "description": "Comma-separated expansions: changelog, renderedFields, names, transitions"
                    }
                },
                "required": ["issueKey"]
            }),
        },
        Tool {
            name: "jira_comments".to_string(),
            description: "List comments on an issue. Comments often contain blockers, decisions, and context. Newest first by default.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issueKey": {
                        "type": "string",
                        "description": "Issue key (e.g., 'PROJ-123')"
                    },
                    "orderBy": {
                        "type": "string",
                        "description": "Sort order ('-created' for newest first, '+created' for oldest first)",
                        "enum": ["created", "-created", "+created"]
                    },
                    "limit": paging["limit"],
                    "startAt": paging["startAt"]
                },
                "required": ["issueKey"]
            }),
        },
        Tool {
            name: "jira_changelog".to_string(),
            description: "Get the changelog for an issue: status transitions, reassignments, and field changes with timestamps.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issueKey": {
                        "type": "string",
                        "description": "Issue key (e.g., 'PROJ-123')"
                    },
                    "limit": paging["limit"],
                    "startAt": paging["startAt"]
                },
                "required": ["issueKey"]
            }),
        },
        Tool {
            name: "jira_transitions".to_string(),
            description: "List the workflow transitions currently available for an issue, i.e. which status changes are possible.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issueKey": {
                        "type": "string",
                        "description": "Issue key (e.g., 'PROJ-123')"
                    }
                },
                "required": ["issueKey"]
            }),
        },
        Tool {
            name: "jira_projects".to_string(),
            description: "List projects visible to the current user, optionally filtered by name.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Filter projects by name (case-insensitive substring match)"
                    },
                    "limit": paging["limit"],
                    "startAt": paging["startAt"]
                },
                "required": []
            }),
        },
        Tool {
            name: "jira_boards".to_string(),
            description: "List agile boards, optionally filtered by project, type, or name. Use this to find a board id before listing its sprints.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "projectKeyOrId": {
                        "type": "string",
                        "description": "Filter boards by project key or ID"
                    },
                    "boardType": {
                        "type": "string",
                        "description": "Filter by board type",
                        "enum": ["scrum", "kanban", "simple"]
                    },
                    "name": {
                        "type": "string",
                        "description": "Filter boards by name (substring match)"
                    },
                    "limit": paging["limit"],
                    "startAt": paging["startAt"]
                },
                "required": []
            }),
        },
        Tool {
            name: "jira_sprints".to_string(),
            description: "List sprints for a board, optionally filtered by state. Use the sprint id with jira_sprint_issues to see sprint contents.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "boardId": {
                        "type": "number",
                        "description": "The ID of the board"
                    },
                    "state": {
                        "type": "string",
                        "description": "Filter by sprint state ('active', 'closed', 'future'). Comma-separate for multiple."
                    },
                    "limit": paging["limit"],
                    "startAt": paging["startAt"]
                },
                "required": ["boardId"]
            }),
        },
        Tool {
            name: "jira_sprint_issues".to_string(),
            description: "List the issues in a sprint by sprint id.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "sprintId": {
                        "type": "number",
                        "description": "The ID of the sprint"
                    },
                    "fields": {
                        "type": "string",
                        "description": "Comma-separated field paths to return. Defaults to a compact subset."
                    },
                    "limit": paging["limit"],
                    "startAt": paging["startAt"]
                },
                "required": ["sprintId"]
            }),
        },
        Tool {
            name: "jira_users".to_string(),
            description: "Search Jira users by name or email. Use this to resolve display names to account IDs for JQL queries.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search string (matches name, email, or username)"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of results per page (default: 10)"
                    },
                    "startAt": paging["startAt"]
                },
                "required": ["query"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    client: &crate::jira::JiraClient,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))?;

    let args = params.arguments;
    match params.name.as_str() {
        "jira_search" => jira::handle_search(args, client, global).await,
        "jira_get" => jira::handle_get(args, client, global).await,
        "jira_comments" => jira::handle_comments(args, client, global).await,
        "jira_changelog" => jira::handle_changelog(args, client, global).await,
        "jira_transitions" => jira::handle_transitions(args, client, global).await,
        "jira_projects" => jira::handle_projects(args, client, global).await,
        "jira_boards" => jira::handle_boards(args, client, global).await,
        "jira_sprints" => jira::handle_sprints(args, client, global).await,
        "jira_sprint_issues" => jira::handle_sprint_issues(args, client, global).await,
        "jira_users" => jira::handle_users(args, client, global).await,
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            params.name
        ))),
    }
}
