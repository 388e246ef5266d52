use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::{JsonRpcError, JsonRpcResponse};

/// Serve JSON-RPC over stdin/stdout until EOF. Blank lines are skipped; a
/// response that fails to serialize is reported back through the protocol
/// rather than tearing the server down.
pub async fn serve(jira: crate::jira::JiraClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Serving MCP over stdio; one JSON-RPC message per line.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let request = line.trim();
        if request.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("<- {request}");
        }

        let response = super::handle_request(request, &jira, &global).await;
        let payload = encode_response(response)?;

        if global.verbose {
            eprintln!("-> {payload}");
        }

        stdout.write_all(payload.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

fn encode_response(response: JsonRpcResponse) -> Result<String> {
    match serde_json::to_string(&response) {
        Ok(json) => Ok(json),
        Err(e) => {
            let fallback = JsonRpcResponse::failure(
                None,
                JsonRpcError::internal(format!("response serialization failed: {e}")),
            );
            Ok(serde_json::to_string(&fallback)?)
        }
    }
}
