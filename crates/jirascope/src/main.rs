use crate::prelude::*;
use clap::Parser;

mod jira;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Read-only Jira query tools for LLM coding agents, over CLI and MCP"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "JIRASCOPE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Jira read operations
    #[clap(subcommand)]
    Jira(crate::jira::Commands),

    /// Start the Model Context Protocol server on stdio
    Mcp,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Jira(cmd) => crate::jira::run(cmd, app.global).await,
        SubCommands::Mcp => crate::mcp::run(app.global).await,
    }
}
