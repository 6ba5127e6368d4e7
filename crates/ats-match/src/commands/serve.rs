//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use ats_match_core::Vocabulary;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio; no options yet.
}

/// Serve MCP requests on stdin/stdout until the client disconnects.
///
/// Logs go to stderr (and the log file, if configured) so they never mix
/// with protocol traffic.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    vocabulary: Vocabulary,
) -> anyhow::Result<()> {
    info!(
        terms = vocabulary.len(),
        max_input_bytes = ?max_input_bytes,
        "starting MCP server on stdio"
    );

    let service = ProjectServer::with_settings(vocabulary, max_input_bytes)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
