//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes keyword extraction and resume scoring over the MCP
//! protocol, making it available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer: it wraps the same core library that
//! the CLI commands use. Each `#[tool]` method delegates to core library
//! functions rather than implementing business logic directly.
//!
//! Every tool returns pretty-printed JSON text. Inputs larger than the
//! configured limit are rejected with an invalid-params error.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use ats_match_core::gaps::analyze_gaps;
use ats_match_core::markdown;
use ats_match_core::report::AnalysisSession;
use ats_match_core::scoring::calculate_ats_score;
use ats_match_core::{CategorizedKeyword, KeywordCategory, ResumeContent, Vocabulary};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `extract_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ExtractKeywordsParams {
    /// Job description text.
    pub text: String,
    /// Whether the text is Markdown and should be converted to plain text first.
    #[serde(default)]
    pub markdown: bool,
    /// Only return keywords of this category.
    pub category: Option<KeywordCategory>,
}

/// Parameters for the `score_resume` and `analyze_gaps` tools.
///
/// Supply either `job_description` or a pre-extracted `keywords` list.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ResumeJobParams {
    /// The resume document (camelCase JSON resume shape).
    pub resume: ResumeContent,
    /// Job description text to extract keywords from.
    pub job_description: Option<String>,
    /// Keywords already extracted from a job description. Wins over `job_description`.
    pub keywords: Option<Vec<CategorizedKeyword>>,
}

/// Parameters for the `full_report` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct FullReportParams {
    /// The resume document (camelCase JSON resume shape).
    pub resume: ResumeContent,
    /// Job description text.
    pub job_description: String,
    /// Return only the scan snapshot (score, keyword lists, feedback).
    #[serde(default)]
    pub snapshot: bool,
}

/// MCP server exposing resume scoring to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    vocabulary: Arc<Vocabulary>,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with the built-in vocabulary and the default input limit.
    pub fn new() -> Self {
        Self::with_settings(
            Vocabulary::builtin().clone(),
            Some(ats_match_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }

    /// Create a server with a specific vocabulary and input limit.
    pub fn with_settings(vocabulary: Vocabulary, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            vocabulary: Arc::new(vocabulary),
            max_input_bytes,
        }
    }

    /// Reject inputs over the configured size limit.
    fn check_size(&self, what: &str, len: usize) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if len > max => Err(McpError::invalid_params(
                format!("{what} too large: {len} bytes (limit: {max} bytes)"),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Check the serialized size of a resume against the limit.
    fn check_resume(&self, resume: &ResumeContent) -> Result<(), McpError> {
        let len = serde_json::to_vec(resume)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
            .len();
        self.check_size("resume", len)
    }

    /// Resolve the keyword list for a resume/job request.
    fn job_keywords(&self, params: &ResumeJobParams) -> Result<Vec<CategorizedKeyword>, McpError> {
        if let Some(ref keywords) = params.keywords {
            let len = serde_json::to_vec(keywords)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
                .len();
            self.check_size("keywords", len)?;
            return Ok(keywords.clone());
        }
        let Some(ref text) = params.job_description else {
            return Err(McpError::invalid_params(
                "either job_description or keywords is required",
                None,
            ));
        };
        self.check_size("job description", text.len())?;
        Ok(self.vocabulary.extract(text))
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "vocabulary_terms": self.vocabulary.len(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Extract categorized keywords from a job description.
    #[tool(
        description = "Extract hard-skill, soft-skill and general keywords from a job description. Returns keywords in priority order with occurrence counts."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn extract_keywords(
        &self,
        Parameters(params): Parameters<ExtractKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "extract_keywords",
            markdown = params.markdown,
            "executing MCP tool"
        );
        self.check_size("text", params.text.len())?;

        let text = if params.markdown {
            markdown::to_plain_text(&params.text)
        } else {
            params.text
        };
        let mut keywords = self.vocabulary.extract(&text);
        if let Some(category) = params.category {
            keywords.retain(|k| k.category == category);
        }

        tracing::info!(
            tool = "extract_keywords",
            count = keywords.len(),
            "MCP tool completed"
        );
        json_result(&keywords)
    }

    /// Score a resume against a job description.
    #[tool(
        description = "Score a resume (JSON resume shape) against a job description or keyword list. Returns a 0-100 score with hard skill, soft skill and keyword density breakdown."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_resume(
        &self,
        Parameters(params): Parameters<ResumeJobParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "score_resume", "executing MCP tool");
        self.check_resume(&params.resume)?;
        let keywords = self.job_keywords(&params)?;

        let result = calculate_ats_score(&params.resume, &keywords);

        tracing::info!(
            tool = "score_resume",
            score = result.score,
            "MCP tool completed"
        );
        json_result(&result)
    }

    /// List the job keywords a resume lacks.
    #[tool(
        description = "Find job keywords missing from a resume, grouped by category and sorted by priority, with a suggestion for each."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_gaps(
        &self,
        Parameters(params): Parameters<ResumeJobParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_gaps", "executing MCP tool");
        self.check_resume(&params.resume)?;
        let keywords = self.job_keywords(&params)?;

        let gaps = analyze_gaps(&params.resume, &keywords);

        tracing::info!(
            tool = "analyze_gaps",
            missing = gaps.missing_keywords.len(),
            "MCP tool completed"
        );
        json_result(&gaps)
    }

    /// Run the whole analysis in one call.
    #[tool(
        description = "Full ATS report for a resume and job description: extracted keywords, score breakdown, gaps with suggestions, and feedback text."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn full_report(
        &self,
        Parameters(params): Parameters<FullReportParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "full_report", snapshot = params.snapshot, "executing MCP tool");
        self.check_resume(&params.resume)?;
        self.check_size("job description", params.job_description.len())?;

        let report =
            AnalysisSession::new(&self.vocabulary).analyze(&params.resume, &params.job_description);

        tracing::info!(
            tool = "full_report",
            score = report.score.score,
            "MCP tool completed"
        );
        if params.snapshot {
            json_result(&report.snapshot())
        } else {
            json_result(&report)
        }
    }
}

/// Serialize a tool result as pretty JSON text content.
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Extract job keywords, score resumes for ATS compatibility, \
                 and list missing keywords with suggestions.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
