//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

use ats_match_core::{ResumeContent, markdown};

pub mod extract;
pub mod gaps;
pub mod info;
pub mod rank;
pub mod report;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a job description, converting Markdown (`.md`) to plain text.
pub fn read_job_description(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = read_input_file(path, max_bytes)?;
    if path.extension() == Some("md") {
        Ok(markdown::to_plain_text(&content))
    } else {
        Ok(content)
    }
}

/// Read and parse a JSON resume document.
pub fn read_resume(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<ResumeContent> {
    let content = read_input_file(path, max_bytes)?;
    ResumeContent::from_json(&content).with_context(|| format!("failed to parse resume {path}"))
}
