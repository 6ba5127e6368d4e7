//! Extract command: categorized keywords from a job description.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use ats_match_core::{KeywordCategory, Vocabulary};

use super::read_job_description;

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Job description file (`.md` files are converted to plain text).
    pub job: Utf8PathBuf,

    /// Only show keywords of this category.
    #[arg(long, value_enum)]
    pub category: Option<KeywordCategory>,
}

/// Extract keywords from a job description, in priority order.
#[instrument(name = "cmd_extract", skip_all, fields(job = %args.job))]
pub fn cmd_extract(
    args: ExtractArgs,
    global_json: bool,
    vocabulary: &Vocabulary,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(job = %args.job, category = ?args.category, "executing extract command");

    let text = read_job_description(&args.job, max_input_bytes)?;
    let mut keywords = vocabulary.extract(&text);
    if let Some(category) = args.category {
        keywords.retain(|k| k.category == category);
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&keywords)?);
        return Ok(());
    }

    if keywords.is_empty() {
        println!("{}", "No known keywords found.".yellow());
        return Ok(());
    }

    let mut current = None;
    for keyword in &keywords {
        if current != Some(keyword.category) {
            current = Some(keyword.category);
            println!("{}", keyword.category.to_string().bold().underline());
        }
        println!("  {} {}", keyword.keyword, format!("x{}", keyword.frequency).dimmed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn job(dir: &TempDir) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("jd.txt")).unwrap();
        fs::write(&path, "Python and SQL. Teamwork matters.").unwrap();
        path
    }

    #[test]
    fn extract_text_succeeds() {
        let tmp = TempDir::new().unwrap();
        let args = ExtractArgs {
            job: job(&tmp),
            category: None,
        };
        assert!(cmd_extract(args, false, Vocabulary::builtin(), None).is_ok());
    }

    #[test]
    fn extract_json_with_filter_succeeds() {
        let tmp = TempDir::new().unwrap();
        let args = ExtractArgs {
            job: job(&tmp),
            category: Some(KeywordCategory::SoftSkill),
        };
        assert!(cmd_extract(args, true, Vocabulary::builtin(), None).is_ok());
    }

    #[test]
    fn missing_file_fails() {
        let args = ExtractArgs {
            job: Utf8PathBuf::from("/nonexistent/jd.txt"),
            category: None,
        };
        assert!(cmd_extract(args, false, Vocabulary::builtin(), None).is_err());
    }
}
