//! Gaps command: job keywords missing from a resume, with suggestions.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use ats_match_core::gaps::GapAnalysis;
use ats_match_core::{KeywordCategory, Vocabulary, analyze_gaps};

use super::{read_job_description, read_resume};

/// Arguments for the `gaps` subcommand.
#[derive(Args, Debug)]
pub struct GapsArgs {
    /// Resume file (JSON).
    pub resume: Utf8PathBuf,

    /// Job description file (`.md` files are converted to plain text).
    pub job: Utf8PathBuf,

    /// Show at most this many suggestions.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// List missing keywords by priority.
#[instrument(name = "cmd_gaps", skip_all, fields(resume = %args.resume, job = %args.job))]
pub fn cmd_gaps(
    args: GapsArgs,
    global_json: bool,
    vocabulary: &Vocabulary,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(limit = ?args.limit, "executing gaps command");

    let resume = read_resume(&args.resume, max_input_bytes)?;
    let job = read_job_description(&args.job, max_input_bytes)?;
    let keywords = vocabulary.extract(&job);
    let mut gaps = analyze_gaps(&resume, &keywords);
    if let Some(limit) = args.limit {
        gaps.suggestions.truncate(limit);
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&gaps)?);
    } else {
        print_gaps(&gaps);
    }

    Ok(())
}

pub(crate) fn print_gaps(gaps: &GapAnalysis) {
    if gaps.missing_keywords.is_empty() {
        println!(
            "{} every job keyword appears in the resume ({} matched)",
            "No gaps:".green(),
            gaps.matched_keywords.len()
        );
        return;
    }

    println!(
        "{} {} missing, {} matched",
        "Gaps:".bold(),
        gaps.missing_keywords.len(),
        gaps.matched_keywords.len(),
    );
    for suggestion in &gaps.suggestions {
        let keyword = match suggestion.category {
            KeywordCategory::HardSkill => suggestion.keyword.red().to_string(),
            KeywordCategory::SoftSkill => suggestion.keyword.yellow().to_string(),
            KeywordCategory::General => suggestion.keyword.cyan().to_string(),
        };
        println!(
            "  [P{}] {} {}",
            suggestion.priority,
            keyword,
            suggestion.suggestion.dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, resume_json: &str) -> (Utf8PathBuf, Utf8PathBuf) {
        let resume = Utf8PathBuf::try_from(dir.path().join("resume.json")).unwrap();
        let job = Utf8PathBuf::try_from(dir.path().join("jd.md")).unwrap();
        fs::write(&resume, resume_json).unwrap();
        fs::write(&job, "## Stack\n\n- Docker\n- Kubernetes\n\nGood communication.").unwrap();
        (resume, job)
    }

    #[test]
    fn gaps_text_succeeds() {
        let tmp = TempDir::new().unwrap();
        let (resume, job) = fixture(&tmp, r#"{"skills": {"tools": ["Docker"]}}"#);
        let args = GapsArgs {
            resume,
            job,
            limit: Some(1),
        };
        assert!(cmd_gaps(args, false, Vocabulary::builtin(), None).is_ok());
    }

    #[test]
    fn gaps_json_when_nothing_missing() {
        let tmp = TempDir::new().unwrap();
        let (resume, job) = fixture(
            &tmp,
            r#"{"skills": {"tools": ["Docker", "Kubernetes"], "soft": ["Communication"]}}"#,
        );
        let args = GapsArgs {
            resume,
            job,
            limit: None,
        };
        assert!(cmd_gaps(args, true, Vocabulary::builtin(), None).is_ok());
    }

    #[test]
    fn invalid_resume_fails() {
        let tmp = TempDir::new().unwrap();
        let (resume, job) = fixture(&tmp, "[1, 2");
        let args = GapsArgs {
            resume,
            job,
            limit: None,
        };
        assert!(cmd_gaps(args, false, Vocabulary::builtin(), None).is_err());
    }
}
