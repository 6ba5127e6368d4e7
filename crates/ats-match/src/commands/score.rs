//! Score command: weighted ATS score of a resume against a job description.

use anyhow::bail;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use ats_match_core::{ScoreResult, Vocabulary, calculate_ats_score};

use super::{read_job_description, read_resume};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Resume file (JSON).
    pub resume: Utf8PathBuf,

    /// Job description file (`.md` files are converted to plain text).
    pub job: Utf8PathBuf,

    /// Minimum acceptable score (0-100).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub min_score: Option<u32>,
}

/// Score a resume against a job description.
#[instrument(name = "cmd_score", skip_all, fields(resume = %args.resume, job = %args.job))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config_min_score: Option<u32>,
    vocabulary: &Vocabulary,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(min_score = ?args.min_score, "executing score command");

    let resume = read_resume(&args.resume, max_input_bytes)?;
    let job = read_job_description(&args.job, max_input_bytes)?;
    let keywords = vocabulary.extract(&job);
    let result = calculate_ats_score(&resume, &keywords);
    let min_score = args.min_score.or(config_min_score);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_score(&result);
    }

    check_min_score(&args.resume, result.score, min_score, global_json)
}

fn print_score(result: &ScoreResult) {
    let b = &result.breakdown;
    println!("{} {}/100", "Score:".bold(), result.score);
    println!("  {}: {}", "Hard skills".dimmed(), b.hard_skill_score);
    println!("  {}: {}", "Soft skills".dimmed(), b.soft_skill_score);
    println!("  {}: {}", "Keyword density".dimmed(), b.keyword_density_score);
    println!(
        "  {}: {} matched, {} missing",
        "Keywords".dimmed(),
        result.matched_keywords.len(),
        result.missing_keywords.len(),
    );
}

/// Fail when `score` is below `min_score`; print a PASS line otherwise.
pub(crate) fn check_min_score(
    resume: &Utf8Path,
    score: u32,
    min_score: Option<u32>,
    quiet_pass: bool,
) -> anyhow::Result<()> {
    let Some(min) = min_score else {
        return Ok(());
    };
    if score < min {
        bail!("{resume} scores {score} (min: {min}). Add the missing keywords to raise it.");
    }
    if !quiet_pass {
        println!("{} {resume} scores {score} (min: {min})", "PASS:".green());
    }
    Ok(())
}
