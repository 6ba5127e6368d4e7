//! Report command: score, keywords, gaps and feedback in one pass.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use ats_match_core::{AnalysisSession, AtsReport, Vocabulary};

use super::gaps::print_gaps;
use super::score::check_min_score;
use super::{read_job_description, read_resume};

/// Arguments for the `report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Resume file (JSON).
    pub resume: Utf8PathBuf,

    /// Job description file (`.md` files are converted to plain text).
    pub job: Utf8PathBuf,

    /// Print only the scan snapshot (score, keyword lists, feedback) as JSON.
    #[arg(long)]
    pub snapshot: bool,

    /// Minimum acceptable score (0-100).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub min_score: Option<u32>,
}

/// Produce the full ATS report for one resume.
#[instrument(name = "cmd_report", skip_all, fields(resume = %args.resume, job = %args.job))]
pub fn cmd_report(
    args: ReportArgs,
    global_json: bool,
    config_min_score: Option<u32>,
    vocabulary: &Vocabulary,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(snapshot = args.snapshot, min_score = ?args.min_score, "executing report command");

    let resume = read_resume(&args.resume, max_input_bytes)?;
    let job = read_job_description(&args.job, max_input_bytes)?;
    let report = AnalysisSession::new(vocabulary).analyze(&resume, &job);
    let machine_output = global_json || args.snapshot;

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&report.snapshot())?);
    } else if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    check_min_score(
        &args.resume,
        report.score.score,
        args.min_score.or(config_min_score),
        machine_output,
    )
}

fn print_report(report: &AtsReport) {
    let score = report.score.score;
    let painted = if score >= ats_match_core::report::STRONG_MATCH {
        score.green().to_string()
    } else if score >= ats_match_core::report::MODERATE_MATCH {
        score.yellow().to_string()
    } else {
        score.red().to_string()
    };
    let b = &report.score.breakdown;

    println!("{} {}/100", "ATS score:".bold(), painted);
    println!(
        "  {} {}  {} {}  {} {}",
        "hard".dimmed(),
        b.hard_skill_score,
        "soft".dimmed(),
        b.soft_skill_score,
        "density".dimmed(),
        b.keyword_density_score,
    );
    println!();
    println!("{}", report.feedback);
    println!();

    let matched: Vec<&str> = report
        .score
        .matched_keywords
        .iter()
        .map(|k| k.keyword.as_str())
        .collect();
    if !matched.is_empty() {
        println!("{} {}", "Matched:".green(), matched.join(", "));
    }
    print_gaps(&report.gaps);
}
