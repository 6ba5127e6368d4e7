//! Rank command: score several resumes against one job description.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use ats_match_core::{AnalysisSession, Vocabulary};

use super::{read_job_description, read_resume};

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Job description file (`.md` files are converted to plain text).
    pub job: Utf8PathBuf,

    /// Resume files (JSON).
    #[arg(required = true, num_args = 1..)]
    pub resumes: Vec<Utf8PathBuf>,

    /// Show only the best N resumes.
    #[arg(long)]
    pub top: Option<usize>,
}

/// One resume's place in the ranking.
#[derive(Debug, Serialize)]
struct RankedResume {
    rank: usize,
    resume: Utf8PathBuf,
    score: u32,
    matched: usize,
    missing: usize,
}

/// Score every resume and print them best first.
///
/// Ties keep the order the resumes were given in.
#[instrument(name = "cmd_rank", skip_all, fields(job = %args.job, resumes = args.resumes.len()))]
pub fn cmd_rank(
    args: RankArgs,
    global_json: bool,
    vocabulary: &Vocabulary,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(top = ?args.top, "executing rank command");

    let job = read_job_description(&args.job, max_input_bytes)?;
    let mut session = AnalysisSession::new(vocabulary);

    let progress = if global_json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(args.resumes.len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .context("invalid progress template")?,
    );

    let mut ranked = Vec::with_capacity(args.resumes.len());
    for path in args.resumes {
        progress.set_message(path.to_string());
        let resume = read_resume(&path, max_input_bytes)?;
        let report = session.analyze(&resume, &job);
        ranked.push(RankedResume {
            rank: 0,
            resume: path,
            score: report.score.score,
            matched: report.score.matched_keywords.len(),
            missing: report.score.missing_keywords.len(),
        });
        progress.inc(1);
    }
    progress.finish_and_clear();
    debug!(cache_hits = session.cache_hits(), "keyword cache reused");

    let ranked = rank(ranked, args.top);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    for entry in &ranked {
        println!(
            "{:>3}. {:>3}/100  {}  {}",
            entry.rank,
            entry.score.bold(),
            entry.resume,
            format!("({} matched, {} missing)", entry.matched, entry.missing).dimmed(),
        );
    }
    Ok(())
}

/// Sort best first (stable on ties), number from 1, keep the first `top`.
fn rank(mut entries: Vec<RankedResume>, top: Option<usize>) -> Vec<RankedResume> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    if let Some(top) = top {
        entries.truncate(top);
    }
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}
