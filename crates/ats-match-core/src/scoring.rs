//! ATS compatibility scoring.
//!
//! A resume is scored against a job's keywords in three parts:
//!
//! - **Hard skills**: frequency-weighted share of hard-skill keywords found.
//! - **Soft skills**: the same for soft-skill keywords.
//! - **Keyword density**: how often matched keywords recur in the resume text,
//!   against a target of [`DENSITY_TARGET`] occurrences each.
//!
//! The parts combine with the fixed weights [`HARD_SKILL_WEIGHT`],
//! [`SOFT_SKILL_WEIGHT`] and [`KEYWORD_DENSITY_WEIGHT`]. Each part is rounded
//! first and the total is the rounded weighted sum of the rounded parts, so it
//! can always be recomputed from the reported breakdown.
//!
//! A category with no keywords scores 100: nothing was asked for, so nothing
//! is missing. Density scores 0 when nothing matched.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::corpus::ResumeCorpus;
use crate::keywords::{CategorizedKeyword, KeywordCategory};
use crate::matcher::{MatchPartition, find_matches};
use crate::normalize::{MIN_IDENTITY_CHARS, normalize_keyword};
use crate::resume::ResumeContent;

/// Weight of the hard-skill score in the total.
pub const HARD_SKILL_WEIGHT: f64 = 0.6;

/// Weight of the soft-skill score in the total.
pub const SOFT_SKILL_WEIGHT: f64 = 0.3;

/// Weight of the keyword-density score in the total.
pub const KEYWORD_DENSITY_WEIGHT: f64 = 0.1;

/// Occurrences per matched keyword that earn a full density score.
pub const DENSITY_TARGET: f64 = 2.0;

/// Per-part scores, each rounded to an integer in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Hard-skill coverage.
    pub hard_skill_score: u32,
    /// Soft-skill coverage.
    pub soft_skill_score: u32,
    /// Keyword recurrence in the resume text.
    pub keyword_density_score: u32,
    /// Weighted total; equal to [`ScoreResult::score`].
    pub total_score: u32,
}

/// Outcome of scoring one resume against one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Final score in `0..=100`.
    pub score: u32,
    /// Per-part scores.
    pub breakdown: ScoreBreakdown,
    /// Keywords found, hard skills first, then soft skills, then general.
    pub matched_keywords: Vec<CategorizedKeyword>,
    /// Keywords not found, in the same category order.
    pub missing_keywords: Vec<CategorizedKeyword>,
}

/// Score a resume against a job's keywords.
///
/// ```
/// use ats_match_core::keywords::extract_categorized_keywords;
/// use ats_match_core::resume::ResumeContent;
/// use ats_match_core::scoring::calculate_ats_score;
///
/// let resume = ResumeContent::from_json(
///     r#"{"skills": {"hard": [{"name": "React"}], "soft": ["Leadership"]}}"#,
/// ).unwrap();
/// let keywords =
///     extract_categorized_keywords("Required: React, TypeScript. Nice to have: Leadership.");
///
/// let result = calculate_ats_score(&resume, &keywords);
/// assert_eq!(result.breakdown.hard_skill_score, 50);
/// assert_eq!(result.breakdown.soft_skill_score, 100);
/// ```
pub fn calculate_ats_score(
    resume: &ResumeContent,
    job_keywords: &[CategorizedKeyword],
) -> ScoreResult {
    score_corpus(&ResumeCorpus::from_resume(resume), job_keywords)
}

/// Score an already projected resume.
#[tracing::instrument(skip_all, fields(keywords = job_keywords.len()))]
pub fn score_corpus(corpus: &ResumeCorpus, job_keywords: &[CategorizedKeyword]) -> ScoreResult {
    let mut matched_keywords = Vec::new();
    let mut missing_keywords = Vec::new();
    let mut category_scores = [100.0_f64; 3];

    for (slot, category) in KeywordCategory::ALL.into_iter().enumerate() {
        let subset: Vec<CategorizedKeyword> = job_keywords
            .iter()
            .filter(|k| k.category == category)
            .cloned()
            .collect();
        let MatchPartition { matched, missing } =
            find_matches(&subset, &corpus.keywords, &corpus.text);
        category_scores[slot] = coverage(&matched, &subset);
        matched_keywords.extend(matched);
        missing_keywords.extend(missing);
    }

    let [hard, soft, _] = category_scores;
    let hard = clamp_score(hard);
    let soft = clamp_score(soft);
    let density_score = clamp_score(density(&matched_keywords, &corpus.text));
    let total = weighted_total(hard, soft, density_score);

    let breakdown = ScoreBreakdown {
        hard_skill_score: hard,
        soft_skill_score: soft,
        keyword_density_score: density_score,
        total_score: total,
    };
    tracing::debug!(
        score = total,
        matched = matched_keywords.len(),
        missing = missing_keywords.len(),
        "resume scored"
    );

    ScoreResult {
        score: total,
        breakdown,
        matched_keywords,
        missing_keywords,
    }
}

/// Weighted sum of already rounded parts, rounded and clamped.
///
/// Evaluated as `hard * 0.6 + soft * 0.3 + density * 0.1` in that order so a
/// consumer applying the published weights to the breakdown gets the same total.
#[allow(clippy::suboptimal_flops)]
fn weighted_total(hard: u32, soft: u32, density: u32) -> u32 {
    clamp_score(
        f64::from(hard) * HARD_SKILL_WEIGHT
            + f64::from(soft) * SOFT_SKILL_WEIGHT
            + f64::from(density) * KEYWORD_DENSITY_WEIGHT,
    )
}

/// Frequency-weighted share of `subset` that was matched, in percent.
fn coverage(matched: &[CategorizedKeyword], subset: &[CategorizedKeyword]) -> f64 {
    let total: u64 = subset.iter().map(|k| u64::from(k.frequency)).sum();
    if total == 0 {
        return 100.0;
    }
    let found: u64 = matched.iter().map(|k| u64::from(k.frequency)).sum();
    100.0 * found as f64 / total as f64
}

/// Recurrence of matched keywords in the resume text, in percent.
///
/// A keyword's occurrences are counted under its normalized form and, when it
/// differs, its lowercase spelling as written. Forms shorter than
/// [`MIN_IDENTITY_CHARS`] are not counted. Each pattern is compiled once per
/// call.
fn density(matched: &[CategorizedKeyword], text: &str) -> f64 {
    if matched.is_empty() {
        return 0.0;
    }
    let occurrences: usize = matched
        .iter()
        .flat_map(|k| {
            let normalized = normalize_keyword(&k.keyword);
            let written = k.keyword.trim().to_lowercase();
            let written = (written != normalized).then_some(written);
            std::iter::once(normalized).chain(written)
        })
        .filter(|form| form.chars().count() >= MIN_IDENTITY_CHARS)
        .filter_map(|form| match Regex::new(&regex::escape(&form)) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::warn!(keyword = %form, error = %err, "skipping density pattern");
                None
            }
        })
        .map(|pattern| pattern.find_iter(text).count())
        .sum();

    let target = matched.len() as f64 * DENSITY_TARGET;
    (100.0 * occurrences as f64 / target).min(100.0)
}

/// Round half away from zero and clamp to `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}
