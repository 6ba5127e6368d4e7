//! End-to-end analysis: extraction, scoring, gaps and feedback in one call.
//!
//! [`AnalysisSession`] is meant to live as long as one editing view: it owns a
//! [`KeywordCache`] so that re-analyzing an edited resume against the same job
//! description does not re-extract keywords. Sessions share nothing with each
//! other.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::corpus::ResumeCorpus;
use crate::gaps::{GapAnalysis, analyze_corpus_gaps};
use crate::keywords::{CategorizedKeyword, KeywordCache};
use crate::resume::ResumeContent;
use crate::scoring::{ScoreResult, score_corpus};
use crate::vocabulary::Vocabulary;

/// Score at or above which a match is reported as strong.
pub const STRONG_MATCH: u32 = 80;

/// Score at or above which a match is reported as moderate.
pub const MODERATE_MATCH: u32 = 60;

/// Missing keywords named in feedback text.
const FEEDBACK_KEYWORDS: usize = 3;

/// Everything known about one resume against one job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AtsReport {
    /// Keywords extracted from the job description.
    pub keywords: Vec<CategorizedKeyword>,
    /// Score and breakdown.
    pub score: ScoreResult,
    /// Missing keywords and suggestions.
    pub gaps: GapAnalysis,
    /// One-paragraph summary for the user.
    pub feedback: String,
}

impl AtsReport {
    /// The payload a persistence layer stores for this scan.
    pub fn snapshot(&self) -> ScanSnapshot {
        ScanSnapshot {
            match_score: self.score.score,
            matched_keywords: self.score.matched_keywords.clone(),
            missing_keywords: self.score.missing_keywords.clone(),
            feedback: self.feedback.clone(),
        }
    }
}

/// The scan record attached to a resume version and job.
///
/// This crate builds the record; storing it is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanSnapshot {
    /// Final score in `0..=100`.
    pub match_score: u32,
    /// Keywords found in the resume.
    pub matched_keywords: Vec<CategorizedKeyword>,
    /// Keywords not found in the resume.
    pub missing_keywords: Vec<CategorizedKeyword>,
    /// Feedback text shown with the score.
    pub feedback: String,
}

/// Per-view analysis state.
#[derive(Debug)]
pub struct AnalysisSession<'v> {
    vocabulary: &'v Vocabulary,
    cache: KeywordCache,
}

impl Default for AnalysisSession<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::builtin())
    }
}

impl<'v> AnalysisSession<'v> {
    /// Start a session that extracts with `vocabulary`.
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self {
            vocabulary,
            cache: KeywordCache::new(),
        }
    }

    /// Keywords for a job description, served from the cache when unchanged.
    pub fn keywords(&mut self, job_description: &str) -> Vec<CategorizedKeyword> {
        self.cache
            .get_or_extract(job_description, self.vocabulary)
            .to_vec()
    }

    /// Analyze a resume against a job description.
    #[tracing::instrument(skip_all, fields(jd_len = job_description.len()))]
    pub fn analyze(&mut self, resume: &ResumeContent, job_description: &str) -> AtsReport {
        let keywords = self.keywords(job_description);
        let corpus = ResumeCorpus::from_resume(resume);
        let score = score_corpus(&corpus, &keywords);
        let gaps = analyze_corpus_gaps(&corpus, &keywords);
        let feedback = build_feedback(&score, &gaps);
        tracing::debug!(score = score.score, keywords = keywords.len(), "analysis complete");

        AtsReport {
            keywords,
            score,
            gaps,
            feedback,
        }
    }

    /// Lookups answered from the keyword cache so far.
    pub const fn cache_hits(&self) -> u64 {
        self.cache.hits()
    }
}

/// Analyze once with the built-in vocabulary.
///
/// ```
/// use ats_match_core::report::analyze_resume;
/// use ats_match_core::resume::ResumeContent;
///
/// let resume = ResumeContent::from_json(r#"{"skills": {"hard": [{"name": "React"}]}}"#).unwrap();
/// let report = analyze_resume(&resume, "React and TypeScript required.");
/// assert_eq!(report.gaps.missing_keywords[0].keyword, "typescript");
/// ```
pub fn analyze_resume(resume: &ResumeContent, job_description: &str) -> AtsReport {
    AnalysisSession::default().analyze(resume, job_description)
}

/// Summarize a score and its gaps in one paragraph.
///
/// The opening sentence is banded by score; the rest names up to three of the
/// highest-priority missing keywords.
pub fn build_feedback(score: &ScoreResult, gaps: &GapAnalysis) -> String {
    let total = score.score;
    let mut text = if total >= STRONG_MATCH {
        format!("Strong match ({total}/100): your resume covers most of what this job asks for.")
    } else if total >= MODERATE_MATCH {
        format!("Moderate match ({total}/100): a few targeted additions would strengthen it.")
    } else {
        format!("Low match ({total}/100): the resume is missing several keywords this job emphasizes.")
    };

    let top: Vec<String> = gaps
        .missing_keywords
        .iter()
        .take(FEEDBACK_KEYWORDS)
        .map(|k| format!("\"{}\"", k.keyword))
        .collect();
    if top.is_empty() {
        text.push_str(" No job keywords are missing.");
    } else {
        text.push_str(" Focus first on ");
        text.push_str(&top.join(", "));
        text.push('.');
    }
    text
}
