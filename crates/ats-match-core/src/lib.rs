//! Core library for ats-match.
//!
//! Keyword extraction from job descriptions and ATS compatibility scoring for
//! structured resumes. Every scoring operation is a pure, synchronous
//! function; only configuration loading and document parsing can fail.
//!
//! # Modules
//!
//! - [`keywords`] - Categorized keyword extraction and the per-session cache
//! - [`vocabulary`] - Hard skill, soft skill and general term lists
//! - [`normalize`] - Keyword identity normalization
//! - [`resume`] - The structured resume model
//! - [`corpus`] - Resume text projection
//! - [`matcher`] - Keyword presence matching
//! - [`scoring`] - Weighted ATS score
//! - [`gaps`] - Missing keywords and suggestions
//! - [`report`] - One-call analysis, feedback and scan snapshots
//! - [`markdown`] - Plain text from Markdown job descriptions
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use ats_match_core::{ResumeContent, analyze_gaps, calculate_ats_score, extract_categorized_keywords};
//!
//! let resume = ResumeContent::from_json(
//!     r#"{"skills": {"hard": [{"name": "React"}], "soft": ["Leadership"]}}"#,
//! ).unwrap();
//! let keywords =
//!     extract_categorized_keywords("Required: React, TypeScript. Nice to have: Leadership.");
//!
//! let score = calculate_ats_score(&resume, &keywords);
//! let gaps = analyze_gaps(&resume, &keywords);
//! assert_eq!(score.breakdown.hard_skill_score, 50);
//! assert_eq!(gaps.suggestions[0].keyword, "typescript");
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod gaps;
pub mod keywords;
pub mod markdown;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod resume;
pub mod scoring;
pub mod vocabulary;

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, InputError, InputResult, VocabularyError};
pub use gaps::{GapAnalysis, analyze_gaps, sort_by_priority};
pub use keywords::{
    CategorizedKeyword, KeywordCache, KeywordCategory, categorize_keyword,
    extract_categorized_keywords,
};
pub use report::{AnalysisSession, AtsReport, ScanSnapshot, analyze_resume, build_feedback};
pub use resume::ResumeContent;
pub use scoring::{ScoreBreakdown, ScoreResult, calculate_ats_score};
pub use vocabulary::Vocabulary;
