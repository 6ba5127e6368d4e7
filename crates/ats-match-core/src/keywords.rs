//! Keyword extraction from job descriptions.
//!
//! Produces a deduplicated list of [`CategorizedKeyword`]s: hard skills first,
//! then soft skills, then general keywords. Only terms known to the
//! [`Vocabulary`] are recognized.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::vocabulary::Vocabulary;

/// Which tier a keyword belongs to.
///
/// Declaration order is priority order: hard skills matter most.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum KeywordCategory {
    /// Technical or tooling competency (a language, framework, platform).
    HardSkill,
    /// Interpersonal or behavioral competency.
    SoftSkill,
    /// Domain or context vocabulary.
    General,
}

impl KeywordCategory {
    /// All categories in priority order.
    pub const ALL: [Self; 3] = [Self::HardSkill, Self::SoftSkill, Self::General];

    /// Gap priority: 1 for hard skills, 2 for soft skills, 3 for general.
    pub const fn priority(self) -> u8 {
        match self {
            Self::HardSkill => 1,
            Self::SoftSkill => 2,
            Self::General => 3,
        }
    }

    /// Returns the category as its serialized name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HardSkill => "hard_skill",
            Self::SoftSkill => "soft_skill",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword found in a job description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct CategorizedKeyword {
    /// The keyword as spelled in the vocabulary.
    pub keyword: String,
    /// Tier the keyword belongs to.
    pub category: KeywordCategory,
    /// Case-insensitive occurrence count in the source text (at least 1).
    pub frequency: u32,
}

impl CategorizedKeyword {
    /// Create a keyword with an explicit category and frequency.
    pub fn new(keyword: impl Into<String>, category: KeywordCategory, frequency: u32) -> Self {
        Self {
            keyword: keyword.into(),
            category,
            frequency,
        }
    }
}

/// Extract categorized keywords using the built-in vocabulary.
///
/// Empty or whitespace-only input yields an empty list.
///
/// ```
/// use ats_match_core::keywords::{extract_categorized_keywords, KeywordCategory};
///
/// let keywords =
///     extract_categorized_keywords("Required: React, TypeScript. Nice to have: Leadership.");
/// let names: Vec<_> = keywords.iter().map(|k| k.keyword.as_str()).collect();
/// assert_eq!(names, ["react", "typescript", "leadership"]);
/// assert_eq!(keywords[2].category, KeywordCategory::SoftSkill);
/// ```
pub fn extract_categorized_keywords(text: &str) -> Vec<CategorizedKeyword> {
    Vocabulary::builtin().extract(text)
}

/// Category of a single term under the built-in vocabulary.
///
/// Agrees with the category [`extract_categorized_keywords`] assigns to the
/// same term. Terms outside the vocabulary are [`KeywordCategory::General`].
pub fn categorize_keyword(term: &str) -> KeywordCategory {
    Vocabulary::builtin().categorize(term)
}

/// Last-value cache of extracted keywords, keyed by the exact job-description text.
///
/// Meant to live inside one analysis session so that re-scoring an edited
/// resume against the same job description skips re-extraction. It is not
/// shared across sessions.
#[derive(Debug, Default)]
pub struct KeywordCache {
    last: Option<(String, Vec<CategorizedKeyword>)>,
    hits: u64,
    misses: u64,
}

impl KeywordCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached keywords for `text`, extracting with `vocabulary` on a miss.
    pub fn get_or_extract(&mut self, text: &str, vocabulary: &Vocabulary) -> &[CategorizedKeyword] {
        let cached = matches!(&self.last, Some((key, _)) if key == text);
        if cached {
            self.hits += 1;
        } else {
            self.misses += 1;
            let keywords = vocabulary.extract(text);
            self.last = Some((text.to_string(), keywords));
        }
        tracing::trace!(hit = cached, "keyword cache lookup");
        self.last
            .as_ref()
            .map_or(&[], |(_, keywords)| keywords.as_slice())
    }

    /// Number of lookups served from the cache.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that required extraction.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop the cached value.
    pub fn clear(&mut self) {
        self.last = None;
    }
}
