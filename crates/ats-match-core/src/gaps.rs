//! Gap analysis: which job keywords a resume lacks, and what to do about them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::corpus::ResumeCorpus;
use crate::keywords::{CategorizedKeyword, KeywordCategory};
use crate::matcher::{MatchPartition, find_matches};
use crate::resume::ResumeContent;

/// Missing keywords grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GapsByCategory {
    /// Missing hard skills.
    pub hard_skills: Vec<CategorizedKeyword>,
    /// Missing soft skills.
    pub soft_skills: Vec<CategorizedKeyword>,
    /// Missing general keywords.
    pub general: Vec<CategorizedKeyword>,
}

impl GapsByCategory {
    /// Total number of grouped keywords.
    pub fn len(&self) -> usize {
        self.hard_skills.len() + self.soft_skills.len() + self.general.len()
    }

    /// Whether no keywords are missing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A recommendation for one missing keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// The missing keyword.
    pub keyword: String,
    /// Its category.
    pub category: KeywordCategory,
    /// 1 for hard skills, 2 for soft skills, 3 for general keywords.
    pub priority: u8,
    /// What to change in the resume.
    pub suggestion: String,
}

impl Suggestion {
    /// Build the recommendation for a missing keyword.
    pub fn for_keyword(keyword: &CategorizedKeyword) -> Self {
        let k = &keyword.keyword;
        let suggestion = match keyword.category {
            KeywordCategory::HardSkill => format!(
                "Add \"{k}\" to your Skills section and mention where you used it in your work history."
            ),
            KeywordCategory::SoftSkill => format!(
                "Show \"{k}\" in your work history with a concrete example or outcome."
            ),
            KeywordCategory::General => {
                format!("Work \"{k}\" into your summary or experience descriptions.")
            }
        };
        Self {
            keyword: keyword.keyword.clone(),
            category: keyword.category,
            priority: keyword.category.priority(),
            suggestion,
        }
    }
}

/// Result of [`analyze_gaps`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
    /// Keywords present in the resume, in input order.
    pub matched_keywords: Vec<CategorizedKeyword>,
    /// Keywords absent from the resume, by ascending priority.
    pub missing_keywords: Vec<CategorizedKeyword>,
    /// The missing keywords grouped by category.
    pub gaps_by_category: GapsByCategory,
    /// One suggestion per missing keyword, in the same order.
    pub suggestions: Vec<Suggestion>,
}

/// Stable sort by category priority: hard skills, soft skills, general.
///
/// Keywords of equal priority keep their relative order. Sorting is a
/// permutation and is idempotent.
pub fn sort_by_priority(keywords: &mut [CategorizedKeyword]) {
    keywords.sort_by_key(|k| k.category.priority());
}

/// Find missing keywords and suggest improvements.
pub fn analyze_gaps(resume: &ResumeContent, job_keywords: &[CategorizedKeyword]) -> GapAnalysis {
    analyze_corpus_gaps(&ResumeCorpus::from_resume(resume), job_keywords)
}

/// Gap analysis over an already projected resume.
#[tracing::instrument(skip_all, fields(keywords = job_keywords.len()))]
pub fn analyze_corpus_gaps(
    corpus: &ResumeCorpus,
    job_keywords: &[CategorizedKeyword],
) -> GapAnalysis {
    let MatchPartition {
        matched,
        mut missing,
    } = find_matches(job_keywords, &corpus.keywords, &corpus.text);
    sort_by_priority(&mut missing);

    let mut gaps_by_category = GapsByCategory::default();
    for keyword in &missing {
        let group = match keyword.category {
            KeywordCategory::HardSkill => &mut gaps_by_category.hard_skills,
            KeywordCategory::SoftSkill => &mut gaps_by_category.soft_skills,
            KeywordCategory::General => &mut gaps_by_category.general,
        };
        group.push(keyword.clone());
    }

    let suggestions: Vec<Suggestion> = missing.iter().map(Suggestion::for_keyword).collect();
    tracing::debug!(
        matched = matched.len(),
        missing = missing.len(),
        "gaps analyzed"
    );

    GapAnalysis {
        matched_keywords: matched,
        missing_keywords: missing,
        gaps_by_category,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{HardSkill, Skills};

    fn kw(keyword: &str, category: KeywordCategory) -> CategorizedKeyword {
        CategorizedKeyword::new(keyword, category, 1)
    }

    fn mixed() -> Vec<CategorizedKeyword> {
        vec![
            kw("agile", KeywordCategory::General),
            kw("empathy", KeywordCategory::SoftSkill),
            kw("rust", KeywordCategory::HardSkill),
            kw("scrum", KeywordCategory::General),
            kw("teamwork", KeywordCategory::SoftSkill),
            kw("kafka", KeywordCategory::HardSkill),
        ]
    }

    fn names(keywords: &[CategorizedKeyword]) -> Vec<&str> {
        keywords.iter().map(|k| k.keyword.as_str()).collect()
    }

    #[test]
    fn sort_is_stable_by_priority() {
        let mut keywords = mixed();
        sort_by_priority(&mut keywords);
        assert_eq!(
            names(&keywords),
            ["rust", "kafka", "empathy", "teamwork", "agile", "scrum"]
        );
    }

    #[test]
    fn sort_is_idempotent_permutation() {
        let mut once = mixed();
        sort_by_priority(&mut once);
        let mut twice = once.clone();
        sort_by_priority(&mut twice);
        assert_eq!(once, twice);

        let mut original = names(&mixed()).into_iter().map(String::from).collect::<Vec<_>>();
        let mut sorted = names(&once).into_iter().map(String::from).collect::<Vec<_>>();
        original.sort();
        sorted.sort();
        assert_eq!(original, sorted);
    }

    #[test]
    fn missing_keywords_sorted_and_grouped() {
        let resume = ResumeContent {
            skills: Skills {
                hard: vec![HardSkill::new("Kafka")],
                soft: vec!["Teamwork".to_string()],
                tools: Vec::new(),
            },
            ..Default::default()
        };
        let gaps = analyze_gaps(&resume, &mixed());

        assert_eq!(names(&gaps.matched_keywords), ["teamwork", "kafka"]);
        assert_eq!(names(&gaps.missing_keywords), ["rust", "empathy", "agile", "scrum"]);
        assert_eq!(names(&gaps.gaps_by_category.hard_skills), ["rust"]);
        assert_eq!(names(&gaps.gaps_by_category.soft_skills), ["empathy"]);
        assert_eq!(names(&gaps.gaps_by_category.general), ["agile", "scrum"]);
        assert_eq!(gaps.gaps_by_category.len(), gaps.missing_keywords.len());
    }

    #[test]
    fn missing_priorities_never_decrease() {
        let gaps = analyze_gaps(&ResumeContent::default(), &mixed());
        let priorities: Vec<u8> = gaps
            .missing_keywords
            .iter()
            .map(|k| k.category.priority())
            .collect();
        assert!(priorities.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn one_suggestion_per_missing_keyword() {
        let gaps = analyze_gaps(&ResumeContent::default(), &mixed());
        assert_eq!(gaps.suggestions.len(), gaps.missing_keywords.len());
        for (suggestion, keyword) in gaps.suggestions.iter().zip(&gaps.missing_keywords) {
            assert_eq!(suggestion.keyword, keyword.keyword);
            assert_eq!(suggestion.priority, keyword.category.priority());
            assert!(!suggestion.suggestion.is_empty());
        }
    }

    #[test]
    fn suggestions_fit_their_category() {
        let hard = Suggestion::for_keyword(&kw("docker", KeywordCategory::HardSkill));
        assert!(hard.suggestion.contains("Skills section"));
        let soft = Suggestion::for_keyword(&kw("mentoring", KeywordCategory::SoftSkill));
        assert!(soft.suggestion.contains("work history"));
        let general = Suggestion::for_keyword(&kw("fintech", KeywordCategory::General));
        assert!(general.suggestion.contains("summary"));
    }

    #[test]
    fn no_keywords_no_gaps() {
        let gaps = analyze_gaps(&ResumeContent::default(), &[]);
        assert_eq!(gaps, GapAnalysis::default());
        assert!(gaps.gaps_by_category.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let gaps = analyze_gaps(&ResumeContent::default(), &mixed()[..1]);
        let json = serde_json::to_value(&gaps).unwrap();
        assert_eq!(json["gapsByCategory"]["general"][0]["keyword"], "agile");
        assert_eq!(json["suggestions"][0]["priority"], 3);
    }
}
