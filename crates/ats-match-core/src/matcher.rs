//! Keyword-to-resume matching.
//!
//! A job keyword is present in a resume when its normalized form, or one of
//! its formatting [`variations`], is either a resume skill name or a
//! substring of the resume text. A keyword also matches text containing its
//! lowercase spelling as written, so `c++` is found in "C++ services". Forms
//! shorter than [`MIN_IDENTITY_CHARS`] only match skill names. No semantic
//! matching is attempted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::keywords::CategorizedKeyword;
use crate::normalize::{MIN_IDENTITY_CHARS, normalize_keyword, variations};

/// Job keywords split into those found in the resume and those not found.
///
/// Both lists preserve input order. Every input keyword lands in exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPartition {
    /// Keywords present in the resume.
    pub matched: Vec<CategorizedKeyword>,
    /// Keywords absent from the resume.
    pub missing: Vec<CategorizedKeyword>,
}

/// Partition `job_keywords` by presence in a resume.
///
/// `resume_keywords` holds normalized skill names; `resume_text` is the
/// lowercase resume corpus.
#[tracing::instrument(skip_all, fields(keywords = job_keywords.len()))]
pub fn find_matches(
    job_keywords: &[CategorizedKeyword],
    resume_keywords: &HashSet<String>,
    resume_text: &str,
) -> MatchPartition {
    let (matched, missing): (Vec<_>, Vec<_>) = job_keywords
        .iter()
        .cloned()
        .partition(|k| is_present(&k.keyword, resume_keywords, resume_text));

    tracing::debug!(
        matched = matched.len(),
        missing = missing.len(),
        "keywords partitioned"
    );
    MatchPartition { matched, missing }
}

/// Whether a single keyword is present under the matching rules.
///
/// A keyword that normalizes to nothing is never present.
///
/// ```
/// use std::collections::HashSet;
/// use ats_match_core::matcher::is_present;
///
/// let skills: HashSet<String> = ["nextjs".to_string()].into();
/// assert!(is_present("Next.js", &skills, ""));
/// assert!(is_present("spring boot", &HashSet::new(), "built on spring-boot services"));
/// assert!(!is_present("kotlin", &skills, "java and scala"));
/// assert!(is_present("C++", &HashSet::new(), "modern c++ services"));
/// ```
pub fn is_present(keyword: &str, resume_keywords: &HashSet<String>, resume_text: &str) -> bool {
    let normalized = normalize_keyword(keyword);
    if normalized.is_empty() {
        return false;
    }
    let in_text =
        |form: &str| form.chars().count() >= MIN_IDENTITY_CHARS && resume_text.contains(form);
    let found = |form: &str| resume_keywords.contains(form) || in_text(form);
    found(&normalized)
        || variations(&normalized).iter().any(|v| found(v))
        || in_text(&keyword.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordCategory;

    fn kw(keyword: &str, category: KeywordCategory) -> CategorizedKeyword {
        CategorizedKeyword::new(keyword, category, 1)
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn direct_set_membership() {
        assert!(is_present("React", &set(&["react"]), ""));
    }

    #[test]
    fn substring_of_text() {
        assert!(is_present("kubernetes", &HashSet::new(), "ran kubernetes clusters"));
    }

    #[test]
    fn punctuation_variants_match_through_set() {
        let skills = set(&["nextjs"]);
        assert!(is_present("next.js", &skills, ""));
        assert!(is_present("Next-JS", &skills, ""));
    }

    #[test]
    fn space_variants_match() {
        assert!(is_present("machine learning", &set(&["machinelearning"]), ""));
        assert!(is_present("spring boot", &HashSet::new(), "spring-boot apps"));
    }

    #[test]
    fn absent_keyword_is_missing() {
        assert!(!is_present("terraform", &set(&["pulumi"]), "cloudformation templates"));
    }

    #[test]
    fn empty_normalized_form_never_matches() {
        assert!(!is_present("++", &set(&[""]), "anything at all"));
    }

    #[test]
    fn symbol_languages_match_as_written_or_as_skills() {
        assert!(is_present("c++", &HashSet::new(), "ten years of c++ and python"));
        assert!(is_present("c#", &HashSet::new(), "shipped c# services"));
        assert!(is_present("C#", &set(&["csharp"]), ""));
        assert!(!is_present("c#", &set(&["cpp"]), "c++ only"));
    }

    #[test]
    fn symbol_languages_do_not_match_unrelated_text() {
        let text = "accounting clerk with excellent records";
        assert!(!is_present("c++", &HashSet::new(), text));
        assert!(!is_present("c#", &HashSet::new(), text));
    }

    #[test]
    fn single_character_forms_only_match_skill_names() {
        assert!(!is_present("C", &HashSet::new(), "accounting clerk"));
        assert!(is_present("C", &set(&["c"]), ""));
    }

    #[test]
    fn partition_is_exhaustive_disjoint_and_ordered() {
        let jobs = vec![
            kw("react", KeywordCategory::HardSkill),
            kw("typescript", KeywordCategory::HardSkill),
            kw("leadership", KeywordCategory::SoftSkill),
            kw("agile", KeywordCategory::General),
        ];
        let result = find_matches(&jobs, &set(&["react", "leadership"]), "");
        assert_eq!(result.matched.len() + result.missing.len(), jobs.len());
        assert_eq!(result.matched, vec![jobs[0].clone(), jobs[2].clone()]);
        assert_eq!(result.missing, vec![jobs[1].clone(), jobs[3].clone()]);
    }

    #[test]
    fn empty_input_yields_empty_partition() {
        let result = find_matches(&[], &set(&["react"]), "react");
        assert_eq!(result, MatchPartition::default());
    }
}
