//! Resume text projection.
//!
//! Flattens a [`ResumeContent`] into the two views the matcher searches: one
//! lowercase text blob over every searchable field, and a set of normalized
//! skill names for exact lookups.

use std::collections::HashSet;

use crate::normalize::normalize_keyword;
use crate::resume::ResumeContent;

/// The searchable projection of one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeCorpus {
    /// Lowercased concatenation of headline, summary, work, education, skill
    /// and language text, one field per line.
    pub text: String,
    /// Normalized names from the hard, soft and tools skill lists.
    pub keywords: HashSet<String>,
}

impl ResumeCorpus {
    /// Project a resume. Absent fields contribute nothing.
    #[tracing::instrument(skip_all)]
    pub fn from_resume(resume: &ResumeContent) -> Self {
        let mut fields: Vec<&str> = vec![resume.basics.label.as_str(), resume.summary.as_str()];
        for job in &resume.work {
            fields.extend([
                job.company.as_str(),
                job.position.as_str(),
                job.summary.as_str(),
            ]);
        }
        for school in &resume.education {
            fields.extend([
                school.institution.as_str(),
                school.area.as_str(),
                school.study_type.as_str(),
            ]);
        }
        fields.extend(resume.skill_names());
        fields.extend(resume.languages.iter().map(|l| l.language.as_str()));

        let text = fields
            .into_iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        let keywords: HashSet<String> = resume
            .skill_names()
            .map(normalize_keyword)
            .filter(|k| !k.is_empty())
            .collect();

        tracing::debug!(
            text_len = text.len(),
            skills = keywords.len(),
            "resume projected"
        );
        Self { text, keywords }
    }

    /// Whether `needle` occurs in the text or is a skill name.
    pub fn contains(&self, needle: &str) -> bool {
        self.keywords.contains(needle) || self.text.contains(needle)
    }
}
