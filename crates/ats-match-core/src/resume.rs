//! Structured resume content.
//!
//! [`ResumeContent`] mirrors the camelCase JSON document the resume editor
//! produces. Every field is optional on input: absent strings are empty and
//! absent arrays are empty, so partially filled resumes deserialize cleanly.
//! The scoring engine only ever reads these values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::InputResult;

/// A complete resume document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeContent {
    /// Contact details and headline.
    pub basics: Basics,
    /// Free-text professional summary.
    pub summary: String,
    /// Employment history, most recent first by convention.
    pub work: Vec<WorkEntry>,
    /// Education history.
    pub education: Vec<EducationEntry>,
    /// Skill lists.
    pub skills: Skills,
    /// Spoken languages.
    pub languages: Vec<LanguageEntry>,
    /// Editor metadata.
    pub meta: Meta,
}

impl ResumeContent {
    /// Parse a resume from its JSON representation.
    ///
    /// ```
    /// use ats_match_core::resume::ResumeContent;
    ///
    /// let resume = ResumeContent::from_json(r#"{"skills": {"soft": ["Leadership"]}}"#).unwrap();
    /// assert_eq!(resume.skills.soft, ["Leadership"]);
    /// assert!(resume.work.is_empty());
    /// ```
    pub fn from_json(json: &str) -> InputResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every skill name on the resume: hard skills, then soft skills, then tools.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills
            .hard
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.skills.soft.iter().map(String::as_str))
            .chain(self.skills.tools.iter().map(String::as_str))
    }
}

/// Contact details and headline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Headline, e.g. "Senior Backend Engineer".
    pub label: String,
    /// Where the candidate is based.
    pub location: Location,
    /// Online profiles.
    pub profiles: Vec<Profile>,
}

/// A postal location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    /// Street address.
    pub address: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// City.
    pub city: String,
    /// State, province or region.
    pub region: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}

/// An online profile such as GitHub or LinkedIn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    /// Network name.
    pub network: String,
    /// Handle on that network.
    pub username: String,
    /// Profile URL.
    pub url: String,
}

/// One position in the employment history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkEntry {
    /// Employer.
    pub company: String,
    /// Job title.
    pub position: String,
    /// Start date as written by the user.
    pub start_date: Option<String>,
    /// End date, absent for current roles.
    pub end_date: Option<String>,
    /// Whether this is the current role.
    pub is_current: bool,
    /// Description of the role.
    pub summary: String,
}

/// One entry in the education history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    /// School or university.
    pub institution: String,
    /// Field of study.
    pub area: String,
    /// Degree type, e.g. "Bachelor".
    pub study_type: String,
    /// Start date as written by the user.
    pub start_date: Option<String>,
    /// End date as written by the user.
    pub end_date: Option<String>,
}

/// Skill lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Skills {
    /// Technical skills, optionally with a proficiency level.
    pub hard: Vec<HardSkill>,
    /// Interpersonal skills.
    pub soft: Vec<String>,
    /// Tools and platforms.
    pub tools: Vec<String>,
}

/// A technical skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HardSkill {
    /// Skill name.
    pub name: String,
    /// Proficiency level, free text.
    pub level: Option<String>,
}

impl HardSkill {
    /// A hard skill with no level.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
        }
    }
}

/// A spoken language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageEntry {
    /// Language name.
    pub language: String,
    /// Fluency, free text.
    pub fluency: String,
}

/// Editor metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    /// Rendering template name.
    pub template: String,
    /// Form completion percentage reported by the editor.
    pub completion_score: Option<f64>,
}
