//! Tiered keyword vocabulary.
//!
//! The extractor only recognizes terms it knows. Terms live in three ordered
//! tiers (hard skills, soft skills, general keywords) and are compiled into a
//! single case-insensitive multi-pattern scanner.
//!
//! A term's category is decided by its normalized identity: the first tier
//! that lists any spelling of an identity owns it. Extraction and
//! [`Vocabulary::categorize`] both read that one table, so the two always
//! agree.

use std::collections::HashMap;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

use crate::error::{VocabularyError, VocabularyResult};
use crate::keywords::{CategorizedKeyword, KeywordCategory};
use crate::normalize::{MIN_IDENTITY_CHARS, normalize_keyword};

/// Built-in hard skills: languages, frameworks, data stores, cloud and
/// delivery tooling, and technical domain vocabulary.
pub const HARD_SKILLS: &[&str] = &[
    // Languages
    "python",
    "javascript",
    "typescript",
    "java",
    "c++",
    "c#",
    "golang",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "elixir",
    "haskell",
    "sql",
    "nosql",
    "html",
    "css",
    "sass",
    "bash",
    "powershell",
    "graphql",
    // Frameworks and libraries
    "react",
    "react native",
    "angular",
    "vue",
    "vue.js",
    "svelte",
    "next.js",
    "nextjs",
    "node.js",
    "nodejs",
    "express.js",
    "nestjs",
    "django",
    "flask",
    "fastapi",
    "spring",
    "spring boot",
    "ruby on rails",
    ".net",
    "asp.net",
    "redux",
    "tailwind",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "spark",
    "hadoop",
    // Data stores
    "postgresql",
    "postgres",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "dynamodb",
    "cassandra",
    "sqlite",
    "snowflake",
    "bigquery",
    // Cloud and delivery
    "aws",
    "azure",
    "gcp",
    "google cloud",
    "docker",
    "kubernetes",
    "helm",
    "terraform",
    "ansible",
    "jenkins",
    "ci/cd",
    "github actions",
    "gitlab",
    "git",
    "linux",
    "kafka",
    "rabbitmq",
    "nginx",
    "prometheus",
    "grafana",
    "datadog",
    "serverless",
    "lambda",
    // Tools
    "jira",
    "figma",
    "tableau",
    "power bi",
    "webpack",
    "vite",
    "jest",
    "cypress",
    "selenium",
    "playwright",
    // Technical domain vocabulary
    "machine learning",
    "deep learning",
    "data science",
    "data engineering",
    "data analysis",
    "natural language processing",
    "nlp",
    "computer vision",
    "microservices",
    "rest api",
    "restful",
    "api design",
    "distributed systems",
    "system design",
    "data structures",
    "algorithms",
    "devops",
    "etl",
    "unit testing",
    "test automation",
    "tdd",
    "object-oriented programming",
    "oop",
];

/// Built-in soft skills: interpersonal and behavioral competencies.
pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "collaboration",
    "collaborative",
    "problem solving",
    "problem-solving",
    "critical thinking",
    "analytical thinking",
    "time management",
    "adaptability",
    "flexibility",
    "creativity",
    "mentoring",
    "mentorship",
    "coaching",
    "self-motivated",
    "attention to detail",
    "interpersonal",
    "negotiation",
    "presentation",
    "public speaking",
    "emotional intelligence",
    "conflict resolution",
    "decision making",
    "decision-making",
    "ownership",
    "accountability",
    "empathy",
    "initiative",
    "cross-functional",
    "organizational",
    "multitasking",
    "work ethic",
    "stakeholder management",
];

/// Built-in general keywords: domain and context vocabulary.
pub const GENERAL_KEYWORDS: &[&str] = &[
    "agile",
    "scrum",
    "kanban",
    "saas",
    "b2b",
    "b2c",
    "fintech",
    "healthcare",
    "e-commerce",
    "startup",
    "enterprise",
    "architecture",
    "scalability",
    "performance",
    "reliability",
    "security",
    "compliance",
    "analytics",
    "metrics",
    "kpi",
    "roadmap",
    "product",
    "customer",
    "strategy",
    "budget",
    "operations",
    "automation",
    "testing",
    "debugging",
    "documentation",
    "deployment",
    "infrastructure",
    "integration",
    "optimization",
    "migration",
    "monitoring",
    "code review",
    "best practices",
    "stakeholders",
    "remote",
    "computer science",
    "bachelor",
    "degree",
];

static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::from_lists(HARD_SKILLS, SOFT_SKILLS, GENERAL_KEYWORDS)
        .expect("built-in vocabulary is valid")
});

/// Term lists for one vocabulary, as read from configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct VocabularyTerms {
    /// Additional hard-skill terms.
    pub hard_skills: Vec<String>,
    /// Additional soft-skill terms.
    pub soft_skills: Vec<String>,
    /// Additional general keywords.
    pub general: Vec<String>,
}

impl VocabularyTerms {
    /// Whether all three lists are empty.
    pub fn is_empty(&self) -> bool {
        self.hard_skills.is_empty() && self.soft_skills.is_empty() && self.general.is_empty()
    }

    /// Append another set of terms to this one, tier by tier.
    pub fn merge(&mut self, other: Self) {
        self.hard_skills.extend(other.hard_skills);
        self.soft_skills.extend(other.soft_skills);
        self.general.extend(other.general);
    }
}

#[derive(Debug, Clone)]
struct Term {
    text: String,
    normalized: String,
    category: KeywordCategory,
}

/// A compiled term occurrence summary from one scan.
#[derive(Debug, Clone, Copy)]
struct TermHit {
    term: usize,
    first_pos: usize,
    count: u32,
}

/// A three-tier vocabulary with a compiled scanner.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<Term>,
    scanner: AhoCorasick,
    categories: HashMap<String, KeywordCategory>,
}

impl Vocabulary {
    /// The built-in vocabulary, compiled once per process.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a vocabulary from three term lists.
    ///
    /// Blank terms and terms whose normalized form is shorter than
    /// [`MIN_IDENTITY_CHARS`] are ignored. When
    /// two spellings normalize to the same identity, the first tier to list
    /// that identity decides its category.
    #[tracing::instrument(skip_all, fields(hard = hard.len(), soft = soft.len(), general = general.len()))]
    pub fn from_lists<S: AsRef<str>>(
        hard: &[S],
        soft: &[S],
        general: &[S],
    ) -> VocabularyResult<Self> {
        let tiers = [
            (KeywordCategory::HardSkill, hard),
            (KeywordCategory::SoftSkill, soft),
            (KeywordCategory::General, general),
        ];

        let mut terms = Vec::new();
        let mut categories: HashMap<String, KeywordCategory> = HashMap::new();

        for (tier, list) in tiers {
            for raw in list {
                let text = raw.as_ref().trim().to_lowercase();
                let normalized = normalize_keyword(&text);
                if normalized.chars().count() < MIN_IDENTITY_CHARS {
                    if !text.is_empty() {
                        tracing::warn!(term = %text, "ignoring term too short to match reliably");
                    }
                    continue;
                }
                if terms.iter().any(|t: &Term| t.text == text) {
                    continue;
                }
                let category = *categories.entry(normalized.clone()).or_insert(tier);
                terms.push(Term {
                    text,
                    normalized,
                    category,
                });
            }
        }

        if terms.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let scanner = AhoCorasick::new(terms.iter().map(|t| t.text.as_str()))?;
        tracing::debug!(terms = terms.len(), identities = categories.len(), "vocabulary compiled");

        Ok(Self {
            terms,
            scanner,
            categories,
        })
    }

    /// Build a vocabulary from configured terms.
    ///
    /// With `replace` unset the terms extend the built-in lists; with it set
    /// they are the whole vocabulary.
    pub fn from_terms(terms: &VocabularyTerms, replace: bool) -> VocabularyResult<Self> {
        if replace {
            return Self::from_lists(
                terms.hard_skills.as_slice(),
                terms.soft_skills.as_slice(),
                terms.general.as_slice(),
            );
        }
        let extend = |builtin: &[&str], extra: &[String]| -> Vec<String> {
            builtin
                .iter()
                .map(|s| (*s).to_string())
                .chain(extra.iter().cloned())
                .collect()
        };
        Self::from_lists(
            extend(HARD_SKILLS, &terms.hard_skills).as_slice(),
            extend(SOFT_SKILLS, &terms.soft_skills).as_slice(),
            extend(GENERAL_KEYWORDS, &terms.general).as_slice(),
        )
    }

    /// Number of distinct spellings in the vocabulary.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary has no terms. Always `false` for a built vocabulary.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Spellings in one tier, in vocabulary order.
    pub fn terms(&self, category: KeywordCategory) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .filter(move |t| t.category == category)
            .map(|t| t.text.as_str())
    }

    /// Category of a term. Unknown terms are [`KeywordCategory::General`].
    pub fn categorize(&self, term: &str) -> KeywordCategory {
        self.categories
            .get(&normalize_keyword(term))
            .copied()
            .unwrap_or(KeywordCategory::General)
    }

    /// Extract categorized keywords from free text.
    ///
    /// Output is ordered hard skills, then soft skills, then general keywords.
    /// Within a tier keywords appear in order of first occurrence; no
    /// normalized identity appears twice. An identity's frequency counts
    /// every spelling of it found in the text.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn extract(&self, text: &str) -> Vec<CategorizedKeyword> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut hits = self.scan(text);
        hits.sort_by_key(|h| {
            (
                self.terms[h.term].category.priority(),
                h.first_pos,
                h.term,
            )
        });

        let mut totals: HashMap<&str, u32> = HashMap::new();
        for hit in &hits {
            *totals.entry(self.terms[hit.term].normalized.as_str()).or_default() += hit.count;
        }

        let mut seen = std::collections::HashSet::new();
        let keywords: Vec<CategorizedKeyword> = hits
            .into_iter()
            .filter_map(|hit| {
                let term = &self.terms[hit.term];
                let identity = term.normalized.as_str();
                seen.insert(identity).then(|| CategorizedKeyword {
                    keyword: term.text.clone(),
                    category: term.category,
                    frequency: totals.get(identity).copied().unwrap_or(hit.count),
                })
            })
            .collect();

        tracing::debug!(keywords = keywords.len(), "keywords extracted");
        keywords
    }

    /// Count word-bounded occurrences of every term in `text`.
    fn scan(&self, text: &str) -> Vec<TermHit> {
        let lower = text.to_lowercase();
        let mut hits: Vec<Option<TermHit>> = vec![None; self.terms.len()];

        for m in self.scanner.find_overlapping_iter(&lower) {
            if !is_bounded(&lower, m.start(), m.end()) {
                continue;
            }
            let idx = m.pattern().as_usize();
            let hit = hits[idx].get_or_insert(TermHit {
                term: idx,
                first_pos: m.start(),
                count: 0,
            });
            hit.count += 1;
        }

        hits.into_iter().flatten().collect()
    }
}

/// Whether the match at `start..end` stands alone: neither neighbour is alphanumeric.
fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
