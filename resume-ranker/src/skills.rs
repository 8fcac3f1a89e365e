//! Skill term extraction.
//!
//! A term is "found" when it occurs as a raw substring of the lower-cased text.
//! There is no word-boundary check, so a short term such as `go` also matches
//! inside `good`; each term is tested independently.

use memchr::memmem;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::{RankerError, Result};

/// Default software-engineering vocabulary
pub const BUILTIN_TERMS: &[&str] = &[
    // Languages
    "python", "java", "c++", "javascript", "typescript", "c#", "go", "rust",
    // Backend / APIs / frameworks
    "rest", "rest apis", "graphql", "django", "flask", "spring boot",
    "node.js", "express.js", "fastapi",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "redis",
    // Cloud / devops
    "aws", "azure", "gcp", "docker", "kubernetes", "linux",
    // Data / ML
    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch",
    "machine learning", "data analysis",
    // Process
    "system design", "unit testing", "integration testing",
    "continuous integration", "continuous deployment",
    "git", "agile", "scrum",
];

/// Ordered, duplicate-free list of lower-case skill terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    /// Validate and build a vocabulary
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        if terms.is_empty() {
            return Err(RankerError::EmptyVocabulary);
        }

        let mut seen = HashSet::with_capacity(terms.len());
        for term in &terms {
            if term.trim().is_empty() {
                return Err(RankerError::InvalidVocabularyTerm {
                    term: term.clone(),
                    reason: "term is blank".to_string(),
                });
            }
            if term.to_lowercase() != *term {
                return Err(RankerError::InvalidVocabularyTerm {
                    term: term.clone(),
                    reason: "term must be lower-case".to_string(),
                });
            }
            if !seen.insert(term.as_str()) {
                return Err(RankerError::DuplicateVocabularyTerm(term.clone()));
            }
        }

        Ok(Self { terms })
    }

    pub fn builtin() -> Self {
        Self {
            terms: BUILTIN_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let terms = Vec::<String>::deserialize(deserializer)?;
        Vocabulary::new(terms).map_err(|e| Error::custom(e.to_string()))
    }
}

/// Set of vocabulary terms detected in one text; iterates in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet {
    terms: BTreeSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet {
            terms: self.terms.intersection(&other.terms).cloned().collect(),
        }
    }

    /// Terms in `self` but not in `other`
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet {
            terms: self.terms.difference(&other.terms).cloned().collect(),
        }
    }

    /// Fraction of `required` terms present in `self`; 0.0 when nothing is required.
    pub fn overlap_ratio(&self, required: &SkillSet) -> f64 {
        if required.is_empty() {
            return 0.0;
        }
        required.intersection(self).len() as f64 / required.len() as f64
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.terms.iter().cloned().collect()
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        SkillSet {
            terms: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for SkillSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

/// Extract every vocabulary term occurring in `text`
pub fn extract(text: &str, vocabulary: &Vocabulary) -> SkillSet {
    if text.is_empty() {
        return SkillSet::new();
    }

    let haystack = text.to_lowercase();
    vocabulary
        .terms()
        .iter()
        .filter(|term| memmem::find(haystack.as_bytes(), term.as_bytes()).is_some())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> Vocabulary {
        Vocabulary::new(terms.iter().copied()).unwrap()
    }

    #[test]
    fn test_extract_case_insensitive() {
        let skills = extract("Need Python and SQL skills", &vocab(&["python", "sql"]));
        assert_eq!(skills, SkillSet::from_iter(["python", "sql"]));
    }

    #[test]
    fn test_extract_empty_text() {
        assert!(extract("", &Vocabulary::builtin()).is_empty());
    }

    #[test]
    fn test_extract_raw_substring_semantics() {
        let vocabulary = vocab(&["go", "rest", "rest apis", "java", "javascript"]);
        let skills = extract("A good JavaScript dev who knows REST APIs", &vocabulary);

        // "go" inside "good", "java" inside "javascript": both kept
        assert_eq!(
            skills,
            SkillSet::from_iter(["go", "java", "javascript", "rest", "rest apis"])
        );
    }

    #[test]
    fn test_extract_symbol_terms() {
        let skills = extract("C++ and C# on Node.js", &Vocabulary::builtin());
        assert!(skills.contains("c++"));
        assert!(skills.contains("c#"));
        assert!(skills.contains("node.js"));
    }

    #[test]
    fn test_vocabulary_validation() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(Vocabulary::new(empty), Err(RankerError::EmptyVocabulary)));
        assert!(matches!(
            Vocabulary::new(["Python"]),
            Err(RankerError::InvalidVocabularyTerm { .. })
        ));
        assert!(matches!(
            Vocabulary::new(["  "]),
            Err(RankerError::InvalidVocabularyTerm { .. })
        ));
        assert!(matches!(
            Vocabulary::new(["sql", "sql"]),
            Err(RankerError::DuplicateVocabularyTerm(_))
        ));
    }

    #[test]
    fn test_builtin_vocabulary_is_valid() {
        let builtin = Vocabulary::builtin();
        assert_eq!(Vocabulary::new(builtin.terms().to_vec()).unwrap(), builtin);
    }

    #[test]
    fn test_set_operations() {
        let query = SkillSet::from_iter(["python", "sql", "docker"]);
        let candidate = SkillSet::from_iter(["python", "rust"]);

        assert_eq!(query.intersection(&candidate), SkillSet::from_iter(["python"]));
        assert_eq!(query.difference(&candidate), SkillSet::from_iter(["docker", "sql"]));
        assert!((candidate.overlap_ratio(&query) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(candidate.overlap_ratio(&SkillSet::new()), 0.0);
    }

    #[test]
    fn test_vocabulary_deserialize_validates() {
        let ok: Vocabulary = serde_json::from_str(r#"["python","sql"]"#).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(serde_json::from_str::<Vocabulary>(r#"["Python"]"#).is_err());
    }
}
