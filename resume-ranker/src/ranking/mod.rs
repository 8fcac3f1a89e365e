pub mod weighted;

use serde::{Deserialize, Serialize};

use crate::core::{CandidateDocument, QueryDocument, ScoreRecord};
use crate::error::{RankerError, Result};
use crate::similarity::{SimilarityScorer, SparseVector};

pub use weighted::WeightedSumStrategy;

/// Trait for combining per-candidate signals into one ranking key
pub trait ScoringStrategy: Send + Sync {
    /// Score one candidate; `query_vector` is the query text already transformed by `scorer`
    fn score(
        &self,
        query: &QueryDocument,
        query_vector: &SparseVector,
        candidate: &CandidateDocument,
        scorer: &SimilarityScorer,
    ) -> Result<Scored>;

    /// Get strategy name for logging
    fn name(&self) -> &str;
}

/// Individual signals behind a final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub text_score: f64,
    pub skills_score: f64,
}

/// Strategy output for one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub components: ComponentScores,
    pub final_score: f64,
}

/// Weights of the text and skill signals; must sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub text: f64,
    pub skill: f64,
}

impl Weights {
    const SUM_TOLERANCE: f64 = 1e-9;

    pub fn new(text: f64, skill: f64) -> Result<Self> {
        let valid = text.is_finite()
            && skill.is_finite()
            && text >= 0.0
            && skill >= 0.0
            && ((text + skill) - 1.0).abs() <= Self::SUM_TOLERANCE;

        if !valid {
            return Err(RankerError::InvalidWeights { text, skill });
        }
        Ok(Self { text, skill })
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            text: 0.6,
            skill: 0.4,
        }
    }
}

impl std::fmt::Display for Weights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "text={}, skill={}", self.text, self.skill)
    }
}

/// Sort by final score, highest first. Stable: equal scores keep input order.
pub fn sort_records(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillSet;

    fn record(id: &str, final_score: f64) -> ScoreRecord {
        ScoreRecord {
            candidate_id: id.to_string(),
            text_score: 0.0,
            skills_score: 0.0,
            final_score,
            matched_skills: SkillSet::new(),
            missing_skills: SkillSet::new(),
        }
    }

    fn ids(records: &[ScoreRecord]) -> Vec<&str> {
        records.iter().map(|r| r.candidate_id.as_str()).collect()
    }

    #[test]
    fn test_sort_descending_with_stable_ties() {
        let mut records = vec![
            record("a", 0.2),
            record("b", 0.5),
            record("c", 0.2),
            record("d", 0.5),
            record("e", 0.9),
        ];
        sort_records(&mut records);
        assert_eq!(ids(&records), vec!["e", "b", "d", "a", "c"]);

        // Sorting again must not reorder ties
        sort_records(&mut records);
        assert_eq!(ids(&records), vec!["e", "b", "d", "a", "c"]);
    }

    #[test]
    fn test_weights_validation() {
        assert!(Weights::new(0.6, 0.4).is_ok());
        assert!(Weights::new(1.0, 0.0).is_ok());
        assert!(Weights::new(0.7, 0.7).is_err());
        assert!(Weights::new(1.5, -0.5).is_err());
        assert!(Weights::new(f64::NAN, 0.4).is_err());
        assert_eq!(Weights::default(), Weights::new(0.6, 0.4).unwrap());
    }
}
