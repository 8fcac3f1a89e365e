use crate::core::{CandidateDocument, QueryDocument};
use crate::error::Result;
use crate::ranking::{ComponentScores, Scored, ScoringStrategy, Weights};
use crate::similarity::{SimilarityScorer, SparseVector};

/// Weighted sum of text similarity and skill overlap
#[derive(Debug, Clone, Default)]
pub struct WeightedSumStrategy {
    weights: Weights,
}

impl WeightedSumStrategy {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }
}

impl ScoringStrategy for WeightedSumStrategy {
    fn score(
        &self,
        query: &QueryDocument,
        query_vector: &SparseVector,
        candidate: &CandidateDocument,
        scorer: &SimilarityScorer,
    ) -> Result<Scored> {
        let text_score = scorer.similarity_to(query_vector, candidate.text());

        // A job description without recognized skills scores 0.0 here
        let skills_score = candidate.skills().overlap_ratio(query.skills());

        let final_score = self.weights.text * text_score + self.weights.skill * skills_score;

        Ok(Scored {
            components: ComponentScores {
                text_score,
                skills_score,
            },
            final_score,
        })
    }

    fn name(&self) -> &str {
        "weighted-sum"
    }
}
