use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

use crate::config::RankerConfig;
use crate::core::{CandidateDocument, QueryDocument, RankingResponse, ScoreRecord};
use crate::error::{RankerError, Result};
use crate::ranking::{sort_records, ScoringStrategy, WeightedSumStrategy, Weights};
use crate::similarity::{SimilarityScorer, SparseVector, TextModel, TfidfTextModel};
use crate::skills::Vocabulary;
use crate::sources::SourceDocument;

/// Main ranking engine orchestrator
pub struct RankingEngine {
    scorer: SimilarityScorer,
    vocabulary: Vocabulary,
    strategy: Arc<dyn ScoringStrategy>,
    options: EngineOptions,
}

/// Engine execution options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub parallel: bool,
    pub min_parallel_candidates: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_candidates: 8,
        }
    }
}

impl RankingEngine {
    /// Create engine with the weighted-sum strategy
    pub fn new(model: Arc<dyn TextModel>, vocabulary: Vocabulary, weights: Weights) -> Result<Self> {
        Self::with_strategy(model, vocabulary, Arc::new(WeightedSumStrategy::new(weights)))
    }

    pub fn with_strategy(
        model: Arc<dyn TextModel>,
        vocabulary: Vocabulary,
        strategy: Arc<dyn ScoringStrategy>,
    ) -> Result<Self> {
        if model.dimension() == 0 {
            return Err(RankerError::ModelUnavailable {
                source_name: model.name().to_string(),
                reason: "model has no dimensions".to_string(),
            });
        }
        if vocabulary.is_empty() {
            return Err(RankerError::EmptyVocabulary);
        }

        tracing::info!(
            "✅ Ranking engine ready (model={}, dimensions={}, strategy={}, vocabulary={} terms)",
            model.name(),
            model.dimension(),
            strategy.name(),
            vocabulary.len()
        );

        Ok(Self {
            scorer: SimilarityScorer::new(model),
            vocabulary,
            strategy,
            options: EngineOptions::default(),
        })
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Load the model and vocabulary named by `config`
    pub fn from_config(config: &RankerConfig) -> Result<Self> {
        let model = TfidfTextModel::load(&config.model_path)?;
        let engine = Self::new(Arc::new(model), config.vocabulary()?, config.weights()?)?;

        Ok(engine.with_options(EngineOptions {
            parallel: config.parallel,
            min_parallel_candidates: config.min_parallel_candidates,
        }))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn model_name(&self) -> &str {
        self.scorer.model().name()
    }

    pub fn query_document(&self, text: impl Into<String>) -> QueryDocument {
        QueryDocument::new(text, &self.vocabulary)
    }

    /// `None` for blank text
    pub fn candidate_document(
        &self,
        id: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<CandidateDocument> {
        CandidateDocument::new(id, text, &self.vocabulary)
    }

    /// Build candidates from source documents, dropping those without readable text
    pub fn prepare_candidates(&self, documents: Vec<SourceDocument>) -> Vec<CandidateDocument> {
        documents
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                let candidate = self.candidate_document(doc.id, doc.text);
                if candidate.is_none() {
                    tracing::warn!("⚠️ {}: no readable text, skipped", id);
                }
                candidate
            })
            .collect()
    }

    /// Rank candidates against the query, best first.
    ///
    /// Fails before any scoring when the query is blank or there are no candidates.
    /// Equal final scores keep the order in which candidates were supplied.
    pub fn rank(
        &self,
        query: &QueryDocument,
        candidates: &[CandidateDocument],
    ) -> Result<Vec<ScoreRecord>> {
        if query.is_blank() {
            return Err(RankerError::BlankQuery);
        }
        if candidates.is_empty() {
            return Err(RankerError::NoCandidates);
        }

        let query_vector = self.scorer.vectorize(query.text());
        let score_one =
            |candidate: &CandidateDocument| self.score_candidate(query, &query_vector, candidate);

        let mut records: Vec<ScoreRecord> = if self.options.parallel
            && candidates.len() >= self.options.min_parallel_candidates
        {
            candidates.par_iter().map(score_one).collect::<Result<_>>()?
        } else {
            candidates.iter().map(score_one).collect::<Result<_>>()?
        };

        sort_records(&mut records);

        if let Some(best) = records.first() {
            tracing::info!(
                "🏆 Ranked {} candidates ({} job skills), top: {}",
                records.len(),
                query.skills().len(),
                best.display()
            );
        }

        Ok(records)
    }

    /// Rank and wrap the result with timing and model metadata
    pub fn rank_report(
        &self,
        query: &QueryDocument,
        candidates: &[CandidateDocument],
    ) -> Result<RankingResponse> {
        let start = Instant::now();
        let records = self.rank(query, candidates)?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(RankingResponse {
            records,
            query_skills: query.skills().clone(),
            ranked_at: chrono::Utc::now(),
            latency_ms,
            strategy: self.strategy.name().to_string(),
            model: self.model_name().to_string(),
        })
    }

    /// Rank raw texts: builds the documents, drops unreadable candidates, ranks
    pub fn rank_documents(
        &self,
        query_text: impl Into<String>,
        documents: Vec<SourceDocument>,
    ) -> Result<RankingResponse> {
        let query = self.query_document(query_text);
        let candidates = self.prepare_candidates(documents);
        self.rank_report(&query, &candidates)
    }

    fn score_candidate(
        &self,
        query: &QueryDocument,
        query_vector: &SparseVector,
        candidate: &CandidateDocument,
    ) -> Result<ScoreRecord> {
        let scored = self
            .strategy
            .score(query, query_vector, candidate, &self.scorer)?;

        if !scored.final_score.is_finite() {
            return Err(RankerError::Scoring {
                candidate: candidate.id().to_string(),
                message: format!("non-finite final score {}", scored.final_score),
            });
        }

        let record = ScoreRecord {
            candidate_id: candidate.id().to_string(),
            text_score: scored.components.text_score,
            skills_score: scored.components.skills_score,
            final_score: scored.final_score,
            matched_skills: candidate.skills().intersection(query.skills()),
            missing_skills: query.skills().difference(candidate.skills()),
        };

        tracing::debug!("{}", record.display());
        Ok(record)
    }
}
