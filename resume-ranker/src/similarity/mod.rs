pub mod tfidf;

use std::sync::Arc;

pub use tfidf::TfidfTextModel;
pub use tfidf_model::SparseVector;

/// Fitted text-to-vector transform shared read-only by all scoring calls
pub trait TextModel: Send + Sync {
    /// Transform text into a weighted-term vector
    fn transform(&self, text: &str) -> SparseVector;

    /// Number of vector dimensions; 0 means the model cannot score anything
    fn dimension(&self) -> usize;

    /// Get model name for logging
    fn name(&self) -> &str;
}

/// Cosine similarity clamped to [0, 1]; 0.0 when either vector has zero magnitude
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let score = a.cosine(b);
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Text similarity through an injected model
#[derive(Clone)]
pub struct SimilarityScorer {
    model: Arc<dyn TextModel>,
}

impl SimilarityScorer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn TextModel {
        self.model.as_ref()
    }

    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.model.transform(text)
    }

    pub fn similarity(&self, query_text: &str, candidate_text: &str) -> f64 {
        self.similarity_to(&self.vectorize(query_text), candidate_text)
    }

    /// Similarity against an already transformed query
    pub fn similarity_to(&self, query_vector: &SparseVector, candidate_text: &str) -> f64 {
        cosine_similarity(query_vector, &self.vectorize(candidate_text))
    }
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("model", &self.model.name())
            .finish()
    }
}
