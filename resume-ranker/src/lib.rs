//! # Resume Ranker
//!
//! Ranks resumes against a job description:
//! - TF-IDF cosine similarity between the two texts
//! - Skill-keyword overlap against a fixed vocabulary
//! - Weighted combination, stable descending sort
//! - Explanation: matched and missing skills per candidate
//! - Multiple interfaces: Rust library, Python bindings, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use resume_ranker::{RankingEngine, TfidfTextModel, Vocabulary, Weights};
//!
//! fn main() -> anyhow::Result<()> {
//!     let model = TfidfTextModel::load("vectorizer.json")?;
//!     let engine = RankingEngine::new(Arc::new(model), Vocabulary::builtin(), Weights::default())?;
//!
//!     let query = engine.query_document("Backend engineer: Python, SQL, Docker");
//!     let candidates: Vec<_> = [("alice.txt", "Python and SQL"), ("bob.txt", "Java")]
//!         .into_iter()
//!         .filter_map(|(id, text)| engine.candidate_document(id, text))
//!         .collect();
//!
//!     for record in engine.rank(&query, &candidates)? {
//!         println!("{}", record.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod similarity;
pub mod skills;
pub mod sources;

// Re-export primary types
pub use config::RankerConfig;
pub use crate::core::{CandidateDocument, QueryDocument, RankingResponse, ScoreRecord};
pub use engine::{EngineOptions, RankingEngine};
pub use error::{ErrorKind, RankerError, Result};
pub use ranking::{ComponentScores, ScoringStrategy, WeightedSumStrategy, Weights};
pub use similarity::{cosine_similarity, SimilarityScorer, TextModel, TfidfTextModel};
pub use skills::{extract, SkillSet, Vocabulary};
pub use sources::{DocumentSource, SourceDocument};

// Python bindings
#[cfg(feature = "python")]
pub mod python;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
