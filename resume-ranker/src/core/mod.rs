pub mod document;
pub mod score_record;

pub use document::{CandidateDocument, QueryDocument};
pub use score_record::{RankingResponse, ScoreRecord};
