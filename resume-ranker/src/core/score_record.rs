use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::skills::SkillSet;

/// Score of one candidate against the job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Candidate identifier (file name)
    pub candidate_id: String,

    /// Cosine similarity of the two texts (0.0 - 1.0)
    pub text_score: f64,

    /// Share of the job's skills the candidate has (0.0 - 1.0)
    pub skills_score: f64,

    /// Weighted combination used as the sort key
    pub final_score: f64,

    /// Job skills the candidate has
    pub matched_skills: SkillSet,

    /// Job skills the candidate lacks
    pub missing_skills: SkillSet,
}

impl ScoreRecord {
    /// Skill match as a percentage (0.0 - 100.0)
    pub fn skills_percent(&self) -> f64 {
        self.skills_score * 100.0
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "{} - final {:.3} (text {:.3}, skills {:.1}%)",
            self.candidate_id,
            self.final_score,
            self.text_score,
            self.skills_percent()
        )
    }
}

/// Ranked candidates with request metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    /// Records sorted by final score, best first
    pub records: Vec<ScoreRecord>,

    /// Skills detected in the job description
    pub query_skills: SkillSet,

    pub ranked_at: DateTime<Utc>,

    /// Ranking latency in milliseconds
    pub latency_ms: f64,

    /// Scoring strategy used (e.g. weighted-sum)
    pub strategy: String,

    /// Text model used (e.g. tfidf)
    pub model: String,
}

impl RankingResponse {
    /// Best-ranked candidate
    pub fn top(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }
}
