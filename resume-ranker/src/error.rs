use thiserror::Error;

/// Main error type for the ranking engine
#[derive(Error, Debug)]
pub enum RankerError {
    /// Fitted text model missing or unusable
    #[error("Text model unavailable ({source_name}): {reason}")]
    ModelUnavailable { source_name: String, reason: String },

    /// Skill vocabulary has no terms
    #[error("Skill vocabulary is empty")]
    EmptyVocabulary,

    /// Vocabulary entry is empty or not lower-case
    #[error("Invalid vocabulary term '{term}': {reason}")]
    InvalidVocabularyTerm { term: String, reason: String },

    #[error("Duplicate vocabulary term '{0}'")]
    DuplicateVocabularyTerm(String),

    /// Weights must be finite, non-negative and sum to 1.0
    #[error("Invalid weights: text={text}, skill={skill} (must be non-negative and sum to 1.0)")]
    InvalidWeights { text: f64, skill: f64 },

    /// Malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ranking requested with zero candidates
    #[error("No candidates to rank: upload at least one resume with readable text")]
    NoCandidates,

    /// Query text empty or whitespace only
    #[error("Job description is empty")]
    BlankQuery,

    /// Scoring strategy failed for one candidate
    #[error("Scoring failed for candidate '{candidate}': {message}")]
    Scoring { candidate: String, message: String },

    /// I/O errors from document sources and config files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Broad error categories, for callers that render user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fatal setup problem; not retried
    Configuration,
    /// Caller supplied input the engine refuses to rank
    Precondition,
    Io,
    Internal,
}

impl RankerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RankerError::ModelUnavailable { .. }
            | RankerError::EmptyVocabulary
            | RankerError::InvalidVocabularyTerm { .. }
            | RankerError::DuplicateVocabularyTerm(_)
            | RankerError::InvalidWeights { .. }
            | RankerError::Config(_)
            | RankerError::Yaml(_) => ErrorKind::Configuration,
            RankerError::NoCandidates | RankerError::BlankQuery => ErrorKind::Precondition,
            RankerError::Io(_) => ErrorKind::Io,
            RankerError::Scoring { .. } => ErrorKind::Internal,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::Precondition
    }
}

impl From<tfidf_model::ModelError> for RankerError {
    fn from(e: tfidf_model::ModelError) -> Self {
        RankerError::ModelUnavailable {
            source_name: "tfidf".to_string(),
            reason: e.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RankerError>;
