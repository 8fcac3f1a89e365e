pub mod files;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use files::{read_text, DirectorySource, FileSource};

/// Decoded plain text of one document, as handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Identifier (lower-cased file name); not required to be unique
    #[serde(alias = "filename")]
    pub id: String,

    /// Plain text; empty when nothing could be extracted
    #[serde(default)]
    pub text: String,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Trait for document sources (local files, directories, uploads)
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch all documents in a stable order
    async fn fetch(&self) -> Result<Vec<SourceDocument>>;

    /// Get source name for logging
    fn name(&self) -> &str;
}
