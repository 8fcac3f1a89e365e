use std::path::Path;

use tfidf_model::{SparseVector, TfidfModel};

use crate::error::{RankerError, Result};
use crate::similarity::TextModel;

/// TF-IDF model adapter
pub struct TfidfTextModel {
    model: TfidfModel,
}

impl TfidfTextModel {
    pub fn new(model: TfidfModel) -> Self {
        Self { model }
    }

    /// Load a fitted model from JSON; any failure is a configuration error
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model = TfidfModel::load(path).map_err(|e| RankerError::ModelUnavailable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            "📦 Loaded TF-IDF model from {} ({} terms, {} documents)",
            path.display(),
            model.vocabulary_len(),
            model.document_count()
        );

        Ok(Self { model })
    }
}

impl TextModel for TfidfTextModel {
    fn transform(&self, text: &str) -> SparseVector {
        self.model.transform(text)
    }

    fn dimension(&self) -> usize {
        self.model.vocabulary_len()
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tfidf_model::TfidfOptions;

    #[test]
    fn test_missing_model_file() {
        let err = TfidfTextModel::load("/nonexistent/vectorizer.json").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("/nonexistent/vectorizer.json"));
    }

    #[test]
    fn test_load_saved_model() {
        let model = TfidfModel::fit(
            &["python developer", "java developer"],
            TfidfOptions::default(),
        )
        .unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        model.save(file.path()).unwrap();

        let loaded = TfidfTextModel::load(file.path()).unwrap();
        assert_eq!(loaded.dimension(), 3);
        assert_eq!(loaded.name(), "tfidf");
    }

    #[test]
    fn test_unusable_ngram_range_is_configuration_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"options":{"ngram_max":18446744073709551615},"vocabulary":{"python":0},"idf":[1.0],"document_count":1}"#,
        )
        .unwrap();

        let err = TfidfTextModel::load(file.path()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("ngram_max"));
    }
}
