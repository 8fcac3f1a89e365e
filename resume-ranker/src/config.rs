//! Ranker configuration loaded from `config.yaml` with environment overrides.
//!
//! ```yaml
//! model_path: models/vectorizer.json
//! text_weight: 0.6
//! skill_weight: 0.4
//! vocabulary: [python, sql, docker]   # optional, builtin list otherwise
//! parallel: true
//! min_parallel_candidates: 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RankerError, Result};
use crate::ranking::Weights;
use crate::skills::Vocabulary;

/// Typed ranker configuration with fallbacks for every field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Fitted TF-IDF model (JSON)
    pub model_path: PathBuf,

    /// Weight of text similarity in the final score
    pub text_weight: f64,

    /// Weight of skill overlap in the final score
    pub skill_weight: f64,

    /// Skill vocabulary; builtin list when absent
    pub vocabulary: Option<Vec<String>>,

    /// Score candidates on the rayon pool
    pub parallel: bool,

    /// Below this many candidates scoring stays on the calling thread
    pub min_parallel_candidates: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("vectorizer.json"),
            text_weight: 0.6,
            skill_weight: 0.4,
            vocabulary: None,
            parallel: true,
            min_parallel_candidates: 8,
        }
    }
}

impl RankerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&yaml)
    }

    /// Apply `RANKER_MODEL_PATH`, `RANKER_TEXT_WEIGHT` and `RANKER_SKILL_WEIGHT`
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = lookup("RANKER_MODEL_PATH") {
            self.model_path = PathBuf::from(path);
        }
        if let Some(value) = lookup("RANKER_TEXT_WEIGHT") {
            self.text_weight = parse_weight("RANKER_TEXT_WEIGHT", &value)?;
        }
        if let Some(value) = lookup("RANKER_SKILL_WEIGHT") {
            self.skill_weight = parse_weight("RANKER_SKILL_WEIGHT", &value)?;
        }
        Ok(self)
    }

    pub fn weights(&self) -> Result<Weights> {
        Weights::new(self.text_weight, self.skill_weight)
    }

    pub fn vocabulary(&self) -> Result<Vocabulary> {
        match &self.vocabulary {
            Some(terms) => Vocabulary::new(terms.iter().cloned()),
            None => Ok(Vocabulary::builtin()),
        }
    }
}

fn parse_weight(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RankerError::Config(format!("{} is not a number: '{}'", key, value)))
}

impl std::fmt::Display for RankerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "model={}, text_weight={}, skill_weight={}, vocabulary={}, parallel={}",
            self.model_path.display(),
            self.text_weight,
            self.skill_weight,
            self.vocabulary
                .as_ref()
                .map(|v| format!("{} terms", v.len()))
                .unwrap_or_else(|| "builtin".to_string()),
            self.parallel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_values() {
        let config = RankerConfig::default();
        assert_eq!(config.text_weight, 0.6);
        assert_eq!(config.skill_weight, 0.4);
        assert!(config.vocabulary.is_none());
        assert_eq!(config.weights().unwrap(), Weights::default());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = RankerConfig::from_yaml_str(
            "model_path: models/jobs.json\ntext_weight: 0.5\nskill_weight: 0.5\n",
        )
        .unwrap();
        assert_eq!(config.model_path, PathBuf::from("models/jobs.json"));
        assert_eq!(config.weights().unwrap(), Weights::new(0.5, 0.5).unwrap());
        assert!(config.parallel); // default
        assert_eq!(config.vocabulary().unwrap(), Vocabulary::builtin());
    }

    #[test]
    fn test_custom_vocabulary() {
        let config = RankerConfig::from_yaml_str("vocabulary: [python, sql]").unwrap();
        assert_eq!(config.vocabulary().unwrap().len(), 2);

        let config = RankerConfig::from_yaml_str("vocabulary: []").unwrap();
        assert!(matches!(config.vocabulary(), Err(RankerError::EmptyVocabulary)));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let config = RankerConfig::from_yaml_str("text_weight: 0.9").unwrap();
        assert!(config.weights().unwrap_err().is_configuration());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("RANKER_MODEL_PATH", "/srv/model.json"),
            ("RANKER_TEXT_WEIGHT", "0.8"),
            ("RANKER_SKILL_WEIGHT", " 0.2 "),
        ]
        .into_iter()
        .collect();

        let config = RankerConfig::default()
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.text_weight, 0.8);
        assert_eq!(config.skill_weight, 0.2);
    }

    #[test]
    fn test_env_override_not_a_number() {
        let result = RankerConfig::default().apply_overrides(|key| {
            (key == "RANKER_TEXT_WEIGHT").then(|| "heavy".to_string())
        });
        assert!(matches!(result, Err(RankerError::Config(_))));
    }

    #[test]
    fn test_display() {
        let display = format!("{}", RankerConfig::default());
        assert_eq!(
            display,
            "model=vectorizer.json, text_weight=0.6, skill_weight=0.4, vocabulary=builtin, parallel=true"
        );
    }
}
