/*!
# TF-IDF Model

Fitted text-to-vector transform used to compare free-text documents.

## Pipeline
- Tokenize: NFC normalization, lower-casing, split on non-word characters,
  minimum token length, stop words, optional adjacent-token bigrams
- Fit: document frequency per term (parallel over documents), smoothed IDF
- Transform: raw or sublinear term frequency × IDF, L2-normalized sparse vector
- Compare: cosine similarity over sorted sparse entries

The fitted state is plain data (vocabulary + IDF table) and is persisted as JSON,
so a model fitted once can be loaded read-only by any number of scorers.
*/

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

// ═══════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Reading or writing a model file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model JSON could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot fit a model on an empty corpus")]
    EmptyCorpus,

    #[error("corpus produced an empty vocabulary")]
    EmptyVocabulary,

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Decoded model violates its own invariants
    #[error("corrupt model: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

// ═══════════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════════

/// Tokenization and weighting options, fixed at fit time and stored with the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfOptions {
    /// Lower-case text before tokenizing
    pub lowercase: bool,

    /// Minimum token length in chars
    pub min_token_len: usize,

    /// Largest n-gram size (1 = unigrams, 2 = unigrams + bigrams)
    pub ngram_max: usize,

    /// Replace tf with 1 + ln(tf)
    pub sublinear_tf: bool,

    /// Add one to document counts as if an extra document contained every term
    pub smooth_idf: bool,

    pub stop_words: Vec<String>,

    /// Keep only the most frequent terms (by document frequency)
    pub max_features: Option<usize>,
}

/// Largest supported n-gram size
pub const MAX_NGRAM: usize = 3;

impl TfidfOptions {
    pub fn validate(&self) -> Result<()> {
        if self.ngram_max == 0 || self.ngram_max > MAX_NGRAM {
            return Err(ModelError::InvalidOptions(format!(
                "ngram_max must be between 1 and {}, got {}",
                MAX_NGRAM, self.ngram_max
            )));
        }
        Ok(())
    }
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_len: 2,
            ngram_max: 1,
            sublinear_tf: false,
            smooth_idf: true,
            stop_words: Vec::new(),
            max_features: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tokenization
// ═══════════════════════════════════════════════════════════════════════════

/// Split text into the terms a model with `options` would count.
pub fn tokenize(text: &str, options: &TfidfOptions) -> Vec<String> {
    let normalized: String = text.nfc().collect();
    let normalized = if options.lowercase {
        normalized.to_lowercase()
    } else {
        normalized
    };

    let words: Vec<&str> = normalized
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty() && w.chars().count() >= options.min_token_len)
        .filter(|w| !options.stop_words.iter().any(|stop| stop == w))
        .collect();

    let mut tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    for n in 2..=options.ngram_max {
        tokens.extend(words.windows(n).map(|window| window.join(" ")));
    }
    tokens
}

#[inline]
fn inverse_document_frequency(documents: f64, frequency: f64, smooth: bool) -> f64 {
    if smooth {
        ((1.0 + documents) / (1.0 + frequency)).ln() + 1.0
    } else {
        (documents / frequency).ln() + 1.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Sparse vectors
// ═══════════════════════════════════════════════════════════════════════════

/// Sparse weighted-term vector. Entries are sorted by index with no zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a vector from unordered entries; duplicate indices are summed.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(index, _)| index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, weight) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == index => *acc += weight,
                _ => merged.push((index, weight)),
            }
        }
        merged.retain(|&(_, weight)| weight != 0.0);

        Self { entries: merged }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product via merge-join over the sorted entries
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_index, a_weight) = self.entries[i];
            let (b_index, b_weight) = other.entries[j];
            match a_index.cmp(&b_index) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity; 0.0 when either vector has zero magnitude.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let magnitude = self.norm() * other.norm();
        if magnitude == 0.0 {
            return 0.0;
        }
        self.dot(other) / magnitude
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Model
// ═══════════════════════════════════════════════════════════════════════════

/// Fitted TF-IDF transform.
///
/// Every decode path goes through `RawModel` and `validate`, so a
/// deserialized model always has in-range indices and usable options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct TfidfModel {
    options: TfidfOptions,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    document_count: usize,
}

/// Model as stored on disk, before its invariants are checked
#[derive(Deserialize)]
struct RawModel {
    options: TfidfOptions,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    document_count: usize,
}

impl TryFrom<RawModel> for TfidfModel {
    type Error = ModelError;

    fn try_from(raw: RawModel) -> Result<Self> {
        let model = Self {
            options: raw.options,
            vocabulary: raw.vocabulary,
            idf: raw.idf,
            document_count: raw.document_count,
        };
        model.validate()?;
        Ok(model)
    }
}

impl TfidfModel {
    /// Fit vocabulary and IDF table on a corpus.
    ///
    /// Term indices follow lexicographic term order, so fitting the same corpus
    /// always yields the same model.
    pub fn fit<S: AsRef<str> + Sync>(corpus: &[S], options: TfidfOptions) -> Result<Self> {
        options.validate()?;
        if corpus.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }

        let document_frequency: HashMap<String, usize> = corpus
            .par_iter()
            .map(|doc| {
                tokenize(doc.as_ref(), &options)
                    .into_iter()
                    .collect::<BTreeSet<String>>()
            })
            .fold(HashMap::new, |mut acc, terms| {
                for term in terms {
                    *acc.entry(term).or_insert(0) += 1;
                }
                acc
            })
            .reduce(HashMap::new, |mut a, b| {
                for (term, count) in b {
                    *a.entry(term).or_insert(0) += count;
                }
                a
            });

        let mut terms: Vec<(String, usize)> = document_frequency.into_iter().collect();
        if let Some(max_features) = options.max_features {
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            terms.truncate(max_features);
        }
        if terms.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let documents = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, frequency)) in terms.into_iter().enumerate() {
            idf.push(inverse_document_frequency(
                documents,
                frequency as f64,
                options.smooth_idf,
            ));
            vocabulary.insert(term, index);
        }

        Ok(Self {
            options,
            vocabulary,
            idf,
            document_count: corpus.len(),
        })
    }

    /// Transform text into an L2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored; text without any known
    /// term yields the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text, &self.options) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .filter_map(|(index, tf)| {
                let tf = if self.options.sublinear_tf { 1.0 + tf.ln() } else { tf };
                self.idf.get(index).map(|idf| (index, tf * idf))
            })
            .collect();

        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }

        SparseVector::from_entries(entries)
    }

    /// Transform many texts in parallel, preserving input order.
    pub fn transform_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<SparseVector> {
        texts.par_iter().map(|text| self.transform(text.as_ref())).collect()
    }

    /// Highest-weighted terms of a vector produced by this model.
    pub fn top_terms(&self, vector: &SparseVector, n: usize) -> Vec<(String, f64)> {
        let mut terms_by_index = vec![""; self.vocabulary.len()];
        for (term, &index) in &self.vocabulary {
            if let Some(slot) = terms_by_index.get_mut(index) {
                *slot = term.as_str();
            }
        }

        let mut weighted: Vec<(String, f64)> = vector
            .entries()
            .iter()
            .filter_map(|&(index, weight)| {
                terms_by_index
                    .get(index)
                    .map(|term| (term.to_string(), weight))
            })
            .collect();
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        weighted.truncate(n);
        weighted
    }

    pub fn options(&self) -> &TfidfOptions {
        &self.options
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).and_then(|index| self.idf.get(index).copied())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Persistence
    // ═══════════════════════════════════════════════════════════════════════

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a model and check its invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawModel = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        self.options
            .validate()
            .map_err(|e| ModelError::Corrupt(e.to_string()))?;
        if self.vocabulary.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(ModelError::Corrupt(format!(
                "{} idf weights for {} terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }

        let mut seen = vec![false; self.idf.len()];
        for (term, &index) in &self.vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ModelError::Corrupt(format!(
                        "index {} assigned twice (term '{}')",
                        index, term
                    )))
                }
                None => {
                    return Err(ModelError::Corrupt(format!(
                        "index {} out of range for term '{}'",
                        index, term
                    )))
                }
            }
        }

        if let Some(weight) = self.idf.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ModelError::Corrupt(format!("invalid idf weight {}", weight)));
        }

        Ok(())
    }
}
