use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;

use crate::core::{RankingResponse as RustRankingResponse, ScoreRecord as RustScoreRecord};
use crate::error::{ErrorKind, RankerError};
use crate::{RankerConfig, RankingEngine, SourceDocument};

/// Precondition violations become ValueError, everything else RuntimeError
fn to_py_err(e: RankerError) -> PyErr {
    match e.kind() {
        ErrorKind::Precondition => PyValueError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

/// Python wrapper for RankingEngine
#[pyclass]
struct ResumeRanker {
    engine: Arc<RankingEngine>,
}

#[pymethods]
impl ResumeRanker {
    /// Create a ranker from a fitted model, optionally with a YAML config
    #[new]
    #[pyo3(signature = (model_path, config_path=None, text_weight=None, skill_weight=None))]
    fn new(
        model_path: String,
        config_path: Option<String>,
        text_weight: Option<f64>,
        skill_weight: Option<f64>,
    ) -> PyResult<Self> {
        let mut config = match config_path {
            Some(path) => RankerConfig::load(path).map_err(to_py_err)?,
            None => RankerConfig::default(),
        };
        config.model_path = model_path.into();
        if let Some(weight) = text_weight {
            config.text_weight = weight;
        }
        if let Some(weight) = skill_weight {
            config.skill_weight = weight;
        }

        let engine = RankingEngine::from_config(&config).map_err(to_py_err)?;
        Ok(Self {
            engine: Arc::new(engine),
        })
    }

    /// Rank `(filename, text)` pairs against a job description
    fn rank(
        &self,
        py: Python,
        job_description: String,
        resumes: Vec<(String, String)>,
    ) -> PyResult<PyObject> {
        let documents: Vec<SourceDocument> = resumes
            .into_iter()
            .map(|(id, text)| SourceDocument::new(id, text))
            .collect();

        let engine = self.engine.clone();
        let result = py
            .allow_threads(move || engine.rank_documents(job_description, documents))
            .map_err(to_py_err)?;

        ranking_response_to_py(py, &result)
    }

    /// Skills detected in a text, sorted
    fn extract_skills(&self, text: &str) -> Vec<String> {
        crate::skills::extract(text, self.engine.vocabulary()).to_vec()
    }
}

/// Convert ScoreRecord to Python dict
fn score_record_to_py(py: Python, record: &RustScoreRecord) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("filename", &record.candidate_id)?;
    dict.set_item("score", record.text_score)?;
    dict.set_item("skills_score", record.skills_score)?;
    dict.set_item("final_score", record.final_score)?;
    dict.set_item("matched_skills", record.matched_skills.to_vec())?;
    dict.set_item("missing_skills", record.missing_skills.to_vec())?;
    Ok(dict.into())
}

/// Convert RankingResponse to Python dict
fn ranking_response_to_py(py: Python, response: &RustRankingResponse) -> PyResult<PyObject> {
    let dict = PyDict::new(py);

    let records: PyResult<Vec<PyObject>> = response
        .records
        .iter()
        .map(|record| score_record_to_py(py, record))
        .collect();
    dict.set_item("records", records?)?;

    dict.set_item("jd_skills", response.query_skills.to_vec())?;
    dict.set_item("ranked_at", response.ranked_at.to_rfc3339())?;
    dict.set_item("latency_ms", response.latency_ms)?;
    dict.set_item("strategy", &response.strategy)?;
    dict.set_item("model", &response.model)?;

    Ok(dict.into())
}

/// Python module
#[pymodule]
fn resume_ranker(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<ResumeRanker>()?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
