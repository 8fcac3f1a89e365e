#![allow(dead_code)]

use resume_ranker::similarity::SparseVector;
use resume_ranker::TextModel;
use std::sync::Arc;
use tfidf_model::{TfidfModel, TfidfOptions};

pub const CORPUS: &[&str] = &[
    "Backend engineer with Python, SQL and Docker experience building REST APIs",
    "Data analyst skilled in SQL, pandas and data analysis for reporting",
    "Java developer using Spring Boot, Kubernetes and AWS",
    "Frontend developer with TypeScript, JavaScript and unit testing",
    "Machine learning engineer with Python, PyTorch and TensorFlow",
    "I know Python",
    "I know SQL and Python",
    "Need Python and SQL skills",
];

pub fn fitted_model() -> TfidfModel {
    TfidfModel::fit(CORPUS, TfidfOptions::default()).expect("corpus has terms")
}

pub fn tfidf() -> Arc<resume_ranker::TfidfTextModel> {
    Arc::new(resume_ranker::TfidfTextModel::new(fitted_model()))
}

/// Every non-blank text maps to the same unit vector
pub struct ConstantModel;

impl TextModel for ConstantModel {
    fn transform(&self, text: &str) -> SparseVector {
        if text.trim().is_empty() {
            SparseVector::default()
        } else {
            SparseVector::from_entries(vec![(0, 1.0)])
        }
    }

    fn dimension(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "constant"
    }
}
