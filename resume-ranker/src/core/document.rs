use serde::Serialize;

use crate::skills::{extract, SkillSet, Vocabulary};

/// Job description the candidates are ranked against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDocument {
    text: String,
    skills: SkillSet,
}

impl QueryDocument {
    /// Extract the skill set once; blank text is accepted here and rejected by ranking
    pub fn new(text: impl Into<String>, vocabulary: &Vocabulary) -> Self {
        let text = text.into();
        let skills = extract(&text, vocabulary);
        Self { text, skills }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One resume with readable text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateDocument {
    id: String,
    text: String,
    skills: SkillSet,
}

impl CandidateDocument {
    /// Returns `None` when the text is blank: such a candidate never enters scoring.
    pub fn new(id: impl Into<String>, text: impl Into<String>, vocabulary: &Vocabulary) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        let skills = extract(&text, vocabulary);
        Some(Self {
            id: id.into(),
            text,
            skills,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }
}
