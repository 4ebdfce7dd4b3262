use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Question;

/// Errors that can occur when building a passage set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PassageError {
    #[error("passage text is empty")]
    EmptyPassage,
    #[error("passage set has no questions")]
    NoQuestions,
}

/// One reading passage together with its comprehension questions.
///
/// Immutable once built; a set always carries at least one question, so a
/// session never presents a passage with nothing to answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageSet {
    passage: String,
    questions: Vec<Question>,
}

impl PassageSet {
    /// Create a passage set.
    ///
    /// # Errors
    ///
    /// Returns `PassageError::EmptyPassage` if the trimmed passage is empty,
    /// `PassageError::NoQuestions` if the question list is empty.
    pub fn new(
        passage: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, PassageError> {
        let passage = passage.into();
        if passage.trim().is_empty() {
            return Err(PassageError::EmptyPassage);
        }
        if questions.is_empty() {
            return Err(PassageError::NoQuestions);
        }
        Ok(Self { passage, questions })
    }

    #[must_use]
    pub fn passage(&self) -> &str {
        &self.passage
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerChoice, Skill};

    fn build_question(text: &str) -> Question {
        Question::new(Skill::Detail, text, AnswerChoice::True).unwrap()
    }

    #[test]
    fn set_requires_passage_text() {
        let err = PassageSet::new("  ", vec![build_question("Q1")]).unwrap_err();
        assert_eq!(err, PassageError::EmptyPassage);
    }

    #[test]
    fn set_requires_at_least_one_question() {
        let err = PassageSet::new("Some passage.", Vec::new()).unwrap_err();
        assert_eq!(err, PassageError::NoQuestions);
    }

    #[test]
    fn set_exposes_questions_in_order() {
        let set = PassageSet::new(
            "Some passage.",
            vec![build_question("Q1"), build_question("Q2")],
        )
        .unwrap();
        assert_eq!(set.question_count(), 2);
        assert_eq!(set.questions()[0].text(), "Q1");
        assert_eq!(set.questions()[1].text(), "Q2");
    }
}
