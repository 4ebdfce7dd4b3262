use thiserror::Error;

use crate::model::{AnswerChoice, Question};

/// Errors that can occur while grading a passage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("answer count mismatch: expected {expected}, got {got}")]
    CountMismatch { expected: usize, got: usize },
}

/// Result of grading one passage: correct count plus per-question feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub score: u32,
    pub feedback: Vec<String>,
}

/// Grade the learner's answers against a passage's questions.
///
/// Pure: no state is touched. Feedback lines are 1-indexed and follow
/// question order, `"Q1 correct"` or `"Q2 incorrect. Correct: False"`.
///
/// # Errors
///
/// Returns `GradeError::CountMismatch` when the answer list does not line up
/// with the question list. Callers are expected to collect exactly one answer
/// per question; a mismatch is a caller bug, never a partial grade.
pub fn grade(questions: &[Question], answers: &[AnswerChoice]) -> Result<GradeReport, GradeError> {
    if questions.len() != answers.len() {
        return Err(GradeError::CountMismatch {
            expected: questions.len(),
            got: answers.len(),
        });
    }

    let mut score = 0_u32;
    let mut feedback = Vec::with_capacity(questions.len());
    for (index, (question, answer)) in questions.iter().zip(answers).enumerate() {
        if question.answer() == *answer {
            score += 1;
            feedback.push(format!("Q{} correct", index + 1));
        } else {
            feedback.push(format!(
                "Q{} incorrect. Correct: {}",
                index + 1,
                question.answer()
            ));
        }
    }

    Ok(GradeReport { score, feedback })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Skill;

    fn build_question(answer: AnswerChoice) -> Question {
        Question::new(Skill::Inference, "Is it so?", answer).unwrap()
    }

    #[test]
    fn grading_counts_exact_matches_and_formats_feedback() {
        let questions = vec![
            build_question(AnswerChoice::True),
            build_question(AnswerChoice::False),
        ];
        let report = grade(&questions, &[AnswerChoice::True, AnswerChoice::True]).unwrap();

        assert_eq!(report.score, 1);
        assert_eq!(
            report.feedback,
            vec![
                "Q1 correct".to_string(),
                "Q2 incorrect. Correct: False".to_string()
            ]
        );
    }

    #[test]
    fn grading_reports_not_given_label_in_feedback() {
        let questions = vec![build_question(AnswerChoice::NotGiven)];
        let report = grade(&questions, &[AnswerChoice::False]).unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.feedback, vec!["Q1 incorrect. Correct: Not Given"]);
    }

    #[test]
    fn grading_rejects_mismatched_lengths() {
        let questions = vec![build_question(AnswerChoice::True)];
        let err = grade(&questions, &[]).unwrap_err();
        assert_eq!(
            err,
            GradeError::CountMismatch {
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn grading_all_correct() {
        let questions = vec![
            build_question(AnswerChoice::True),
            build_question(AnswerChoice::NotGiven),
            build_question(AnswerChoice::False),
        ];
        let answers = [
            AnswerChoice::True,
            AnswerChoice::NotGiven,
            AnswerChoice::False,
        ];
        let report = grade(&questions, &answers).unwrap();
        assert_eq!(report.score, 3);
        assert!(report.feedback.iter().all(|line| line.ends_with("correct")));
    }
}
