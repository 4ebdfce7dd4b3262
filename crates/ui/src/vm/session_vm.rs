use chrono::{DateTime, Utc};

use coach_core::model::{AnswerChoice, PracticeSession};

use crate::vm::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: usize,
    pub skill: &'static str,
    pub text: String,
    pub options: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassageVm {
    pub number: usize,
    pub total: usize,
    pub passage: String,
    pub questions: Vec<QuestionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub passage_number: usize,
    pub lines: Vec<String>,
    pub passage_score: u32,
    pub question_count: usize,
    pub total_score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub passages: usize,
    pub total_score: u32,
    pub total_questions: usize,
    pub elapsed: String,
}

/// Map the passage currently being answered, `None` once the session is
/// complete.
#[must_use]
pub fn map_current_passage(session: &PracticeSession) -> Option<PassageVm> {
    let set = session.current_set()?;
    let questions = set
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionVm {
            number: index + 1,
            skill: question.skill().label(),
            text: question.text().to_string(),
            options: AnswerChoice::ALL.iter().map(|c| c.label()).collect(),
        })
        .collect();

    Some(PassageVm {
        number: session.current_index() + 1,
        total: session.total_sets(),
        passage: set.passage().to_string(),
        questions,
    })
}

/// Map the grading feedback for the current passage, present only while the
/// session sits in the graded phase.
#[must_use]
pub fn map_feedback(session: &PracticeSession) -> Option<FeedbackVm> {
    let result = session.current_result()?;
    let question_count = session.current_set().map_or(0, |set| set.question_count());
    Some(FeedbackVm {
        passage_number: result.passage_number,
        lines: result.feedback.clone(),
        passage_score: result.score,
        question_count,
        total_score: session.score(),
    })
}

/// Map the end-of-run summary.
#[must_use]
pub fn map_summary(session: &PracticeSession, now: DateTime<Utc>) -> SummaryVm {
    let end = session.completed_at().unwrap_or(now);
    SummaryVm {
        passages: session.results().len(),
        total_score: session.score(),
        total_questions: session.total_questions(),
        elapsed: format_elapsed(session.started_at(), end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use coach_core::model::{PassageSet, Question, Skill};
    use coach_core::time::fixed_now;

    fn build_session() -> PracticeSession {
        let questions = vec![
            Question::new(Skill::Skimming, "First?", AnswerChoice::True).unwrap(),
            Question::new(Skill::Detail, "Second?", AnswerChoice::NotGiven).unwrap(),
        ];
        let sets = vec![PassageSet::new("Body text.", questions).unwrap()];
        PracticeSession::new(sets, fixed_now()).unwrap()
    }

    #[test]
    fn passage_vm_carries_numbering_skills_and_options() {
        let session = build_session();
        let vm = map_current_passage(&session).unwrap();

        assert_eq!(vm.number, 1);
        assert_eq!(vm.total, 1);
        assert_eq!(vm.passage, "Body text.");
        assert_eq!(vm.questions.len(), 2);
        assert_eq!(vm.questions[0].number, 1);
        assert_eq!(vm.questions[0].skill, "Skimming");
        assert_eq!(vm.questions[1].skill, "Detail");
        assert_eq!(vm.questions[0].options, vec!["True", "False", "Not Given"]);
    }

    #[test]
    fn feedback_vm_appears_only_after_submission() {
        let mut session = build_session();
        assert!(map_feedback(&session).is_none());

        session
            .submit(&[AnswerChoice::True, AnswerChoice::False])
            .unwrap();
        let vm = map_feedback(&session).unwrap();

        assert_eq!(vm.passage_number, 1);
        assert_eq!(vm.passage_score, 1);
        assert_eq!(vm.question_count, 2);
        assert_eq!(vm.total_score, 1);
        assert_eq!(
            vm.lines,
            vec!["Q1 correct", "Q2 incorrect. Correct: Not Given"]
        );
    }

    #[test]
    fn summary_vm_uses_completion_time_for_elapsed() {
        let mut session = build_session();
        session
            .submit(&[AnswerChoice::True, AnswerChoice::NotGiven])
            .unwrap();
        session
            .advance(fixed_now() + Duration::seconds(90))
            .unwrap();

        let vm = map_summary(&session, fixed_now() + Duration::seconds(500));
        assert_eq!(vm.passages, 1);
        assert_eq!(vm.total_score, 2);
        assert_eq!(vm.total_questions, 2);
        assert_eq!(vm.elapsed, "1m 30s");
    }
}
