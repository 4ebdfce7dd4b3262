use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::grade::{grade, GradeError};
use crate::model::{AnswerChoice, PassageSet};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors emitted by the practice session state machine.
///
/// Every transition guard surfaces as a typed error rather than a silent
/// no-op, so callers can tell a rejected transition from an accepted one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no passage sets available for a session")]
    Empty,
    #[error("session is already complete")]
    Completed,
    #[error("current passage was already submitted")]
    AlreadySubmitted,
    #[error("current passage has not been submitted yet")]
    NotGraded,
    #[error("answer count mismatch: expected {expected}, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },
}

impl From<GradeError> for SessionError {
    fn from(err: GradeError) -> Self {
        match err {
            GradeError::CountMismatch { expected, got } => {
                SessionError::AnswerCountMismatch { expected, got }
            }
        }
    }
}

//
// ─── PHASE & PROGRESS ─────────────────────────────────────────────────────────
//

/// Where the session currently sits in its lifecycle.
///
/// "No session at all" is not a phase: an empty batch fails construction with
/// `SessionError::Empty`, so a `PracticeSession` value always has work in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Collecting fresh answers for the current passage.
    Ready,
    /// Feedback for the current passage is visible; navigation pending.
    Graded,
    /// Every passage has been submitted and advanced past. Terminal.
    Complete,
}

/// Aggregated view of session progress, useful for presenters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub submitted: usize,
    pub remaining: usize,
    pub score: u32,
    pub is_complete: bool,
}

//
// ─── PASSAGE RESULT ───────────────────────────────────────────────────────────
//

/// Record of one submitted passage, appended in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageResult {
    pub passage_number: usize,
    pub score: u32,
    pub feedback: Vec<String>,
}

//
// ─── PRACTICE SESSION ─────────────────────────────────────────────────────────
//

/// In-memory state machine for one practice run over a batch of passages.
///
/// Steps through the batch one passage at a time: answers for the current
/// passage are graded on `submit`, navigation moves on `advance`. All
/// counters start from zero at construction, so replacing the session value
/// is an atomic reset.
pub struct PracticeSession {
    sets: Vec<PassageSet>,
    current: usize,
    score: u32,
    results: Vec<PassageResult>,
    submitted: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl PracticeSession {
    /// Create a session over a freshly generated batch.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the batch has no sets.
    pub fn new(sets: Vec<PassageSet>, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if sets.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            sets,
            current: 0,
            score: 0,
            results: Vec::new(),
            submitted: false,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Cumulative correct count across all submitted passages.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Per-passage results in submission order, one per submitted passage.
    #[must_use]
    pub fn results(&self) -> &[PassageResult] {
        &self.results
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.sets.len()
    }

    /// Total question count across the whole batch.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.sets.iter().map(PassageSet::question_count).sum()
    }

    /// Zero-based index of the passage currently presented.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The passage currently presented, or `None` once the session is
    /// complete.
    #[must_use]
    pub fn current_set(&self) -> Option<&PassageSet> {
        if self.is_complete() {
            None
        } else {
            self.sets.get(self.current)
        }
    }

    /// Grading result for the current passage, present only in the graded
    /// phase.
    #[must_use]
    pub fn current_result(&self) -> Option<&PassageResult> {
        if self.submitted {
            self.results.last()
        } else {
            None
        }
    }

    /// True while the current passage's feedback is visible and navigation
    /// is pending. False exactly when fresh answers are being collected.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_complete() {
            SessionPhase::Complete
        } else if self.submitted {
            SessionPhase::Graded
        } else {
            SessionPhase::Ready
        }
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.sets.len(),
            submitted: self.results.len(),
            remaining: self.sets.len().saturating_sub(self.results.len()),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Grade the learner's answers for the current passage.
    ///
    /// Appends a `PassageResult`, adds to the cumulative score, and moves the
    /// session into the graded phase. Submitting twice without an intervening
    /// `advance` cannot double-score: the second call is rejected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session is finished,
    /// `SessionError::AlreadySubmitted` if the current passage was graded
    /// already, and `SessionError::AnswerCountMismatch` when the answer list
    /// does not match the question list.
    pub fn submit(&mut self, answers: &[AnswerChoice]) -> Result<&PassageResult, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        let set = self.sets.get(self.current).ok_or(SessionError::Completed)?;

        let report = grade(set.questions(), answers)?;
        self.results.push(PassageResult {
            passage_number: self.current + 1,
            score: report.score,
            feedback: report.feedback,
        });
        self.score += report.score;
        self.submitted = true;

        self.results.last().ok_or(SessionError::Completed)
    }

    /// Move past the graded passage.
    ///
    /// From the last passage the session becomes complete (terminal, stamped
    /// with `at`); otherwise the next passage starts collecting answers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session is finished and
    /// `SessionError::NotGraded` if the current passage has not been
    /// submitted.
    pub fn advance(&mut self, at: DateTime<Utc>) -> Result<SessionPhase, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if !self.submitted {
            return Err(SessionError::NotGraded);
        }

        if self.current + 1 >= self.sets.len() {
            self.completed_at = Some(at);
            Ok(SessionPhase::Complete)
        } else {
            self.current += 1;
            self.submitted = false;
            Ok(SessionPhase::Ready)
        }
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("sets_len", &self.sets.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("results_len", &self.results.len())
            .field("submitted", &self.submitted)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
