use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur when building a question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,
}

/// Error type for parsing an answer choice from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("not a recognized answer choice: {raw}")]
pub struct ParseAnswerError {
    raw: String,
}

//
// ─── SKILL ────────────────────────────────────────────────────────────────────
//

/// Reading comprehension skill exercised by a question.
///
/// The tag is assigned uniformly at random when a question is generated; it is
/// never derived from the question content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Skill {
    Skimming,
    Scanning,
    MainIdea,
    Detail,
    Inference,
    WritersView,
    Vocabulary,
    ParagraphMatching,
    TimeManagement,
}

impl Skill {
    /// Every skill tag, in a fixed order.
    pub const ALL: [Skill; 9] = [
        Skill::Skimming,
        Skill::Scanning,
        Skill::MainIdea,
        Skill::Detail,
        Skill::Inference,
        Skill::WritersView,
        Skill::Vocabulary,
        Skill::ParagraphMatching,
        Skill::TimeManagement,
    ];

    /// Human-readable label shown next to a question.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Skill::Skimming => "Skimming",
            Skill::Scanning => "Scanning",
            Skill::MainIdea => "Main Idea",
            Skill::Detail => "Detail",
            Skill::Inference => "Inference",
            Skill::WritersView => "Writer's View",
            Skill::Vocabulary => "Vocabulary",
            Skill::ParagraphMatching => "Paragraph Matching",
            Skill::TimeManagement => "Time Management",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

//
// ─── ANSWER CHOICE ────────────────────────────────────────────────────────────
//

/// The fixed option set for every question: True / False / Not Given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerChoice {
    True,
    False,
    NotGiven,
}

impl AnswerChoice {
    /// Every option, in presentation order.
    pub const ALL: [AnswerChoice; 3] = [
        AnswerChoice::True,
        AnswerChoice::False,
        AnswerChoice::NotGiven,
    ];

    /// Label shown to the learner and compared against in feedback.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnswerChoice::True => "True",
            AnswerChoice::False => "False",
            AnswerChoice::NotGiven => "Not Given",
        }
    }

    /// Lenient parse for model output: trims whitespace, drops one trailing
    /// period, matches case-insensitively.
    #[must_use]
    pub fn from_response(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().trim_end_matches('.').trim();
        match cleaned.to_ascii_lowercase().as_str() {
            "true" => Some(AnswerChoice::True),
            "false" => Some(AnswerChoice::False),
            "not given" => Some(AnswerChoice::NotGiven),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AnswerChoice {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnswerChoice::from_response(s).ok_or_else(|| ParseAnswerError { raw: s.to_string() })
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single True/False/Not Given comprehension question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    skill: Skill,
    text: String,
    answer: AnswerChoice,
}

impl Question {
    /// Create a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the trimmed text is empty.
    pub fn new(
        skill: Skill,
        text: impl Into<String>,
        answer: AnswerChoice,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        Ok(Self {
            skill,
            text,
            answer,
        })
    }

    #[must_use]
    pub fn skill(&self) -> Skill {
        self.skill
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answer(&self) -> AnswerChoice {
        self.answer
    }

    /// The option set every question offers.
    #[must_use]
    pub fn options() -> &'static [AnswerChoice] {
        &AnswerChoice::ALL
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
