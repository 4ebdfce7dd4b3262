mod grade;
mod passage;
mod question;
mod session;

pub use grade::{grade, GradeError, GradeReport};
pub use passage::{PassageError, PassageSet};
pub use question::{AnswerChoice, ParseAnswerError, Question, QuestionError, Skill};
pub use session::{PassageResult, PracticeSession, SessionError, SessionPhase, SessionProgress};
