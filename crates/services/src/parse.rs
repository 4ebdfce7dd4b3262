use rand::Rng;

use coach_core::model::{AnswerChoice, PassageSet, Question, Skill};

/// What a single raw response parsed into.
///
/// `set` is `None` when the response had no `Questions:` marker, no passage
/// text, or no usable question lines. `skipped_lines` counts non-blank lines
/// dropped along the way; callers decide whether to surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub set: Option<PassageSet>,
    pub skipped_lines: usize,
}

/// Parse one raw model response into a passage set.
///
/// The format is semi-structured text, so tolerance is granular: a malformed
/// line is skipped without failing the set, and a set without a single usable
/// question is dropped without failing the batch. Each surviving question is
/// tagged with a skill drawn uniformly at random from `rng`.
///
/// Expected shape:
///
/// ```text
/// Passage:
/// <text>
///
/// Questions:
/// 1. <text> Answer: <True/False/Not Given>
/// ```
#[must_use]
pub fn parse_passage_response<R: Rng + ?Sized>(raw: &str, rng: &mut R) -> ParseOutcome {
    // No marker, no set. The whole response is discarded silently.
    let Some((head, tail)) = raw.split_once("Questions:") else {
        return ParseOutcome {
            set: None,
            skipped_lines: 0,
        };
    };

    let head = head.trim();
    let passage = head.strip_prefix("Passage:").unwrap_or(head).trim();

    let mut questions = Vec::new();
    let mut skipped_lines = 0;
    for line in tail.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // The answer token may legitimately appear inside the question text,
        // so split on the last occurrence.
        let Some((text, answer)) = line.rsplit_once("Answer:") else {
            skipped_lines += 1;
            continue;
        };
        let Some(answer) = AnswerChoice::from_response(answer) else {
            skipped_lines += 1;
            continue;
        };
        let skill = Skill::ALL[rng.random_range(0..Skill::ALL.len())];
        match Question::new(skill, text.trim(), answer) {
            Ok(question) => questions.push(question),
            Err(_) => skipped_lines += 1,
        }
    }

    ParseOutcome {
        set: PassageSet::new(passage, questions).ok(),
        skipped_lines,
    }
}
