use std::io::{self, BufRead, Write};

use coach_core::model::{AnswerChoice, PracticeSession, SessionPhase};
use coach_core::Clock;
use services::CoachService;

use crate::vm;

/// Map a typed selection to an answer choice.
///
/// Accepts the leading letter, the full label, or the option position.
#[must_use]
pub fn parse_choice(raw: &str) -> Option<AnswerChoice> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "1" => Some(AnswerChoice::True),
        "f" | "false" | "2" => Some(AnswerChoice::False),
        "n" | "ng" | "not given" | "3" => Some(AnswerChoice::NotGiven),
        _ => None,
    }
}

/// Interactive console loop around the coach.
///
/// Reads from any `BufRead` and writes to any `Write`, so tests drive it
/// with in-memory buffers while the binary hands it stdin/stdout.
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
    clock: Clock,
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    #[must_use]
    pub fn new(input: R, output: W, clock: Clock) -> Self {
        Self {
            input,
            output,
            clock,
        }
    }

    /// Drive one interactive practice run until the learner quits or input
    /// ends.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` only for terminal read/write failures; generation
    /// and grading problems are reported inline and the loop continues.
    pub async fn run(&mut self, coach: &mut CoachService) -> io::Result<()> {
        writeln!(self.output, "=== Reading Practice Coach ===")?;
        writeln!(
            self.output,
            "Five short passages, three True/False/Not Given questions each."
        )?;
        writeln!(
            self.output,
            "Every passage you finish builds your reading muscle. Let's begin!"
        )?;

        if !coach.is_available() {
            writeln!(
                self.output,
                "Passage generation is unavailable. Set COACH_AI_API_KEY to practice."
            )?;
            return Ok(());
        }

        let mut session: Option<PracticeSession> = None;
        loop {
            match session.as_ref().map(PracticeSession::phase) {
                None => {
                    match self.prompt("Press g to generate 5 passages (q to quit): ")? {
                        Some(cmd) if cmd.eq_ignore_ascii_case("g") => {
                            if let Some(fresh) = self.generate(coach).await? {
                                session = Some(fresh);
                            }
                        }
                        Some(cmd) if cmd.eq_ignore_ascii_case("q") => return Ok(()),
                        Some(_) => {}
                        None => return Ok(()),
                    }
                }
                Some(SessionPhase::Ready) => {
                    let Some(current) = session.as_mut() else {
                        continue;
                    };
                    if !self.present_and_submit(current)? {
                        return Ok(());
                    }
                }
                Some(SessionPhase::Graded) => {
                    match self.prompt("Press n for the next passage (q to quit): ")? {
                        Some(cmd) if cmd.is_empty() || cmd.eq_ignore_ascii_case("n") => {
                            let now = self.clock.now();
                            if let Some(current) = session.as_mut() {
                                if let Err(err) = current.advance(now) {
                                    writeln!(self.output, "Cannot advance: {err}")?;
                                }
                            }
                        }
                        Some(cmd) if cmd.eq_ignore_ascii_case("q") => return Ok(()),
                        Some(_) => {}
                        None => return Ok(()),
                    }
                }
                Some(SessionPhase::Complete) => {
                    if let Some(current) = session.as_ref() {
                        self.print_summary(current)?;
                    }
                    match self.prompt("Press g for a new batch (q to quit): ")? {
                        Some(cmd) if cmd.eq_ignore_ascii_case("g") => {
                            if let Some(fresh) = self.generate(coach).await? {
                                session = Some(fresh);
                            }
                        }
                        Some(cmd) if cmd.eq_ignore_ascii_case("q") => return Ok(()),
                        Some(_) => {}
                        None => return Ok(()),
                    }
                }
            }
        }
    }

    async fn generate(
        &mut self,
        coach: &mut CoachService,
    ) -> io::Result<Option<PracticeSession>> {
        writeln!(self.output, "Generating passages...")?;
        match coach.regenerate().await {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                writeln!(self.output, "Generation failed: {err}")?;
                Ok(None)
            }
        }
    }

    /// Show the current passage, collect one answer per question, and grade.
    ///
    /// Returns false when input ended mid-passage.
    fn present_and_submit(&mut self, session: &mut PracticeSession) -> io::Result<bool> {
        let Some(view) = vm::map_current_passage(session) else {
            return Ok(true);
        };

        writeln!(self.output)?;
        writeln!(self.output, "--- Passage {}/{} ---", view.number, view.total)?;
        writeln!(self.output, "{}", view.passage)?;
        writeln!(self.output)?;
        for question in &view.questions {
            writeln!(
                self.output,
                "Q{} [{}] {}",
                question.number, question.skill, question.text
            )?;
            writeln!(self.output, "    Options: {}", question.options.join(" / "))?;
        }

        let mut answers = Vec::with_capacity(view.questions.len());
        for question in &view.questions {
            loop {
                let Some(raw) =
                    self.prompt(&format!("Your answer for Q{} (t/f/n): ", question.number))?
                else {
                    return Ok(false);
                };
                if let Some(choice) = parse_choice(&raw) {
                    answers.push(choice);
                    break;
                }
                writeln!(self.output, "Please answer t, f, or n.")?;
            }
        }

        match session.submit(&answers) {
            Ok(_) => {
                if let Some(feedback) = vm::map_feedback(session) {
                    writeln!(self.output)?;
                    for line in &feedback.lines {
                        writeln!(self.output, "{line}")?;
                    }
                    writeln!(
                        self.output,
                        "Score for passage {}: {}/{}",
                        feedback.passage_number, feedback.passage_score, feedback.question_count
                    )?;
                    writeln!(self.output, "Total score: {}", feedback.total_score)?;
                }
            }
            Err(err) => writeln!(self.output, "Could not grade passage: {err}")?,
        }
        Ok(true)
    }

    fn print_summary(&mut self, session: &PracticeSession) -> io::Result<()> {
        let summary = vm::map_summary(session, self.clock.now());
        writeln!(self.output)?;
        writeln!(self.output, "=== Practice complete ===")?;
        writeln!(self.output, "Passages completed: {}", summary.passages)?;
        writeln!(
            self.output,
            "Total score: {}/{}",
            summary.total_score, summary.total_questions
        )?;
        writeln!(self.output, "Time spent: {}", summary.elapsed)?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line. `None` means end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use coach_core::time::fixed_clock;
    use services::{GeneratorError, PassageGenerator, PassageSource};

    struct ScriptedSource {
        responses: Mutex<VecDeque<String>>,
    }

    #[async_trait]
    impl PassageSource for ScriptedSource {
        async fn complete(&self, _prompt: &str) -> Result<String, GeneratorError> {
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default())
        }
    }

    const GOOD_RESPONSE: &str = "Passage:\nSolar panels turn light into power.\n\n\
Questions:\n\
1. Panels use light? Answer: True\n\
2. Panels need coal? Answer: False\n\
3. Panels are new? Answer: Not Given";

    fn coach_with_one_passage() -> CoachService {
        let mut responses: VecDeque<String> = VecDeque::new();
        responses.push_back(GOOD_RESPONSE.to_string());
        // Remaining attempts return unusable text, shrinking the batch to 1.
        for _ in 0..4 {
            responses.push_back("nothing parseable".to_string());
        }
        let source = Arc::new(ScriptedSource {
            responses: Mutex::new(responses),
        });
        CoachService::new(fixed_clock(), source).with_seed(5)
    }

    fn run_console(coach: &mut CoachService, script: &str) -> String {
        let mut output = Vec::new();
        let mut presenter =
            ConsolePresenter::new(Cursor::new(script.to_string()), &mut output, fixed_clock());
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(presenter.run(coach))
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_choice_accepts_letters_labels_and_positions() {
        assert_eq!(parse_choice("T"), Some(AnswerChoice::True));
        assert_eq!(parse_choice("false"), Some(AnswerChoice::False));
        assert_eq!(parse_choice("3"), Some(AnswerChoice::NotGiven));
        assert_eq!(parse_choice("not given"), Some(AnswerChoice::NotGiven));
        assert_eq!(parse_choice("maybe"), None);
    }

    #[test]
    fn unavailable_generator_shows_setup_hint_and_exits() {
        let source = Arc::new(PassageGenerator::new(None));
        let mut coach = CoachService::new(fixed_clock(), source);
        let transcript = run_console(&mut coach, "");

        assert!(transcript.contains("Set COACH_AI_API_KEY"));
        assert!(!transcript.contains("Press g"));
    }

    #[test]
    fn full_run_grades_and_summarizes() {
        let mut coach = coach_with_one_passage();
        let transcript = run_console(&mut coach, "g\nt\nf\nn\nn\nq\n");

        assert!(transcript.contains("--- Passage 1/1 ---"));
        assert!(transcript.contains("Solar panels turn light into power."));
        assert!(transcript.contains("Q1 correct"));
        assert!(transcript.contains("Score for passage 1: 3/3"));
        assert!(transcript.contains("Total score: 3"));
        assert!(transcript.contains("=== Practice complete ==="));
        assert!(transcript.contains("Passages completed: 1"));
        assert!(transcript.contains("Total score: 3/3"));
        assert!(transcript.contains("Time spent: 0m 0s"));
    }

    #[test]
    fn invalid_answer_is_reprompted() {
        let mut coach = coach_with_one_passage();
        let transcript = run_console(&mut coach, "g\nx\nt\nf\nn\nq\n");

        assert!(transcript.contains("Please answer t, f, or n."));
        assert!(transcript.contains("Score for passage 1: 3/3"));
    }

    #[test]
    fn failed_generation_is_reported_and_loop_continues() {
        let source = Arc::new(ScriptedSource {
            responses: Mutex::new(VecDeque::from(vec![String::from("junk"); 5])),
        });
        let mut coach = CoachService::new(fixed_clock(), source);
        let transcript = run_console(&mut coach, "g\nq\n");

        assert!(transcript.contains("Generation failed:"));
    }
}
