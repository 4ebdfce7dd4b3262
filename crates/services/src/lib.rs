#![forbid(unsafe_code)]

pub mod coach;
pub mod error;
pub mod generator;
pub mod parse;
pub mod prompt;

pub use coach_core::Clock;

pub use coach::{CoachService, PASSAGES_PER_BATCH};
pub use error::{CoachError, GeneratorError};
pub use generator::{GeneratorConfig, PassageGenerator, PassageSource};
pub use parse::{parse_passage_response, ParseOutcome};
