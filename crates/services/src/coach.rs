use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use coach_core::model::PracticeSession;
use coach_core::Clock;

use crate::error::CoachError;
use crate::generator::PassageSource;
use crate::parse::parse_passage_response;
use crate::prompt;

/// Generation attempts per batch. Attempts that fail parsing shrink the
/// batch; they are never padded or retried.
pub const PASSAGES_PER_BATCH: usize = 5;

/// Session controller: turns generation requests into fresh practice
/// sessions.
///
/// Owns the RNG used for topic and skill selection so a seed makes a whole
/// batch deterministic. The session value itself is returned to the caller;
/// the controller holds no session state, which keeps regeneration atomic
/// (a failed batch leaves whatever session the caller had untouched).
pub struct CoachService {
    clock: Clock,
    source: Arc<dyn PassageSource>,
    rng: StdRng,
}

impl CoachService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn PassageSource>) -> Self {
        Self {
            clock,
            source,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the topic/skill RNG, making generation deterministic for tests.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Whether passage generation can run at all (e.g. a credential is set).
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.source.is_available()
    }

    /// Generate a fresh batch and return a new session over it.
    ///
    /// Runs exactly `PASSAGES_PER_BATCH` independent attempts, each with a
    /// random topic. Responses that fail parsing shrink the batch silently;
    /// a transport failure aborts the remaining attempts and discards the
    /// partial batch.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Generator` for source failures and
    /// `CoachError::Session` (`Empty`) when no attempt produced a usable set.
    pub async fn regenerate(&mut self) -> Result<PracticeSession, CoachError> {
        let mut sets = Vec::with_capacity(PASSAGES_PER_BATCH);
        for attempt in 1..=PASSAGES_PER_BATCH {
            let topic = prompt::pick_topic(&mut self.rng);
            let raw = self.source.complete(&prompt::build_prompt(topic)).await?;

            let outcome = parse_passage_response(&raw, &mut self.rng);
            if outcome.skipped_lines > 0 {
                debug!(attempt, topic, skipped = outcome.skipped_lines, "skipped malformed question lines");
            }
            match outcome.set {
                Some(set) => sets.push(set),
                None => debug!(attempt, topic, "discarded response without a usable passage"),
            }
        }

        if sets.is_empty() {
            warn!("generation batch produced no usable passages");
        } else {
            info!(passages = sets.len(), "generated passage batch");
        }

        Ok(PracticeSession::new(sets, self.clock.now())?)
    }
}
