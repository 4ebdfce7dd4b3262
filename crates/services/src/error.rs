//! Shared error types for the services crate.

use thiserror::Error;

use coach_core::model::SessionError;

/// Errors emitted by `PassageGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("passage generation is not configured")]
    Disabled,
    #[error("passage generation returned an empty response")]
    EmptyResponse,
    #[error("passage generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `CoachService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoachError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
