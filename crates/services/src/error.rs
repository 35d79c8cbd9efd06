//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuizError, QuizId};
use storage::repository::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RandomPlayService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayError {
    /// A quiz id that was supposed to exist is gone from the store. Fatal
    /// for the request; never retried or skipped.
    #[error("there is no quiz with id {0}")]
    NoSuchQuiz(QuizId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
