#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_service;
pub mod random_play;

pub use quiz_core::Clock;

pub use error::{PlayError, QuizServiceError};
pub use quiz_service::QuizService;
pub use random_play::{CheckOutcome, PlayOutcome, RandomPlayService};
