mod ids;
mod play;
mod quiz;

pub use ids::QuizId;
pub use play::RandomPlaySession;
pub use quiz::{Quiz, QuizDraft, QuizError};
