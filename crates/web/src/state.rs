use std::sync::Arc;

use services::{QuizService, RandomPlayService};
use storage::repository::PlaySessionStore;
use tera::Tera;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub quizzes: QuizService,
    pub random_play: RandomPlayService,
    pub sessions: Arc<dyn PlaySessionStore>,
    pub templates: Arc<Tera>,
}
