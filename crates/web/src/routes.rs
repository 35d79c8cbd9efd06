use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Quiz routes: CRUD, sequential play, and the random round.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/quizzes", get(handlers::index).post(handlers::create))
        .route("/quizzes/new", get(handlers::new_form))
        .route("/quizzes/randomplay", get(handlers::random_play))
        .route("/quizzes/randomcheck/:quiz_id", get(handlers::random_check))
        .route("/quizzes/:quiz_id", get(handlers::show).post(handlers::update))
        .route("/quizzes/:quiz_id/edit", get(handlers::edit_form))
        .route("/quizzes/:quiz_id/delete", post(handlers::destroy))
        .route("/quizzes/:quiz_id/play", get(handlers::play))
        .route("/quizzes/:quiz_id/check", get(handlers::check))
        .fallback(handlers::fallback)
        .with_state(state)
}
