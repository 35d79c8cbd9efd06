#![forbid(unsafe_code)]

mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use quiz_core::Clock;
use services::{QuizService, RandomPlayService};
use storage::repository::Storage;
use tera::Tera;
use tower_cookies::CookieManagerLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quizzes.db?mode=rwc".to_owned());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());

    let storage = Storage::sqlite(&database_url).await?;

    let mut templates = Tera::new("templates/**/*.html")?;
    templates.autoescape_on(vec![".html"]);

    let state = state::AppState {
        quizzes: QuizService::new(Clock::default_clock(), storage.quizzes.clone()),
        random_play: RandomPlayService::new(storage.quizzes.clone()),
        sessions: storage.sessions.clone(),
        templates: Arc::new(templates),
    };

    let app = routes::router(state).layer(CookieManagerLayer::new());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("server running on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
