//! Seeds a handful of capital-city quizzes into a sqlite database so the
//! server has something to serve on first boot.
//!
//! Usage: `cargo run -p storage --bin seed` (honors `DATABASE_URL`).

use quiz_core::model::QuizDraft;
use storage::repository::QuizRepository;
use storage::sqlite::SqliteRepository;

const SAMPLE_QUIZZES: &[(&str, &str)] = &[
    ("Capital of Italy", "Rome"),
    ("Capital of France", "Paris"),
    ("Capital of Spain", "Madrid"),
    ("Capital of Portugal", "Lisbon"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quizzes.db?mode=rwc".to_owned());

    let repo = SqliteRepository::connect(&database_url).await?;
    repo.migrate().await?;

    let existing = repo.list().await?;
    if !existing.is_empty() {
        println!(
            "{} quizzes already present in {database_url}, nothing to do",
            existing.len()
        );
        return Ok(());
    }

    let now = chrono::Utc::now();
    for (question, answer) in SAMPLE_QUIZZES {
        let draft = QuizDraft::new(*question, *answer)?;
        let quiz = repo.insert(&draft, now).await?;
        println!("seeded quiz {}: {}", quiz.id(), quiz.question());
    }

    Ok(())
}
