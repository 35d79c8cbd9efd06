use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Quiz, QuizDraft, QuizId};
use storage::repository::QuizRepository;

use crate::error::QuizServiceError;

/// CRUD operations over the quiz store.
///
/// `created_at`/`updated_at` stamps come from the injected `Clock` so tests
/// stay deterministic.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { clock, quizzes }
    }

    /// All stored quizzes.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` when the store cannot be read.
    pub async fn list(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        Ok(self.quizzes.list().await?)
    }

    /// Fetch one quiz by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) for an unknown id.
    pub async fn get(&self, id: QuizId) -> Result<Quiz, QuizServiceError> {
        Ok(self.quizzes.get(id).await?)
    }

    /// Validate and store a new quiz; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for blank fields, or `Storage` when
    /// the insert fails.
    pub async fn create(&self, question: &str, answer: &str) -> Result<Quiz, QuizServiceError> {
        let draft = QuizDraft::new(question, answer)?;
        Ok(self.quizzes.insert(&draft, self.clock.now()).await?)
    }

    /// Replace the question/answer of an existing quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for blank fields, or `Storage` when
    /// the id is unknown or the write fails.
    pub async fn update(
        &self,
        id: QuizId,
        question: &str,
        answer: &str,
    ) -> Result<Quiz, QuizServiceError> {
        let draft = QuizDraft::new(question, answer)?;
        let mut quiz = self.quizzes.get(id).await?;
        quiz.edit(draft, self.clock.now());
        self.quizzes.update(&quiz).await?;
        Ok(quiz)
    }

    /// Delete a quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) for an unknown id.
    pub async fn remove(&self, id: QuizId) -> Result<(), QuizServiceError> {
        Ok(self.quizzes.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizError;
    use quiz_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    fn build_service(repo: &InMemoryRepository) -> QuizService {
        QuizService::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let repo = InMemoryRepository::new();
        let service = build_service(&repo);

        let quiz = service.create("Capital of France?", "Paris").await.unwrap();
        assert_eq!(quiz.id(), QuizId::new(1));
        assert_eq!(quiz.created_at(), fixed_now());

        let listed = service.list().await.unwrap();
        assert_eq!(listed, vec![quiz]);
    }

    #[tokio::test]
    async fn create_rejects_blank_fields() {
        let repo = InMemoryRepository::new();
        let service = build_service(&repo);

        let err = service.create("  ", "Paris").await.unwrap_err();
        assert!(matches!(
            err,
            QuizServiceError::Quiz(QuizError::EmptyQuestion)
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_edits_in_place() {
        let repo = InMemoryRepository::new();
        let service = build_service(&repo);

        let quiz = service.create("Capital of France?", "Paris").await.unwrap();
        let edited = service
            .update(quiz.id(), "Capital of Italy?", "Rome")
            .await
            .unwrap();

        assert_eq!(edited.id(), quiz.id());
        assert_eq!(service.get(quiz.id()).await.unwrap().answer(), "Rome");
    }

    #[tokio::test]
    async fn remove_then_get_reports_not_found() {
        let repo = InMemoryRepository::new();
        let service = build_service(&repo);

        let quiz = service.create("Capital of France?", "Paris").await.unwrap();
        service.remove(quiz.id()).await.unwrap();

        let err = service.get(quiz.id()).await.unwrap_err();
        assert!(matches!(
            err,
            QuizServiceError::Storage(StorageError::NotFound)
        ));
    }
}
