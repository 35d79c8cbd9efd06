use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Quiz, QuizDraft, QuizId, RandomPlaySession};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for quiz records.
///
/// The store owns id assignment: a draft goes in, a record with a stable
/// positive id comes out. Failures propagate unchanged and are never retried
/// here.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// All stored quizzes, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing cannot be read.
    async fn list(&self) -> Result<Vec<Quiz>, StorageError>;

    /// Fetch a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get(&self, id: QuizId) -> Result<Quiz, StorageError>;

    /// Store a new quiz and assign its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn insert(
        &self,
        draft: &QuizDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Quiz, StorageError>;

    /// Update an existing quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id is unknown.
    async fn update(&self, quiz: &Quiz) -> Result<(), StorageError>;

    /// Delete a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id is unknown.
    async fn delete(&self, id: QuizId) -> Result<(), StorageError>;
}

/// Per-browser-session persistence for the random play state, keyed by the
/// opaque token carried in the user's cookie.
///
/// One logical request at a time per token is assumed: state is read once
/// and written once per request with no locking, so a double-submit races
/// and the last write wins.
#[async_trait]
pub trait PlaySessionStore: Send + Sync {
    /// Load the state for a token; tokens never seen before are `NotStarted`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn load(&self, token: &str) -> Result<RandomPlaySession, StorageError>;

    /// Persist the state for a token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn save(&self, token: &str, session: &RandomPlaySession) -> Result<(), StorageError>;

    /// Drop any stored state for a token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn clear(&self, token: &str) -> Result<(), StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    quizzes: HashMap<QuizId, Quiz>,
    last_id: u64,
}

/// Simple in-memory quiz repository for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<Quiz>, StorageError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.quizzes.values().cloned().collect())
    }

    async fn get(&self, id: QuizId) -> Result<Quiz, StorageError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.quizzes.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn insert(
        &self,
        draft: &QuizDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Quiz, StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        // Ids count up and are never reused, like sqlite's AUTOINCREMENT.
        guard.last_id += 1;
        let id = QuizId::new(guard.last_id);
        let quiz = draft.clone().assign_id(id, created_at);
        guard.quizzes.insert(id, quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.quizzes.get_mut(&quiz.id()) {
            Some(slot) => {
                *slot = quiz.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete(&self, id: QuizId) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .quizzes
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

/// Process-local session store. State dies with the process, the same
/// trade-off a default in-memory session middleware makes.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, RandomPlaySession>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlaySessionStore for InMemorySessionStore {
    async fn load(&self, token: &str) -> Result<RandomPlaySession, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(token).cloned().unwrap_or_default())
    }

    async fn save(&self, token: &str, session: &RandomPlaySession) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(token.to_owned(), session.clone());
        Ok(())
    }

    async fn clear(&self, token: &str) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(token);
        Ok(())
    }
}

/// Aggregates the quiz repository and session store behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
    pub sessions: Arc<dyn PlaySessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            quizzes: Arc::new(InMemoryRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn build_draft(n: u64) -> QuizDraft {
        QuizDraft::new(format!("Question {n}?"), format!("Answer {n}")).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = InMemoryRepository::new();
        let first = repo.insert(&build_draft(1), fixed_now()).await.unwrap();
        let second = repo.insert(&build_draft(2), fixed_now()).await.unwrap();

        assert_eq!(first.id(), QuizId::new(1));
        assert_eq!(second.id(), QuizId::new(2));
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = InMemoryRepository::new();
        let first = repo.insert(&build_draft(1), fixed_now()).await.unwrap();
        repo.delete(first.id()).await.unwrap();

        let second = repo.insert(&build_draft(2), fixed_now()).await.unwrap();
        assert_eq!(second.id(), QuizId::new(2));
    }

    #[tokio::test]
    async fn get_and_delete_report_not_found() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.get(QuizId::new(99)).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.delete(QuizId::new(99)).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_round_trips() {
        let repo = InMemoryRepository::new();
        let mut quiz = repo.insert(&build_draft(1), fixed_now()).await.unwrap();

        let draft = QuizDraft::new("Edited?", "Edited").unwrap();
        quiz.edit(draft, fixed_now());
        repo.update(&quiz).await.unwrap();

        let fetched = repo.get(quiz.id()).await.unwrap();
        assert_eq!(fetched.question(), "Edited?");
    }

    #[tokio::test]
    async fn session_store_defaults_to_not_started() {
        let store = InMemorySessionStore::new();
        let loaded = store.load("tok").await.unwrap();
        assert_eq!(loaded, RandomPlaySession::NotStarted);
    }

    #[tokio::test]
    async fn session_store_round_trips_and_clears() {
        let store = InMemorySessionStore::new();
        let session = RandomPlaySession::InProgress {
            remaining: vec![QuizId::new(2)],
            score: 1,
        };

        store.save("tok", &session).await.unwrap();
        assert_eq!(store.load("tok").await.unwrap(), session);

        store.clear("tok").await.unwrap();
        assert_eq!(store.load("tok").await.unwrap(), RandomPlaySession::NotStarted);
    }
}
