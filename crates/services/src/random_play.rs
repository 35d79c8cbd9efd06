use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quiz_core::answer::answers_match;
use quiz_core::model::{Quiz, QuizId, RandomPlaySession};
use storage::repository::{QuizRepository, StorageError};

use crate::error::PlayError;

/// What the caller should render after a "play" step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Ask the drawn quiz, showing the running score.
    Prompt { quiz: Quiz, score: u32 },
    /// The pool is drained, or the store holds no quizzes at all.
    Exhausted { score: u32 },
}

/// What the caller should render after a "check" step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub quiz: Quiz,
    pub score: u32,
    pub correct: bool,
    pub submitted: String,
}

/// Drives a round of "ask a random not-yet-asked quiz, score the answer,
/// stop when the pool runs dry".
///
/// Session state is threaded explicitly: each operation consumes the current
/// `RandomPlaySession` and returns the successor value for the caller to
/// persist, keyed however the surrounding framework scopes users. Nothing is
/// looked up ambiently.
#[derive(Clone)]
pub struct RandomPlayService {
    quizzes: Arc<dyn QuizRepository>,
    rng: Arc<Mutex<StdRng>>,
}

impl RandomPlayService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizRepository>) -> Self {
        Self {
            quizzes,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    /// Use a fixed rng seed so draw sequences are reproducible in tests.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    fn draw_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..len)
    }

    async fn fetch(&self, id: QuizId) -> Result<Quiz, PlayError> {
        match self.quizzes.get(id).await {
            Ok(quiz) => Ok(quiz),
            Err(StorageError::NotFound) => Err(PlayError::NoSuchQuiz(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// The "play" operation: draw the next quiz of the round, starting a
    /// fresh round when none is live.
    ///
    /// A drained pool reports the final score once and leaves a `Finished`
    /// session behind, which the next call treats like a fresh start.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::NoSuchQuiz` if a drawn id has vanished from the
    /// store, or `PlayError::Storage` for store failures. Neither is retried.
    pub async fn next_prompt(
        &self,
        session: RandomPlaySession,
    ) -> Result<(RandomPlaySession, PlayOutcome), PlayError> {
        let (mut remaining, score) = match session {
            RandomPlaySession::InProgress { remaining, score } => {
                if remaining.is_empty() {
                    // Round complete: report the score once, then forget it.
                    return Ok((
                        RandomPlaySession::Finished,
                        PlayOutcome::Exhausted { score },
                    ));
                }
                (remaining, score)
            }
            RandomPlaySession::NotStarted | RandomPlaySession::Finished => {
                let pool: Vec<QuizId> =
                    self.quizzes.list().await?.iter().map(Quiz::id).collect();
                if pool.is_empty() {
                    return Ok((
                        RandomPlaySession::Finished,
                        PlayOutcome::Exhausted { score: 0 },
                    ));
                }
                (pool, 0)
            }
        };

        // Pop-random draw: a drawn id leaves the pool and never returns, so
        // no quiz repeats within a round. Survivor order is immaterial.
        let index = self.draw_index(remaining.len());
        let id = remaining.swap_remove(index);
        let quiz = self.fetch(id).await?;

        Ok((
            RandomPlaySession::InProgress { remaining, score },
            PlayOutcome::Prompt { quiz, score },
        ))
    }

    /// The "check" operation for the random round. The checked quiz id is
    /// supplied by the caller, naming the quiz that was asked; it is never
    /// re-derived here.
    ///
    /// A correct answer extends the round; a wrong one ends it on the spot,
    /// though the verdict still shows the score as it stood. The remaining
    /// pool is never touched here, only `next_prompt` advances it.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::NoSuchQuiz` for an unknown quiz id, or
    /// `PlayError::Storage` for store failures.
    pub async fn check_answer(
        &self,
        session: RandomPlaySession,
        quiz_id: QuizId,
        submitted: &str,
    ) -> Result<(RandomPlaySession, CheckOutcome), PlayError> {
        let quiz = self.fetch(quiz_id).await?;
        let correct = answers_match(submitted, quiz.answer());

        let (next, score) = match session {
            RandomPlaySession::InProgress { remaining, score } => {
                if correct {
                    let score = score + 1;
                    (RandomPlaySession::InProgress { remaining, score }, score)
                } else {
                    (RandomPlaySession::NotStarted, score)
                }
            }
            // No round is live: the answer is still judged, but nothing
            // starts or advances outside of next_prompt.
            other => {
                let score = if correct { other.score() + 1 } else { 0 };
                (other, score)
            }
        };

        Ok((
            next,
            CheckOutcome {
                quiz,
                score,
                correct,
                submitted: submitted.to_owned(),
            },
        ))
    }
}
