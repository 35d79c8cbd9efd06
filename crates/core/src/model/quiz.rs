use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::ids::QuizId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question must not be blank")]
    EmptyQuestion,

    #[error("answer must not be blank")]
    EmptyAnswer,
}

/// Validated question/answer input for a quiz that has no id yet.
///
/// The id is assigned by the store on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    question: String,
    answer: String,
}

impl QuizDraft {
    /// Validate raw form input into a draft.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyQuestion` or `QuizError::EmptyAnswer` when
    /// the respective field is blank after trimming.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() {
            return Err(QuizError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        Ok(Self { question, answer })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Attach the id assigned by the store.
    #[must_use]
    pub fn assign_id(self, id: QuizId, created_at: DateTime<Utc>) -> Quiz {
        Quiz {
            id,
            question: self.question,
            answer: self.answer,
            created_at,
            updated_at: created_at,
        }
    }
}

/// A stored quiz record: one question and its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    id: QuizId,
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Rehydrate a quiz from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the stored question or answer is blank.
    pub fn from_persisted(
        id: QuizId,
        question: String,
        answer: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if question.trim().is_empty() {
            return Err(QuizError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        Ok(Self {
            id,
            question,
            answer,
            created_at,
            updated_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace question and answer, e.g. from an edit form.
    pub fn edit(&mut self, draft: QuizDraft, updated_at: DateTime<Utc>) {
        self.question = draft.question;
        self.answer = draft.answer;
        self.updated_at = updated_at;
    }
}
