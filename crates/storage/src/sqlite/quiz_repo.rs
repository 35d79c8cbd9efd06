use chrono::{DateTime, Utc};
use quiz_core::model::{Quiz, QuizDraft, QuizId};

use super::{SqliteRepository, mapping};
use crate::repository::{QuizRepository, StorageError};

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn list(&self) -> Result<Vec<Quiz>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, created_at, updated_at
            FROM quizzes
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut quizzes = Vec::with_capacity(rows.len());
        for row in rows {
            quizzes.push(mapping::map_quiz_row(&row)?);
        }
        Ok(quizzes)
    }

    async fn get(&self, id: QuizId) -> Result<Quiz, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, question, answer, created_at, updated_at
            FROM quizzes
            WHERE id = ?1
            ",
        )
        .bind(mapping::quiz_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => mapping::map_quiz_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn insert(
        &self,
        draft: &QuizDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Quiz, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO quizzes (question, answer, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(draft.question())
        .bind(draft.answer())
        .bind(created_at)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = mapping::quiz_id_from_i64(result.last_insert_rowid())?;
        Ok(draft.clone().assign_id(id, created_at))
    }

    async fn update(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            UPDATE quizzes
            SET question = ?2, answer = ?3, updated_at = ?4
            WHERE id = ?1
            ",
        )
        .bind(mapping::quiz_id_to_i64(quiz.id())?)
        .bind(quiz.question())
        .bind(quiz.answer())
        .bind(quiz.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: QuizId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = ?1")
            .bind(mapping::quiz_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
