use prep_core::model::Question;

use super::SqliteRepository;
use super::mapping::{extra_to_text, map_question_row, position_to_i64, question_id_to_i64};
use crate::repository::{QuestionRepository, StorageError};

fn write_err(e: sqlx::Error) -> StorageError {
    StorageError::Write(e.to_string())
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn load_all(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, category, question, hint, extra
            FROM questions
            ORDER BY position ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(questions)
    }

    async fn save_all(&self, questions: &[Question]) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(write_err)?;

        sqlx::query("DELETE FROM questions")
            .execute(&mut *tx)
            .await
            .map_err(write_err)?;

        for (position, question) in questions.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO questions (id, position, category, question, hint, extra)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(question_id_to_i64(question.id())?)
            .bind(position_to_i64(position)?)
            .bind(question.category().as_str())
            .bind(question.question())
            .bind(question.hint())
            .bind(extra_to_text(question.extra())?)
            .execute(&mut *tx)
            .await
            .map_err(write_err)?;
        }

        tx.commit().await.map_err(write_err)?;
        Ok(())
    }
}
