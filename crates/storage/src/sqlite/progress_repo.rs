use prep_core::model::ProgressMap;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{ProgressRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn write_err(e: sqlx::Error) -> StorageError {
    StorageError::Write(e.to_string())
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_all(&self) -> Result<ProgressMap, StorageError> {
        let rows = sqlx::query("SELECT question_key, answered FROM progress")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut progress = ProgressMap::new();
        for row in rows {
            let key: String = row.try_get("question_key").map_err(ser)?;
            let answered: i64 = row.try_get("answered").map_err(ser)?;
            progress.insert_raw(key, answered != 0);
        }
        Ok(progress)
    }

    async fn save_all(&self, progress: &ProgressMap) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(write_err)?;

        sqlx::query("DELETE FROM progress")
            .execute(&mut *tx)
            .await
            .map_err(write_err)?;

        for (key, answered) in progress.iter() {
            sqlx::query("INSERT INTO progress (question_key, answered) VALUES (?1, ?2)")
                .bind(key)
                .bind(i64::from(answered))
                .execute(&mut *tx)
                .await
                .map_err(write_err)?;
        }

        tx.commit().await.map_err(write_err)?;
        Ok(())
    }
}
