use async_trait::async_trait;
use remindme_models::{day_key::DayKey, note::Note, user::UserId};

use crate::{NoteStorage, StorageError};

#[derive(sqlx::FromRow)]
struct NoteStorageModel {
    text: String,
}

pub struct SqliteNoteStorage {
    pool: sqlx::SqlitePool,
}

impl SqliteNoteStorage {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStorage for SqliteNoteStorage {
    async fn set_note(
        &self,
        user_id: UserId,
        day_key: &DayKey,
        text: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO notes (user_id, day_key, text)
             VALUES (?, ?, ?)
             ON CONFLICT (user_id, day_key) DO UPDATE SET text = excluded.text",
        )
        .bind(user_id)
        .bind(day_key.to_string())
        .bind(text)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_note(
        &self,
        user_id: UserId,
        day_key: &DayKey,
    ) -> Result<Option<Note>, StorageError> {
        let note = sqlx::query_as::<_, NoteStorageModel>(
            "SELECT text FROM notes WHERE user_id = ? AND day_key = ?",
        )
        .bind(user_id)
        .bind(day_key.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(note.map(|note| Note {
            user_id,
            day_key: *day_key,
            text: note.text,
        }))
    }

    async fn delete_note(&self, user_id: UserId, day_key: &DayKey) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM notes WHERE user_id = ? AND day_key = ?")
            .bind(user_id)
            .bind(day_key.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
