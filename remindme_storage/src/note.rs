use async_trait::async_trait;
use remindme_models::{day_key::DayKey, note::Note, user::UserId};

use crate::StorageError;

#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// Overwrites any earlier note of the same day.
    async fn set_note(&self, user_id: UserId, day_key: &DayKey, text: &str)
    -> Result<(), StorageError>;
    async fn get_note(&self, user_id: UserId, day_key: &DayKey)
    -> Result<Option<Note>, StorageError>;
    async fn delete_note(&self, user_id: UserId, day_key: &DayKey) -> Result<(), StorageError>;
}
