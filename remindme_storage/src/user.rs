use async_trait::async_trait;
use remindme_models::{
    day_key::DayKey,
    user::{ChatId, User, UserId},
};

use crate::StorageError;

#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Inserts the user if absent. An existing row is left untouched.
    async fn register_user(&self, user_id: UserId, chat_id: ChatId) -> Result<(), StorageError>;
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, StorageError>;
    async fn all_users(&self) -> Result<Vec<User>, StorageError>;
    async fn mark_reminder_sent(&self, user_id: UserId, day_key: &DayKey)
    -> Result<(), StorageError>;
    async fn mark_checkin_sent(&self, user_id: UserId, day_key: &DayKey)
    -> Result<(), StorageError>;
}
