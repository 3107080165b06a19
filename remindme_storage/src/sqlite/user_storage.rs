mod model;

use async_trait::async_trait;
use model::UserStorageModel;
use remindme_models::{
    day_key::DayKey,
    user::{ChatId, User, UserId},
};

use crate::{StorageError, UserStorage};

pub struct SqliteUserStorage {
    pool: sqlx::SqlitePool,
}

impl SqliteUserStorage {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStorage for SqliteUserStorage {
    async fn register_user(&self, user_id: UserId, chat_id: ChatId) -> Result<(), StorageError> {
        let inserted = sqlx::query(
            "INSERT INTO users (user_id, chat_id)
             VALUES (?, ?)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(chat_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            log::info!("Registered user {user_id} in chat {chat_id}");
        }

        Ok(())
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, UserStorageModel>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        user.map(User::try_from).transpose()
    }

    async fn all_users(&self) -> Result<Vec<User>, StorageError> {
        let users = sqlx::query_as::<_, UserStorageModel>("SELECT * FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        users.into_iter().map(User::try_from).collect()
    }

    async fn mark_reminder_sent(
        &self,
        user_id: UserId,
        day_key: &DayKey,
    ) -> Result<(), StorageError> {
        sqlx::query("UPDATE users SET last_reminder_date = ? WHERE user_id = ?")
            .bind(day_key.to_string())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_checkin_sent(
        &self,
        user_id: UserId,
        day_key: &DayKey,
    ) -> Result<(), StorageError> {
        sqlx::query("UPDATE users SET last_checkin_date = ? WHERE user_id = ?")
            .bind(day_key.to_string())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
