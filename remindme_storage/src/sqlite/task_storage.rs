mod model;

use async_trait::async_trait;
use model::TaskStorageModel;
use remindme_models::{
    day_key::DayKey,
    task::{Task, TaskId},
    user::UserId,
};

use crate::{StorageError, TaskStorage};

pub struct SqliteTaskStorage {
    pool: sqlx::SqlitePool,
}

impl SqliteTaskStorage {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStorage for SqliteTaskStorage {
    async fn add_task(
        &self,
        user_id: UserId,
        day_key: &DayKey,
        text: &str,
    ) -> Result<TaskId, StorageError> {
        let id = sqlx::query_scalar::<_, TaskId>(
            "INSERT INTO tasks (user_id, day_key, text)
             VALUES (?, ?, ?)
             RETURNING id",
        )
        .bind(user_id)
        .bind(day_key.to_string())
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        log::debug!("User {user_id} added task {id} for {day_key}");
        Ok(id)
    }

    async fn list_tasks(
        &self,
        user_id: UserId,
        day_key: &DayKey,
    ) -> Result<Vec<Task>, StorageError> {
        let tasks = sqlx::query_as::<_, TaskStorageModel>(
            "SELECT id, user_id, day_key, text, done
             FROM tasks
             WHERE user_id = ? AND day_key = ?
             ORDER BY id",
        )
        .bind(user_id)
        .bind(day_key.to_string())
        .fetch_all(&self.pool)
        .await?;

        tasks.into_iter().map(Task::try_from).collect()
    }

    async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Result<bool, StorageError> {
        let deleted = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_all_tasks(
        &self,
        user_id: UserId,
        day_key: &DayKey,
    ) -> Result<u64, StorageError> {
        let deleted = sqlx::query("DELETE FROM tasks WHERE user_id = ? AND day_key = ?")
            .bind(user_id)
            .bind(day_key.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn set_task_done(
        &self,
        user_id: UserId,
        task_id: TaskId,
        done: bool,
    ) -> Result<bool, StorageError> {
        let updated = sqlx::query("UPDATE tasks SET done = ? WHERE id = ? AND user_id = ?")
            .bind(done)
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }
}
