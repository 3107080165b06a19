use async_trait::async_trait;
use remindme_models::{
    day_key::DayKey,
    task::{Task, TaskId},
    user::UserId,
};

use crate::StorageError;

#[async_trait]
pub trait TaskStorage: Send + Sync {
    async fn add_task(
        &self,
        user_id: UserId,
        day_key: &DayKey,
        text: &str,
    ) -> Result<TaskId, StorageError>;

    /// Tasks of one day in insertion order.
    async fn list_tasks(&self, user_id: UserId, day_key: &DayKey)
    -> Result<Vec<Task>, StorageError>;

    /// Returns `false` when the task does not exist or belongs to someone else.
    async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Result<bool, StorageError>;

    /// Returns the number of deleted tasks.
    async fn delete_all_tasks(&self, user_id: UserId, day_key: &DayKey)
    -> Result<u64, StorageError>;

    async fn set_task_done(
        &self,
        user_id: UserId,
        task_id: TaskId,
        done: bool,
    ) -> Result<bool, StorageError>;
}
