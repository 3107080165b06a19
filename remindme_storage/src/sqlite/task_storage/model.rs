use remindme_models::task::Task;

use crate::{StorageError, sqlite::parse_day_key};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskStorageModel {
    pub id: i64,
    pub user_id: i64,
    pub day_key: String,
    pub text: String,
    pub done: bool,
}

impl TryFrom<TaskStorageModel> for Task {
    type Error = StorageError;

    fn try_from(value: TaskStorageModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            user_id: value.user_id,
            day_key: parse_day_key(value.day_key)?,
            text: value.text,
            done: value.done,
        })
    }
}
