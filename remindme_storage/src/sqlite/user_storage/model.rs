use remindme_models::user::User;

use crate::{StorageError, sqlite::parse_day_key};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserStorageModel {
    pub user_id: i64,
    pub chat_id: i64,
    pub last_reminder_date: Option<String>,
    pub last_checkin_date: Option<String>,
}

impl TryFrom<UserStorageModel> for User {
    type Error = StorageError;

    fn try_from(value: UserStorageModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.user_id,
            chat_id: value.chat_id,
            last_reminder_date: value.last_reminder_date.map(parse_day_key).transpose()?,
            last_checkin_date: value.last_checkin_date.map(parse_day_key).transpose()?,
        })
    }
}
