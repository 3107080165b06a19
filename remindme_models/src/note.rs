use crate::{day_key::DayKey, user::UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub user_id: UserId,
    pub day_key: DayKey,
    pub text: String,
}
