use crate::day_key::DayKey;

pub type UserId = i64;

/// Telegram chat the bot talks to for a given user.
pub type ChatId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub chat_id: ChatId,
    pub last_reminder_date: Option<DayKey>,
    pub last_checkin_date: Option<DayKey>,
}

/// Who sent an inbound update. Resolved once per update, before any command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatIdentity {
    pub user_id: UserId,
    pub chat_id: ChatId,
}
