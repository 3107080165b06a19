use remindme_models::{
    chrono::{DateTime, Utc},
    day_key::{DayKey, TIMEZONE},
    user::{ChatId, UserId},
};
use remindme_storage::{StorageError, UserStorage};

use crate::DailyJob;

/// Registers a user on first contact and returns whether they were new.
///
/// Jobs whose fire time already passed today count as sent for a newcomer, so joining at 21:00
/// does not bring a "6:00 PM" reminder on the next tick. Known users are left untouched.
pub async fn enroll_user(
    users: &dyn UserStorage,
    user_id: UserId,
    chat_id: ChatId,
    now: DateTime<Utc>,
) -> Result<bool, StorageError> {
    if users.get_user(user_id).await?.is_some() {
        return Ok(false);
    }

    users.register_user(user_id, chat_id).await?;

    let day_key = DayKey::at(now);
    let local_time = now.with_timezone(&TIMEZONE).time();
    for job in DailyJob::ALL.into_iter().filter(|job| job.is_due(local_time)) {
        job.mark_sent(users, user_id, &day_key).await?;
    }

    log::info!("Enrolled user {user_id} on {day_key}");
    Ok(true)
}
