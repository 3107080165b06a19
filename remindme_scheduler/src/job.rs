use std::fmt;

use remindme_models::{
    chrono::NaiveTime,
    day_key::DayKey,
    user::{User, UserId},
};
use remindme_storage::{StorageError, UserStorage};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DailyJob {
    EveningReminder,
    NightlyCheckin,
}

impl DailyJob {
    pub const ALL: [DailyJob; 2] = [DailyJob::EveningReminder, DailyJob::NightlyCheckin];

    /// Local time in the bot timezone at which the job fires.
    pub fn fire_at(&self) -> NaiveTime {
        match self {
            DailyJob::EveningReminder => NaiveTime::from_hms_opt(18, 0, 0),
            DailyJob::NightlyCheckin => NaiveTime::from_hms_opt(23, 50, 0),
        }
        .expect("Fire times are valid wall clock times.")
    }

    pub fn is_due(&self, local_time: NaiveTime) -> bool {
        local_time >= self.fire_at()
    }

    pub fn already_sent(&self, user: &User, day_key: &DayKey) -> bool {
        let marker = match self {
            DailyJob::EveningReminder => user.last_reminder_date,
            DailyJob::NightlyCheckin => user.last_checkin_date,
        };

        marker.as_ref() == Some(day_key)
    }

    /// Records that `user_id` had this job on `day_key`.
    pub async fn mark_sent(
        &self,
        users: &dyn UserStorage,
        user_id: UserId,
        day_key: &DayKey,
    ) -> Result<(), StorageError> {
        match self {
            DailyJob::EveningReminder => users.mark_reminder_sent(user_id, day_key).await,
            DailyJob::NightlyCheckin => users.mark_checkin_sent(user_id, day_key).await,
        }
    }
}

impl fmt::Display for DailyJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyJob::EveningReminder => write!(f, "evening reminder"),
            DailyJob::NightlyCheckin => write!(f, "nightly check-in"),
        }
    }
}
