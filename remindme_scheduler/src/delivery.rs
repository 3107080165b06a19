use async_trait::async_trait;
use remindme_models::{day_key::DayKey, user::User};

use crate::DailyJob;

/// Pushes the message of a daily job to one user.
#[async_trait]
pub trait DailyDeliveryChannel: Send + Sync + 'static {
    async fn deliver(&self, user: &User, job: DailyJob, day_key: &DayKey) -> anyhow::Result<()>;
}
