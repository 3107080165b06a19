use std::sync::Arc;

use async_trait::async_trait;
use remindme_models::{day_key::DayKey, task::Task, user::User};
use remindme_scheduler::{DailyDeliveryChannel, DailyJob};
use remindme_storage::{StorageError, TaskStorage};
use teloxide::prelude::*;
use thiserror::Error;

use crate::{checkin, messages, util::Reply};

#[derive(Debug, Error)]
pub enum TelegramDeliveryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Telegram(#[from] teloxide::RequestError),
}

/// Sends the scheduled evening reminder and nightly check-in to a user's chat.
pub struct TelegramDeliveryChannel {
    bot: Bot,
    tasks: Arc<dyn TaskStorage>,
}

impl TelegramDeliveryChannel {
    pub fn new(bot: Bot, tasks: Arc<dyn TaskStorage>) -> Self {
        Self { bot, tasks }
    }

    async fn send(
        &self,
        user: &User,
        job: DailyJob,
        day_key: &DayKey,
    ) -> Result<(), TelegramDeliveryError> {
        let tasks = self.tasks.list_tasks(user.id, day_key).await?;

        daily_message(job, &tasks, day_key)
            .send(&self.bot, ChatId(user.chat_id))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl DailyDeliveryChannel for TelegramDeliveryChannel {
    async fn deliver(&self, user: &User, job: DailyJob, day_key: &DayKey) -> anyhow::Result<()> {
        self.send(user, job, day_key).await?;
        Ok(())
    }
}

fn daily_message(job: DailyJob, tasks: &[Task], day_key: &DayKey) -> Reply {
    match job {
        DailyJob::EveningReminder => Reply::text(messages::evening_reminder(tasks, day_key)),
        DailyJob::NightlyCheckin => checkin::render(tasks, day_key),
    }
}
