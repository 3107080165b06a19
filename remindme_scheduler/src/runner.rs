use std::{sync::Arc, time::Duration};

use remindme_models::{
    chrono::{DateTime, Utc},
    day_key::{DayKey, TIMEZONE},
};
use remindme_storage::{StorageError, UserStorage};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{DailyDeliveryChannel, DailyJob};

/// Re-evaluates both daily jobs for every registered user on each tick of a coarse clock.
///
/// The per-user markers make repeated ticks harmless: once a user got today's message for a
/// job, later ticks of the same day skip them.
pub struct DailyJobRunner {
    users: Arc<dyn UserStorage>,
    delivery: Arc<dyn DailyDeliveryChannel>,
    clock: Clock,
}

/// Source of the current instant for each tick.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

impl DailyJobRunner {
    pub fn new(users: Arc<dyn UserStorage>, delivery: Arc<dyn DailyDeliveryChannel>) -> Self {
        Self {
            users,
            delivery,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(self, clock: Clock) -> Self {
        Self { clock, ..self }
    }

    pub fn spawn(self: Arc<Self>, tick: Duration, shutdown: CancellationToken) -> JoinHandle<()> {
        log::info!("Starting daily job runner, ticking every {tick:?}");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        log::info!("Daily job runner shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(error) = self.run_due_jobs((self.clock)()).await {
                            log::error!("Daily job tick failed: {error}");
                        }
                    }
                }
            }
        })
    }

    /// Runs every job whose fire time has passed at `now` in the bot timezone.
    pub async fn run_due_jobs(&self, now: DateTime<Utc>) -> Result<(), StorageError> {
        let local_time = now.with_timezone(&TIMEZONE).time();
        let day_key = DayKey::at(now);

        for job in DailyJob::ALL {
            if job.is_due(local_time) {
                self.run_job(job, &day_key).await?;
            }
        }

        Ok(())
    }

    /// Delivers `job` to every user that has not had it on `day_key`. Returns how many users
    /// were handled.
    pub async fn run_job(&self, job: DailyJob, day_key: &DayKey) -> Result<usize, StorageError> {
        let users = self.users.all_users().await?;
        let mut handled = 0;

        for user in users.iter().filter(|user| !job.already_sent(user, day_key)) {
            if let Err(error) = self.delivery.deliver(user, job, day_key).await {
                log::warn!(
                    "Could not deliver {job} to user {} for {day_key}: {error:#}",
                    user.id
                );
            }

            // Marked even when delivery failed: automatic messages are never retried.
            if let Err(error) = job.mark_sent(self.users.as_ref(), user.id, day_key).await {
                log::error!("Could not record {job} for user {}: {error}", user.id);
                continue;
            }

            handled += 1;
        }

        if handled > 0 {
            log::info!("Ran {job} for {handled} user(s) on {day_key}");
        }

        Ok(handled)
    }
}
