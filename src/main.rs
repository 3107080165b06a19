mod appsettings;

use std::{sync::Arc, time::Duration};

use remindme_scheduler::DailyJobRunner;
use remindme_storage::{Stores, sqlite};
use remindme_telegram::{TelegramDeliveryChannel, TelegramInteractionInterface, teloxide::Bot};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = appsettings::get()?;

    let pool = sqlite::connect(&settings.database.url).await?;
    let stores = Stores::sqlite(pool);
    let bot = Bot::new(settings.telegram.token.clone());

    let delivery = Arc::new(TelegramDeliveryChannel::new(bot.clone(), stores.tasks.clone()));
    let runner = Arc::new(DailyJobRunner::new(stores.users.clone(), delivery));
    let shutdown = CancellationToken::new();
    let runner_task = runner.spawn(
        Duration::from_secs(settings.scheduler.tick_seconds),
        shutdown.clone(),
    );

    let result = TelegramInteractionInterface::start(bot, stores, &settings.telegram).await;

    shutdown.cancel();
    if let Err(error) = runner_task.await {
        log::error!("Daily job runner ended abnormally: {error}");
    }

    result
}
