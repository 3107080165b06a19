mod checkin;
mod commands;
mod delivery;
mod messages;
mod util;

#[cfg(test)]
mod tests;

pub use commands::Command;
pub use delivery::{TelegramDeliveryChannel, TelegramDeliveryError};
pub use teloxide;

use std::net::SocketAddr;

use anyhow::Context;
use remindme_models::{
    chrono::Utc,
    settings::{RunMode, TelegramSettings, WebhookSettings},
    user::{ChatIdentity, UserId},
};
use remindme_scheduler::enroll_user;
use remindme_storage::Stores;
use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::Me,
    update_listeners::webhooks,
    utils::command::BotCommands,
};

use util::Reply;

type HandlerResult = anyhow::Result<()>;

pub struct TelegramInteractionInterface;

impl TelegramInteractionInterface {
    pub async fn start(bot: Bot, stores: Stores, settings: &TelegramSettings) -> anyhow::Result<()> {
        log::info!("Starting Telegram UI in {:?} mode.", settings.run_mode);

        if let Err(error) = bot.set_my_commands(Command::bot_commands()).await {
            log::warn!("Could not publish the command list: {error}");
        }

        let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
            .dependencies(dptree::deps![stores])
            .enable_ctrlc_handler()
            .build();

        match settings.run_mode {
            RunMode::Polling => dispatcher.dispatch().await,
            RunMode::Webhook => {
                let options = webhook_options(&settings.webhook)?;
                log::info!("Listening for webhook calls on {}", options.address);

                let listener = webhooks::axum(bot, options)
                    .await
                    .context("could not set up the webhook")?;

                dispatcher
                    .dispatch_with_listener(
                        listener,
                        LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
                    )
                    .await
            }
        }

        Ok(())
    }
}

fn schema() -> UpdateHandler<anyhow::Error> {
    let text_message_handler = dptree::filter(|msg: Message| msg.text().is_some())
        .filter_map_async(ensure_registered)
        .branch(
            dptree::filter_map(|msg: Message, me: Me| {
                msg.text()
                    .and_then(|text| Command::parse_lenient(text, me.username()))
            })
            .endpoint(commands::handle_command),
        )
        .branch(dptree::filter(is_command_like).endpoint(unknown_command))
        .branch(dptree::endpoint(plain_text));

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(text_message_handler)
                .branch(
                    dptree::filter(|msg: Message| msg.text().is_none())
                        .endpoint(unsupported_content),
                ),
        )
        .branch(Update::filter_callback_query().endpoint(checkin::handle_callback))
}

fn sender_identity(msg: &Message) -> Option<ChatIdentity> {
    msg.from.as_ref().map(|user| ChatIdentity {
        user_id: user.id.0 as UserId,
        chat_id: msg.chat.id.0,
    })
}

/// Registers the sender of every text message before any handler sees it.
async fn ensure_registered(bot: Bot, msg: Message, stores: Stores) -> Option<ChatIdentity> {
    let sender = sender_identity(&msg)?;

    match enroll_user(
        stores.users.as_ref(),
        sender.user_id,
        sender.chat_id,
        Utc::now(),
    )
    .await
    {
        Ok(_) => Some(sender),
        Err(error) => {
            log::error!("Could not register user {}: {error}", sender.user_id);
            if let Err(error) = Reply::text(messages::FAILURE_NOTICE)
                .send(&bot, msg.chat.id)
                .await
            {
                log::warn!("Could not report the failure to chat {}: {error}", msg.chat.id);
            }
            None
        }
    }
}

fn is_command_like(msg: Message) -> bool {
    msg.text().is_some_and(|text| text.starts_with('/'))
}

async fn unknown_command(bot: Bot, msg: Message) -> HandlerResult {
    Reply::text(messages::UNKNOWN_COMMAND)
        .send(&bot, msg.chat.id)
        .await?;
    Ok(())
}

async fn plain_text(bot: Bot, msg: Message) -> HandlerResult {
    Reply::html(messages::WELCOME_HTML)
        .send(&bot, msg.chat.id)
        .await?;
    Ok(())
}

async fn unsupported_content(bot: Bot, msg: Message) -> HandlerResult {
    Reply::text(messages::TEXT_ONLY_NOTICE)
        .send(&bot, msg.chat.id)
        .await?;
    Ok(())
}

fn webhook_url(settings: &WebhookSettings) -> anyhow::Result<url::Url> {
    let base_url = settings
        .base_url
        .as_deref()
        .context("webhook mode needs telegram.webhook.base_url")?;
    let url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        settings.path.trim_matches('/')
    );

    url.parse::<url::Url>()
        .with_context(|| format!("invalid webhook url {url}"))
}

fn webhook_options(settings: &WebhookSettings) -> anyhow::Result<webhooks::Options> {
    let address = SocketAddr::from(([0, 0, 0, 0], settings.port));
    Ok(webhooks::Options::new(address, webhook_url(settings)?))
}
