use remindme_models::{
    day_key::DayKey,
    task::TaskId,
    user::ChatIdentity,
};
use remindme_storage::{StorageError, Stores};
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::{
    HandlerResult, checkin, messages,
    util::Reply,
};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "how the bot works")]
    Start,
    #[command(description = "show help")]
    Help,
    #[command(description = "add a task for today")]
    Add(String),
    #[command(description = "view today's tasks")]
    Today,
    #[command(description = "delete a task by id")]
    Del(String),
    #[command(description = "delete all tasks for today")]
    Reset,
    #[command(description = "start the final check-in now")]
    Checkin,
    #[command(description = "save a short note about today")]
    Note(String),
}

impl Command {
    /// Parses `text` like [`BotCommands::parse`], except that commands without arguments ignore
    /// trailing words, so `/today please` is still `/today`.
    pub fn parse_lenient(text: &str, bot_name: &str) -> Option<Self> {
        if let Ok(command) = Self::parse(text, bot_name) {
            return Some(command);
        }

        let keyword = text.split_whitespace().next()?;
        Self::parse(keyword, bot_name)
            .ok()
            .filter(|command| !command.takes_arguments())
    }

    fn takes_arguments(&self) -> bool {
        matches!(self, Command::Add(_) | Command::Del(_) | Command::Note(_))
    }
}

pub(crate) async fn handle_command(
    bot: Bot,
    msg: Message,
    command: Command,
    sender: ChatIdentity,
    stores: Stores,
) -> HandlerResult {
    let day_key = DayKey::today();
    let reply = match execute(command, sender, &stores, &day_key).await {
        Ok(reply) => reply,
        Err(error) => {
            log::error!("Command failed for user {}: {error}", sender.user_id);
            Reply::text(messages::FAILURE_NOTICE)
        }
    };

    reply.send(&bot, msg.chat.id).await?;
    Ok(())
}

/// Runs `command` for an already registered sender and builds the reply.
///
/// Malformed input is answered with a usage hint and leaves the store untouched. Only storage
/// failures are returned as errors.
pub(crate) async fn execute(
    command: Command,
    sender: ChatIdentity,
    stores: &Stores,
    day_key: &DayKey,
) -> Result<Reply, StorageError> {
    let user_id = sender.user_id;

    match command {
        Command::Start => Ok(Reply::html(messages::WELCOME_HTML)),
        Command::Help => Ok(Reply::text(messages::HELP_TEXT)),
        Command::Add(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(Reply::text(messages::with_footer("Usage: /add <task>")));
            }

            let id = stores.tasks.add_task(user_id, day_key, text).await?;
            Ok(Reply::text(messages::with_footer(format!(
                "✅ Added task {id} for today ({day_key}): {text}"
            ))))
        }
        Command::Today => {
            let tasks = stores.tasks.list_tasks(user_id, day_key).await?;
            let note = stores.notes.get_note(user_id, day_key).await?;
            Ok(Reply::text(messages::today(&tasks, note.as_ref(), day_key)))
        }
        Command::Del(argument) => {
            let argument = argument.trim();
            if argument.is_empty() {
                return Ok(Reply::text(messages::with_footer(
                    "Usage: /del <task_id> (see /today)",
                )));
            }
            let Ok(task_id) = argument.parse::<TaskId>() else {
                return Ok(Reply::text(messages::with_footer(
                    "Usage: /del <task_id> (must be a number)",
                )));
            };

            if stores.tasks.delete_task(user_id, task_id).await? {
                Ok(Reply::text(messages::with_footer(format!(
                    "🗑️ Deleted task {task_id}."
                ))))
            } else {
                Ok(Reply::text(messages::with_footer(format!(
                    "Task {task_id} is not one of your tasks. Use /today."
                ))))
            }
        }
        Command::Reset => {
            let deleted = stores.tasks.delete_all_tasks(user_id, day_key).await?;
            stores.notes.delete_note(user_id, day_key).await?;
            Ok(Reply::text(messages::with_footer(format!(
                "🔄 Reset complete for {day_key}. Deleted {deleted} task(s)."
            ))))
        }
        Command::Note(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(Reply::text(messages::with_footer(
                    "Usage: /note <your short feedback>",
                )));
            }

            stores.notes.set_note(user_id, day_key, text).await?;
            Ok(Reply::text(messages::with_footer(format!(
                "📝 Saved note for {day_key}."
            ))))
        }
        // Manual check-in never looks at or touches the scheduler markers.
        Command::Checkin => {
            let tasks = stores.tasks.list_tasks(user_id, day_key).await?;
            Ok(checkin::render(&tasks, day_key))
        }
    }
}
