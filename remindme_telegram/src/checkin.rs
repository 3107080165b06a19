use remindme_models::{
    day_key::DayKey,
    task::{Progress, Task, TaskId},
    user::UserId,
};
use remindme_storage::{StorageError, Stores};
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use crate::{
    HandlerResult, messages,
    util::{Reply, has_no_buttons, try_get_message_from_query},
};

const BUTTON_TEXT_LIMIT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CheckinAction {
    Toggle(TaskId),
    Finalize,
    Summary,
}

impl CheckinAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "finalize" => Some(Self::Finalize),
            "summary" => Some(Self::Summary),
            _ => data
                .strip_prefix("t:")
                .and_then(|id| id.parse().ok())
                .map(Self::Toggle),
        }
    }

    pub fn callback_data(&self) -> String {
        match self {
            Self::Toggle(id) => format!("t:{id}"),
            Self::Finalize => "finalize".to_string(),
            Self::Summary => "summary".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CheckinOutcome {
    /// The same message, re-rendered from the store.
    Rerender(Reply),
    NotAllowed,
    Summary(Progress),
    Finalized(String),
}

/// The check-in message for `tasks`. Without tasks there is nothing to toggle, so no keyboard.
pub(crate) fn render(tasks: &[Task], day_key: &DayKey) -> Reply {
    if tasks.is_empty() {
        return Reply::text(format!(
            "🌙 11:50 PM Check-in ({day_key})\nNo tasks were set today."
        ));
    }

    Reply::with_keyboard(checkin_text(tasks, day_key), keyboard(tasks))
}

fn checkin_text(tasks: &[Task], day_key: &DayKey) -> String {
    let progress = Progress::of(tasks);
    format!(
        "🌙 Final Check-in ({day_key})\n✅ Done: {}/{}\n\nTap buttons to toggle Done/Not done, then press Finalize.",
        progress.done, progress.total
    )
}

fn keyboard(tasks: &[Task]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = tasks
        .iter()
        .map(|task| {
            let prefix = if task.done { "✅" } else { "⬜" };
            vec![InlineKeyboardButton::callback(
                format!("{prefix} {}", clamp(&task.text, BUTTON_TEXT_LIMIT)),
                CheckinAction::Toggle(task.id).callback_data(),
            )]
        })
        .collect();

    rows.push(vec![
        InlineKeyboardButton::callback("📌 Finalize", CheckinAction::Finalize.callback_data()),
        InlineKeyboardButton::callback("📋 Summary", CheckinAction::Summary.callback_data()),
    ]);

    InlineKeyboardMarkup::new(rows)
}

fn clamp(text: &str, limit: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut clamped: String = text.chars().take(limit - 1).collect();
    clamped.push('…');
    clamped
}

pub(crate) async fn apply(
    action: CheckinAction,
    user_id: UserId,
    stores: &Stores,
    day_key: &DayKey,
) -> Result<CheckinOutcome, StorageError> {
    match action {
        CheckinAction::Toggle(task_id) => toggle(task_id, user_id, stores, day_key).await,
        CheckinAction::Summary => {
            let tasks = stores.tasks.list_tasks(user_id, day_key).await?;
            Ok(CheckinOutcome::Summary(Progress::of(&tasks)))
        }
        CheckinAction::Finalize => {
            let tasks = stores.tasks.list_tasks(user_id, day_key).await?;
            let note = stores.notes.get_note(user_id, day_key).await?;
            Ok(CheckinOutcome::Finalized(messages::final_result(
                Progress::of(&tasks),
                note.as_ref(),
                day_key,
            )))
        }
    }
}

/// Reads the task from the store, flips it, and renders whatever the store holds afterwards.
async fn toggle(
    task_id: TaskId,
    user_id: UserId,
    stores: &Stores,
    day_key: &DayKey,
) -> Result<CheckinOutcome, StorageError> {
    let tasks = stores.tasks.list_tasks(user_id, day_key).await?;
    let Some(task) = tasks.iter().find(|task| task.id == task_id) else {
        return Ok(CheckinOutcome::NotAllowed);
    };

    if !stores
        .tasks
        .set_task_done(user_id, task_id, !task.done)
        .await?
    {
        return Ok(CheckinOutcome::NotAllowed);
    }

    let tasks = stores.tasks.list_tasks(user_id, day_key).await?;
    Ok(CheckinOutcome::Rerender(render(&tasks, day_key)))
}

pub(crate) async fn handle_callback(bot: Bot, query: CallbackQuery, stores: Stores) -> HandlerResult {
    let Some(message) = try_get_message_from_query(&query) else {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    let action = query.data.as_deref().and_then(CheckinAction::parse);
    let Some(action) = action.filter(|_| !has_no_buttons(message)) else {
        log::debug!("Ignoring button press on a closed check-in message");
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    let user_id = query.from.id.0 as UserId;
    let day_key = DayKey::today();

    match apply(action, user_id, &stores, &day_key).await {
        Ok(CheckinOutcome::Rerender(reply)) => {
            bot.answer_callback_query(query.id.clone()).await?;
            let mut edit = bot.edit_message_text(message.chat.id, message.id, reply.text);
            if let Some(keyboard) = reply.keyboard {
                edit = edit.reply_markup(keyboard);
            }
            edit.await?;
        }
        Ok(CheckinOutcome::NotAllowed) => {
            bot.answer_callback_query(query.id.clone())
                .text("Not allowed.")
                .show_alert(true)
                .await?;
        }
        Ok(CheckinOutcome::Summary(progress)) => {
            bot.answer_callback_query(query.id.clone())
                .text(format!("Done: {}/{}", progress.done, progress.total))
                .await?;
        }
        Ok(CheckinOutcome::Finalized(text)) => {
            bot.answer_callback_query(query.id.clone()).await?;
            bot.edit_message_text(message.chat.id, message.id, text)
                .reply_markup(InlineKeyboardMarkup::default())
                .await?;
            log::info!("User {user_id} finalized check-in for {day_key}");
        }
        Err(error) => {
            log::error!("Check-in action {action:?} failed for user {user_id}: {error}");
            bot.answer_callback_query(query.id.clone())
                .text(messages::FAILURE_NOTICE)
                .show_alert(true)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::{Pool, Sqlite};
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;
    use crate::tests::test_utils::*;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("unexpected button kind {other:?}"),
        }
    }

    fn task(id: TaskId, text: &str, done: bool) -> Task {
        Task {
            id,
            user_id: USER,
            day_key: day(),
            text: text.to_string(),
            done,
        }
    }

    #[test]
    fn actions_parse_from_callback_data() {
        assert_eq!(CheckinAction::parse("t:12"), Some(CheckinAction::Toggle(12)));
        assert_eq!(CheckinAction::parse("finalize"), Some(CheckinAction::Finalize));
        assert_eq!(CheckinAction::parse("summary"), Some(CheckinAction::Summary));
        assert_eq!(CheckinAction::parse("t:abc"), None);
        assert_eq!(CheckinAction::parse("t:"), None);
        assert_eq!(CheckinAction::parse("confirm"), None);
    }

    #[test]
    fn callback_data_parses_back() {
        for action in [
            CheckinAction::Toggle(3),
            CheckinAction::Finalize,
            CheckinAction::Summary,
        ] {
            assert_eq!(CheckinAction::parse(&action.callback_data()), Some(action));
        }
    }

    #[test]
    fn render_pairs_every_task_with_a_toggle_and_adds_controls() {
        let reply = render(&[task(1, "Gym", true), task(2, "Read", false)], &day());
        let keyboard = reply.keyboard.expect("check-in with tasks has a keyboard");
        let rows = &keyboard.inline_keyboard;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0].text, "✅ Gym");
        assert_eq!(callback_data(&rows[0][0]), "t:1");
        assert_eq!(rows[1][0].text, "⬜ Read");
        assert_eq!(callback_data(&rows[1][0]), "t:2");
        assert_eq!(callback_data(&rows[2][0]), "finalize");
        assert_eq!(callback_data(&rows[2][1]), "summary");
        assert!(reply.text.contains("✅ Done: 1/2"));
    }

    #[test]
    fn render_without_tasks_has_no_keyboard() {
        let reply = render(&[], &day());

        assert_eq!(reply.keyboard, None);
        assert!(reply.text.contains("No tasks were set today."));
    }

    #[test]
    fn long_task_text_is_clamped_on_the_button() {
        let text = "x".repeat(40);
        let reply = render(&[task(1, &text, false)], &day());
        let button = &reply.keyboard.unwrap().inline_keyboard[0][0];

        assert_eq!(button.text, format!("⬜ {}…", "x".repeat(31)));
    }

    #[test]
    fn clamp_counts_characters_not_bytes() {
        assert_eq!(clamp("  ঢাকা  ", 4), "ঢাকা");
        assert_eq!(clamp("ঢাকা শহর", 4), "ঢাক…");
    }

    #[sqlx::test(migrations = "../remindme_storage/migrations")]
    async fn toggle_flips_done_in_the_store_and_rerenders(pool: Pool<Sqlite>) {
        let stores = registered_stores(pool).await;
        let id = stores.tasks.add_task(USER, &day(), "Gym").await.unwrap();

        let outcome = apply(CheckinAction::Toggle(id), USER, &stores, &day())
            .await
            .unwrap();

        let CheckinOutcome::Rerender(reply) = outcome else {
            panic!("expected a re-render, got {outcome:?}");
        };
        assert!(reply.text.contains("✅ Done: 1/1"));
        assert_eq!(reply.keyboard.unwrap().inline_keyboard[0][0].text, "✅ Gym");
        assert!(stores.tasks.list_tasks(USER, &day()).await.unwrap()[0].done);

        apply(CheckinAction::Toggle(id), USER, &stores, &day())
            .await
            .unwrap();
        assert!(!stores.tasks.list_tasks(USER, &day()).await.unwrap()[0].done);
    }

    #[sqlx::test(migrations = "../remindme_storage/migrations")]
    async fn toggle_of_someone_elses_task_is_not_allowed(pool: Pool<Sqlite>) {
        let stores = registered_stores(pool).await;
        stores.users.register_user(OTHER_USER, 99).await.unwrap();
        let id = stores.tasks.add_task(OTHER_USER, &day(), "Secret").await.unwrap();

        let outcome = apply(CheckinAction::Toggle(id), USER, &stores, &day())
            .await
            .unwrap();

        assert_eq!(outcome, CheckinOutcome::NotAllowed);
        assert!(!stores.tasks.list_tasks(OTHER_USER, &day()).await.unwrap()[0].done);
    }

    #[sqlx::test(migrations = "../remindme_storage/migrations")]
    async fn toggle_of_yesterdays_task_is_not_allowed(pool: Pool<Sqlite>) {
        let stores = registered_stores(pool).await;
        let yesterday = DayKey::parse("2025-05-31").unwrap();
        let id = stores.tasks.add_task(USER, &yesterday, "Old").await.unwrap();

        let outcome = apply(CheckinAction::Toggle(id), USER, &stores, &day())
            .await
            .unwrap();

        assert_eq!(outcome, CheckinOutcome::NotAllowed);
    }

    #[sqlx::test(migrations = "../remindme_storage/migrations")]
    async fn summary_counts_without_changing_anything(pool: Pool<Sqlite>) {
        let stores = registered_stores(pool).await;
        let id = stores.tasks.add_task(USER, &day(), "Gym").await.unwrap();
        stores.tasks.add_task(USER, &day(), "Read").await.unwrap();
        stores.tasks.set_task_done(USER, id, true).await.unwrap();

        let outcome = apply(CheckinAction::Summary, USER, &stores, &day())
            .await
            .unwrap();

        assert_eq!(outcome, CheckinOutcome::Summary(Progress { done: 1, total: 2 }));
    }

    #[sqlx::test(migrations = "../remindme_storage/migrations")]
    async fn finalize_reports_counts_and_note(pool: Pool<Sqlite>) {
        let stores = registered_stores(pool).await;
        let id = stores.tasks.add_task(USER, &day(), "Gym").await.unwrap();
        stores.tasks.set_task_done(USER, id, true).await.unwrap();
        stores.notes.set_note(USER, &day(), "good day").await.unwrap();

        let outcome = apply(CheckinAction::Finalize, USER, &stores, &day())
            .await
            .unwrap();

        let CheckinOutcome::Finalized(text) = outcome else {
            panic!("expected the final summary, got {outcome:?}");
        };
        assert!(text.starts_with("✅ Final result for 2025-06-01: 1/1\n🔥"));
        assert!(text.contains("📝 Your note: good day"));
    }
}
