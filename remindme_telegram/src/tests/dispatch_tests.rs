use remindme_models::{day_key::DayKey, user::UserId};
use remindme_storage::Stores;
use sqlx::{Pool, Sqlite};
use teloxide::dptree::deps;
use teloxide_tests::{
    MockBot, MockCallbackQuery, MockMessagePhoto, MockMessageText, mock_bot::DistributionKey,
};

use crate::{messages, schema};

fn sent_texts(bot: &MockBot<anyhow::Error, DistributionKey>) -> Vec<String> {
    bot.get_responses()
        .sent_messages
        .iter()
        .filter_map(|message| message.text().map(str::to_string))
        .collect()
}

#[sqlx::test(migrations = "../remindme_storage/migrations")]
async fn command_from_unseen_chat_registers_the_sender(pool: Pool<Sqlite>) {
    let stores = Stores::sqlite(pool);
    let mock_message = MockMessageText::new().text("/today");
    let chat_id = mock_message.chat.id;

    let mut bot = MockBot::new(mock_message, schema());
    bot.dependencies(deps![stores.clone()]);
    bot.dispatch().await;

    let users = stores.users.all_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].chat_id, chat_id.0);

    let texts = sent_texts(&bot);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("you have no tasks"));
}

#[sqlx::test(migrations = "../remindme_storage/migrations")]
async fn repeated_messages_keep_a_single_user(pool: Pool<Sqlite>) {
    let stores = Stores::sqlite(pool);

    let mut bot = MockBot::new(MockMessageText::new().text("/help"), schema());
    bot.dependencies(deps![stores.clone()]);
    bot.dispatch().await;
    bot.update(MockMessageText::new().text("/add Gym"));
    bot.dispatch().await;

    let users = stores.users.all_users().await.unwrap();
    assert_eq!(users.len(), 1);
    let tasks = stores
        .tasks
        .list_tasks(users[0].id, &DayKey::today())
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Gym");
}

#[sqlx::test(migrations = "../remindme_storage/migrations")]
async fn photo_gets_the_text_only_notice_and_touches_nothing(pool: Pool<Sqlite>) {
    let stores = Stores::sqlite(pool);

    let mut bot = MockBot::new(MockMessagePhoto::new(), schema());
    bot.dependencies(deps![stores.clone()]);
    bot.dispatch().await;

    assert_eq!(sent_texts(&bot), vec![messages::TEXT_ONLY_NOTICE.to_string()]);
    assert!(stores.users.all_users().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../remindme_storage/migrations")]
async fn unknown_command_is_reported(pool: Pool<Sqlite>) {
    let stores = Stores::sqlite(pool);

    let mut bot = MockBot::new(MockMessageText::new().text("/snooze"), schema());
    bot.dependencies(deps![stores]);
    bot.dispatch().await;

    assert_eq!(sent_texts(&bot), vec![messages::UNKNOWN_COMMAND.to_string()]);
}

#[sqlx::test(migrations = "../remindme_storage/migrations")]
async fn trailing_words_after_a_plain_command_are_ignored(pool: Pool<Sqlite>) {
    let stores = Stores::sqlite(pool);

    let mut bot = MockBot::new(MockMessageText::new().text("/today please"), schema());
    bot.dependencies(deps![stores]);
    bot.dispatch().await;

    let texts = sent_texts(&bot);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("you have no tasks"));
}

#[sqlx::test(migrations = "../remindme_storage/migrations")]
async fn plain_text_gets_the_welcome(pool: Pool<Sqlite>) {
    let stores = Stores::sqlite(pool);

    let mut bot = MockBot::new(MockMessageText::new().text("hello there"), schema());
    bot.dependencies(deps![stores.clone()]);
    bot.dispatch().await;

    let texts = sent_texts(&bot);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Welcome to RemindMe Bot"));
    assert_eq!(stores.users.all_users().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../remindme_storage/migrations")]
async fn toggle_on_a_message_without_buttons_is_ignored(pool: Pool<Sqlite>) {
    let stores = Stores::sqlite(pool);
    let finalized = MockMessageText::new()
        .text("✅ Final result for today: 0/1")
        .build();
    let query = MockCallbackQuery::new().message(finalized);
    let presser = query.from.id.0 as UserId;

    stores.users.register_user(presser, presser).await.unwrap();
    let task_id = stores
        .tasks
        .add_task(presser, &DayKey::today(), "Gym")
        .await
        .unwrap();

    let mut bot = MockBot::new(query.data(format!("t:{task_id}")), schema());
    bot.dependencies(deps![stores.clone()]);
    bot.dispatch().await;

    let tasks = stores
        .tasks
        .list_tasks(presser, &DayKey::today())
        .await
        .unwrap();
    assert!(!tasks[0].done);

    let responses = bot.get_responses();
    assert!(responses.edited_messages_text.is_empty());
    assert_eq!(responses.answered_callback_queries.len(), 1);
}
