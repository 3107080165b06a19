pub mod note_storage;
pub mod task_storage;
pub mod user_storage;

use std::str::FromStr;

use remindme_models::day_key::DayKey;
use sqlx::{
    SqlitePool,
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::StorageError;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens (creating if needed) the database at `url` and brings its schema up to date.
pub async fn connect(url: &str) -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    log::info!("Connected to {url}, schema is up to date");

    Ok(pool)
}

fn parse_day_key(value: String) -> Result<DayKey, StorageError> {
    DayKey::parse(&value).ok_or(StorageError::MalformedDayKey(value))
}
