use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    NoteStorage, TaskStorage, UserStorage,
    sqlite::{
        note_storage::SqliteNoteStorage, task_storage::SqliteTaskStorage,
        user_storage::SqliteUserStorage,
    },
};

/// The three storages handed around together as a single dependency.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStorage>,
    pub tasks: Arc<dyn TaskStorage>,
    pub notes: Arc<dyn NoteStorage>,
}

impl Stores {
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self {
            users: Arc::new(SqliteUserStorage::new(pool.clone())),
            tasks: Arc::new(SqliteTaskStorage::new(pool.clone())),
            notes: Arc::new(SqliteNoteStorage::new(pool)),
        }
    }
}
