mod error;
mod note;
mod stores;
mod task;
mod user;

pub mod sqlite;

pub use error::StorageError;
pub use note::NoteStorage;
pub use stores::Stores;
pub use task::TaskStorage;
pub use user::UserStorage;

pub use sqlx;
