pub mod day_key;
pub mod note;
pub mod settings;
pub mod task;
pub mod user;

pub use chrono;
pub use chrono_tz;
