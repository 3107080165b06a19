mod enrollment;
mod job;
mod runner;

pub mod delivery;

pub use delivery::DailyDeliveryChannel;
pub use enrollment::enroll_user;
pub use job::DailyJob;
pub use runner::{Clock, DailyJobRunner};
