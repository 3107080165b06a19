use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Every day boundary in the bot is computed in this zone, whatever the host runs in.
pub const TIMEZONE: Tz = chrono_tz::Asia::Dhaka;

const FORMAT: &str = "%Y-%m-%d";

/// Calendar day in [`TIMEZONE`] used to partition tasks and notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn today() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant.with_timezone(&TIMEZONE).date_naive())
    }

    pub fn parse(value: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value, FORMAT).ok().map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

/// `YYYY-MM-DD` for the current day in [`TIMEZONE`].
pub fn today_key() -> String {
    DayKey::today().to_string()
}
