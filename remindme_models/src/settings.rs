use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Polling,
    Webhook,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WebhookSettings {
    pub base_url: Option<String>,
    pub path: String,
    pub port: u16,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            path: "remindme-hook".to_string(),
            port: 8000,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TelegramSettings {
    pub token: String,
    #[serde(default)]
    pub run_mode: RunMode,
    #[serde(default)]
    pub webhook: WebhookSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SchedulerSettings {
    pub tick_seconds: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub telegram: TelegramSettings,
    pub database: DatabaseSettings,
    pub scheduler: SchedulerSettings,
}
