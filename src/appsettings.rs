use anyhow::ensure;
use config::{Config, Environment, File, Map};
use remindme_models::settings::{RunMode, Settings};

const DEFAULT_DATABASE_URL: &str = "sqlite://data.db";
const DEFAULT_TICK_SECONDS: u64 = 30;

/// Plain variables understood on top of the `APP_` prefixed ones.
const ENV_ALIASES: &[(&str, &str)] = &[
    ("BOT_TOKEN", "telegram.token"),
    ("RUN_MODE", "telegram.run_mode"),
    ("WEBHOOK_BASE_URL", "telegram.webhook.base_url"),
    ("WEBHOOK_PATH", "telegram.webhook.path"),
    ("PORT", "telegram.webhook.port"),
];

pub fn get() -> anyhow::Result<Settings> {
    load_from(std::env::vars().collect())
}

fn load_from(vars: Map<String, String>) -> anyhow::Result<Settings> {
    let mut builder = Config::builder()
        .set_default("database.url", DEFAULT_DATABASE_URL)?
        .set_default("scheduler.tick_seconds", DEFAULT_TICK_SECONDS)?
        .add_source(File::with_name("appsettings").required(false))
        .add_source(File::with_name("appsettings.local").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .source(Some(vars.clone())),
        );

    for (variable, key) in ENV_ALIASES {
        let value = vars.get(*variable).map(|value| {
            let value = value.trim();
            if *key == "telegram.run_mode" {
                value.to_lowercase()
            } else {
                value.to_string()
            }
        });
        builder = builder.set_override_option(*key, value)?;
    }

    let settings: Settings = builder.build()?.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    ensure!(
        !settings.telegram.token.trim().is_empty(),
        "telegram.token (or BOT_TOKEN) must not be empty"
    );
    ensure!(
        settings.telegram.run_mode != RunMode::Webhook
            || settings.telegram.webhook.base_url.is_some(),
        "webhook mode needs telegram.webhook.base_url (or WEBHOOK_BASE_URL)"
    );
    ensure!(
        settings.scheduler.tick_seconds > 0,
        "scheduler.tick_seconds must be positive"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn missing_token_is_fatal() {
        assert!(load_from(vars(&[])).is_err());
    }

    #[test]
    fn blank_token_is_fatal() {
        assert!(load_from(vars(&[("BOT_TOKEN", "   ")])).is_err());
    }

    #[test]
    fn bot_token_alone_gives_polling_defaults() {
        let settings = load_from(vars(&[("BOT_TOKEN", "123:abc")])).unwrap();

        assert_eq!(settings.telegram.token, "123:abc");
        assert_eq!(settings.telegram.run_mode, RunMode::Polling);
        assert_eq!(settings.telegram.webhook.path, "remindme-hook");
        assert_eq!(settings.telegram.webhook.port, 8000);
        assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.scheduler.tick_seconds, DEFAULT_TICK_SECONDS);
    }

    #[test]
    fn prefixed_environment_is_read() {
        let settings = load_from(vars(&[
            ("APP_TELEGRAM__TOKEN", "from-app"),
            ("APP_DATABASE__URL", "sqlite://other.db"),
        ]))
        .unwrap();

        assert_eq!(settings.telegram.token, "from-app");
        assert_eq!(settings.database.url, "sqlite://other.db");
    }

    #[test]
    fn plain_variables_win_over_prefixed_ones() {
        let settings = load_from(vars(&[
            ("APP_TELEGRAM__TOKEN", "from-app"),
            ("BOT_TOKEN", "from-bot-token"),
        ]))
        .unwrap();

        assert_eq!(settings.telegram.token, "from-bot-token");
    }

    #[test]
    fn webhook_mode_needs_a_base_url() {
        let result = load_from(vars(&[("BOT_TOKEN", "t"), ("RUN_MODE", "Webhook")]));

        assert!(result.is_err());
    }

    #[test]
    fn webhook_mode_reads_the_original_variables() {
        let settings = load_from(vars(&[
            ("BOT_TOKEN", "t"),
            ("RUN_MODE", " WEBHOOK "),
            ("WEBHOOK_BASE_URL", "https://bot.example.com"),
            ("WEBHOOK_PATH", "hook"),
            ("PORT", "8443"),
        ]))
        .unwrap();

        assert_eq!(settings.telegram.run_mode, RunMode::Webhook);
        assert_eq!(
            settings.telegram.webhook.base_url.as_deref(),
            Some("https://bot.example.com")
        );
        assert_eq!(settings.telegram.webhook.path, "hook");
        assert_eq!(settings.telegram.webhook.port, 8443);
    }
}
