use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::{
    commands::Command,
    error::{AppError, Result},
};

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub settings_path: String,
    pub timezone: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4242/api/1/".to_string(),
            settings_path: "config/tally_settings.json".to_string(),
            timezone: "UTC".to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Argument(format!("invalid timezone {}: {err}", self.timezone)))
    }
}

#[derive(Debug, Parser)]
#[command(name = "tally", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:4242/api/1/).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the user settings file.
    #[arg(long)]
    settings: Option<String>,
    /// Override timezone (IANA name) dates are typed in.
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level.
    #[arg(long)]
    level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

pub fn load(args: &Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TALLY"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(path) = &args.settings {
        settings.settings_path = path.clone();
    }
    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
