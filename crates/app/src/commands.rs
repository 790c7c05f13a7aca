use std::time::Duration;

use api_types::{
    ActionStatus,
    filter::{SavedFilterLocation, Suggestion, SuggestionValue},
    task::PendingTask,
};
use clap::Subcommand;
use client::{ApiClient, TaskStatus};
use filters::{
    DateInputFormat, EnglishMessages, FilterError, FilterKey, JsonSettings, LedgerActionFilters,
    LedgerActionsFilter, SavedFilterStore, SettingsRepository,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

type LedgerActions = LedgerActionsFilter<EnglishMessages>;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the DeFi balances query and print its task id.
    Defi {
        /// Poll the task until it completes and print the outcome.
        #[arg(long)]
        wait: bool,
    },
    /// Start the airdrops check and print its task id.
    Airdrops {
        #[arg(long)]
        wait: bool,
    },
    /// Manage saved filters of a table.
    Filters {
        #[arg(long, default_value = SavedFilterLocation::HISTORY_LEDGER_ACTIONS)]
        location: String,
        #[command(subcommand)]
        action: FiltersAction,
    },
    /// Ledger-action table filters.
    LedgerActions {
        #[command(subcommand)]
        action: LedgerActionsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum FiltersAction {
    List,
    /// Save a filter made of `key=value` conditions.
    Add {
        #[arg(required = true)]
        conditions: Vec<String>,
    },
    Delete {
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum LedgerActionsAction {
    /// List the filterable fields.
    Matchers,
    /// Validate `key=value` conditions and print the resulting query.
    Check {
        #[arg(required = true)]
        conditions: Vec<String>,
    },
    /// Print the conditions held by a query string.
    Parse { query: String },
}

pub async fn run(config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Defi { wait } => {
            let client = ApiClient::new(&config.base_url)?;
            let task = client.fetch_all_defi().await?;
            report_task(&client, task, wait).await
        }
        Command::Airdrops { wait } => {
            let client = ApiClient::new(&config.base_url)?;
            let task = client.fetch_airdrops().await?;
            report_task(&client, task, wait).await
        }
        Command::Filters { location, action } => saved_filters(config, location, action).await,
        Command::LedgerActions { action } => ledger_actions(config, action).await,
    }
}

async fn report_task(client: &ApiClient, task: PendingTask, wait: bool) -> Result<()> {
    println!("task {}", task.task_id);
    if !wait {
        return Ok(());
    }

    loop {
        match client.task_status(task.task_id).await? {
            TaskStatus::Pending => {
                tracing::debug!("task {} still pending", task.task_id);
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            TaskStatus::Completed(outcome) => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }
            TaskStatus::NotFound => {
                return Err(AppError::Action(format!("task {} not found", task.task_id)));
            }
        }
    }
}

async fn saved_filters(config: &AppConfig, location: String, action: FiltersAction) -> Result<()> {
    let settings = JsonSettings::load(&config.settings_path)?;
    let store = SavedFilterStore::new(
        &settings,
        &EnglishMessages,
        SavedFilterLocation::new(location),
        LedgerActions::is_asset_key,
    );

    match action {
        FiltersAction::List => {
            for (index, group) in store.saved_filters().await.iter().enumerate() {
                println!("{index}: {}", render_group(group));
            }
            Ok(())
        }
        FiltersAction::Add { conditions } => {
            let suggestions = parse_conditions(&conditions)?;
            into_result(store.add_filter(&suggestions).await)
        }
        FiltersAction::Delete { index } => into_result(store.delete_filter(index).await),
    }
}

async fn ledger_actions(config: &AppConfig, action: LedgerActionsAction) -> Result<()> {
    let settings = JsonSettings::load(&config.settings_path)?;
    let date_format = DateInputFormat::new(settings.get().await.date_input_format, config.timezone()?)?;
    let schema = LedgerActions::route_filter_schema();

    match action {
        LedgerActionsAction::Matchers => {
            let filter = LedgerActions::new(EnglishMessages, date_format, Vec::new());
            for matcher in filter.matchers() {
                match matcher.hint {
                    Some(hint) => println!("{}: {} ({hint})", matcher.key.as_str(), matcher.description),
                    None => println!("{}: {}", matcher.key.as_str(), matcher.description),
                }
            }
            Ok(())
        }
        LedgerActionsAction::Check { conditions } => {
            let client = ApiClient::new(&config.base_url)?;
            let locations = client.associated_locations().await?;
            let filter = LedgerActions::new(EnglishMessages, date_format, locations);

            let suggestions = parse_conditions(&conditions)?;
            for suggestion in &suggestions {
                let Some(matcher) = filter.matcher(&suggestion.key) else {
                    return Err(FilterError::UnknownKey(suggestion.key.clone()).into());
                };
                let value = suggestion.value.as_text();
                if !matcher.validate_with(value, &client).await? {
                    return Err(FilterError::InvalidValue {
                        key: suggestion.key.clone(),
                        value: value.to_string(),
                    }
                    .into());
                }
            }

            let filters = filter.apply_suggestions(&suggestions)?;
            println!("{}", schema.to_query(&filters.to_route()));
            Ok(())
        }
        LedgerActionsAction::Parse { query } => {
            let client = ApiClient::new(&config.base_url)?;
            let mut filter = LedgerActions::new(EnglishMessages, date_format, Vec::new());
            filter.update_filter(LedgerActionFilters::from_route(&schema.parse_query(&query)));

            println!("{}", serde_json::to_string_pretty(filter.filters())?);
            for suggestion in filter.active_suggestions(&client).await? {
                println!("{}={}", suggestion.key, render_value(&suggestion.value));
            }
            Ok(())
        }
    }
}

fn into_result(status: ActionStatus) -> Result<()> {
    if status.success {
        return Ok(());
    }
    Err(AppError::Action(
        status.message.unwrap_or_else(|| "action failed".to_string()),
    ))
}

fn parse_conditions(raw: &[String]) -> Result<Vec<Suggestion>> {
    raw.iter().map(|condition| parse_condition(condition)).collect()
}

fn parse_condition(raw: &str) -> Result<Suggestion> {
    let (key, value) = raw
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .ok_or_else(|| AppError::Argument(format!("expected key=value, got \"{raw}\"")))?;
    Ok(Suggestion::new(key, value, LedgerActions::is_asset_key(key)))
}

fn render_group(group: &[Suggestion]) -> String {
    group
        .iter()
        .map(|suggestion| format!("{}={}", suggestion.key, render_value(&suggestion.value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_value(value: &SuggestionValue) -> String {
    match value {
        SuggestionValue::Text(text) => text.clone(),
        SuggestionValue::Asset(asset) => asset
            .symbol
            .clone()
            .unwrap_or_else(|| asset.identifier.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_flags_asset_keys() {
        let suggestion = parse_condition("asset=ETH").unwrap();
        assert!(suggestion.asset);
        assert_eq!(suggestion.value, SuggestionValue::Text("ETH".to_string()));
        assert!(!parse_condition("type = gift").unwrap().asset);
    }

    #[test]
    fn condition_needs_key_and_value() {
        assert!(parse_condition("asset").is_err());
        assert!(parse_condition("=ETH").is_err());
        assert!(parse_condition("asset=").is_err());
    }

    #[test]
    fn failed_status_becomes_error() {
        assert!(into_result(ActionStatus::ok()).is_ok());
        let err = into_result(ActionStatus::failed("limit")).unwrap_err();
        assert_eq!(err.to_string(), "limit");
    }
}
