use clap::Parser;

mod commands;
mod config;
mod error;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = config::Args::parse();
    let config = config::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally={level},client={level},filters={level}",
            level = config.level
        ))
        .init();

    commands::run(&config, args.command).await
}
