use anyhow::Result;
use clap::Parser;

use fracpools::application::commands::{Cli, CommandExecutor};
use fracpools::shared::config::MarketConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MarketConfig::from_file(path)?,
        None => MarketConfig::default(),
    };

    CommandExecutor::execute(cli.command, config).await?;
    Ok(())
}
