mod cli;
mod config;
mod logging;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use shuowang::chinese::ChineseCalendar;
use shuowang::server::{self, AppState};
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?.merge_cli(&cli);
    let calendar = ChineseCalendar::new(config.calendar.utc_offset_minutes)
        .context("invalid [calendar] utc_offset_minutes")?;
    info!(
        utc_offset_minutes = calendar.utc_offset_minutes(),
        "calendar ready"
    );

    let server_config = config.server_config();
    server::serve(&server_config, Arc::new(AppState::new(calendar)))
        .await
        .with_context(|| format!("failed to serve on {}", server_config.bind_addr()))
}
