pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::Route;
use crate::cli::commitments::CommitmentsArgs;
use crate::core::InvestorApi;
use crate::core::config::{AppConfig, BASE_URL_ENV};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Investors,
    Commitments(CommitmentsArgs),
    Browse { path: String },
}

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub api_url: Option<String>,
}

/// Runs a command against the terminal.
pub async fn run_command(command: AppCommand, options: &RunOptions) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    execute(command, options, stdin.lock(), &mut stdout).await
}

/// Runs a command reading shell input from `input` and writing views to `output`.
pub async fn execute<R: BufRead, W: Write>(
    command: AppCommand,
    options: &RunOptions,
    input: R,
    output: &mut W,
) -> Result<()> {
    info!("Investors client starting...");

    let config = match options.config_path.as_deref() {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let env_url = std::env::var(BASE_URL_ENV).ok();
    let base_url = config.resolve_base_url(options.api_url.as_deref(), env_url.as_deref());
    info!("Using API at {}", base_url);
    let api: Arc<dyn InvestorApi> = Arc::new(providers::HttpInvestorApi::new(&base_url)?);

    match command {
        AppCommand::Investors => cli::investors::run(api.as_ref(), output).await,
        AppCommand::Commitments(args) => cli::commitments::run(api.as_ref(), &args, output).await,
        AppCommand::Browse { path } => {
            let start = Route::parse(&path)?;
            cli::Shell::new(api).run(start, input, output).await
        }
    }
}
