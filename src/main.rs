use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use investors::cli::commitments::CommitmentsArgs;
use investors::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Base URL of the investors API, overrides config and INVESTORS_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List investors
    Investors,
    /// Show an investor's commitments with per-asset-class totals
    Commitments {
        /// Investor id
        id: String,
        /// Only show rows containing this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Sort by column, optionally with a direction: amount, id:desc
        #[arg(short, long)]
        sort: Option<String>,
        /// Rows per page (10, 20, 30, 40 or 50)
        #[arg(long)]
        page_size: Option<usize>,
        /// Page to show, starting at 1
        #[arg(short, long)]
        page: Option<usize>,
    },
    /// Browse investors and commitments interactively
    Browse {
        /// Path to start at: / or /investors/<id>
        #[arg(default_value = "/")]
        path: String,
    },
}

impl From<Commands> for investors::AppCommand {
    fn from(cmd: Commands) -> investors::AppCommand {
        match cmd {
            Commands::Investors => investors::AppCommand::Investors,
            Commands::Commitments {
                id,
                filter,
                sort,
                page_size,
                page,
            } => investors::AppCommand::Commitments(CommitmentsArgs {
                investor_id: id,
                filter,
                sort,
                page_size,
                page,
            }),
            Commands::Browse { path } => investors::AppCommand::Browse { path },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = investors::RunOptions {
        config_path: cli.config_path,
        api_url: cli.api_url,
    };

    let result = match cli.command {
        Some(Commands::Setup) => investors::cli::setup::setup(),
        Some(cmd) => investors::run_command(cmd.into(), &options).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
