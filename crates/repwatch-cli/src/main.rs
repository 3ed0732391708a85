mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "repwatch-cli")]
#[command(about = "Collect news and social mentions for tracked keywords")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect news and social data for keywords (defaults to tracked keywords)
    Collect {
        /// Keyword to collect; repeat for several. Overrides REPWATCH_TRACKED_KEYWORDS
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,

        /// Print the keywords that would be collected without calling any API
        #[arg(long)]
        dry_run: bool,
    },
    /// Search one keyword across every active social platform
    Listen {
        #[arg(long, short = 'k')]
        keyword: String,
    },
    /// List the social platforms eligible for listening
    Platforms,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = repwatch_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Collect { keywords, dry_run } => {
            commands::run_collect(&config, &keywords, dry_run).await
        }
        Commands::Listen { keyword } => commands::run_listen(&config, &keyword).await,
        Commands::Platforms => commands::run_platforms(&config).await,
    }
}
