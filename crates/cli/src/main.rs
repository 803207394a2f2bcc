use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::Settings;

#[derive(Parser)]
#[command(name = "chartboard")]
#[command(about = "Browse your chart-generation jobs and their results", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Connection settings; each overrides its `CHARTBOARD_*` environment variable.
#[derive(Args, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Base URL of the chart service
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Value of the Cookie header identifying the signed-in session
    #[arg(long, global = true)]
    pub session: Option<String>,
    /// Avatar shown on every card
    #[arg(long, global = true)]
    pub avatar_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
    /// Retries for transient failures
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of charts
    List {
        /// Only charts whose name matches
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short = 's', long)]
        page_size: Option<u32>,
    },
    /// Interactive board: type to search, `:page N` to paginate, `:quit` to leave
    Watch {
        #[arg(short, long)]
        name: Option<String>,
        /// Reload every N seconds while jobs are still generating (0 disables)
        #[arg(long, default_value = "0")]
        poll_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = Settings::from_env().with_args(&cli.global);

    match cli.command {
        Commands::List { name, page, page_size } => {
            commands::list::run(&settings, name.as_deref(), page, page_size).await?;
        },
        Commands::Watch { name, poll_secs } => {
            commands::watch::run(&settings, name.as_deref(), poll_secs).await?;
        },
    }

    Ok(())
}
