//! SVES CLI: the main entry point.
//!
//! Commands:
//! - `chat`      Interactive expert chat
//! - `ask`       Single question, answer on stdout
//! - `status`    Active backend and whether it answers
//! - `backends`  Supported backend kinds and their protocols
//! - `init`      Write the default config file

use clap::{Parser, Subcommand};

mod commands;

use commands::BackendArgs;

#[derive(Parser)]
#[command(
    name = "sves",
    about = "Simic Virtual Expert System: supercritical chemistry and drilling expert on a self-hosted LLM",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    backend: BackendArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the expert system
    Chat,

    /// Ask a single question
    Ask {
        /// The question to ask
        #[arg(short, long)]
        message: String,
    },

    /// Show the active backend and probe it
    Status,

    /// List supported backend kinds
    Backends,

    /// Create ~/.sves/config.toml with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = sves_config::AppConfig::load();

    // Initialize tracing
    let filter = match (&config, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.log_level.clone(),
        (Err(_), false) => "warn".to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat => commands::chat::run(commands::resolve(config, &cli.backend)?).await?,
        Commands::Ask { message } => {
            commands::ask::run(commands::resolve(config, &cli.backend)?, &message).await?
        }
        Commands::Status => commands::status::run(commands::resolve(config, &cli.backend)?).await?,
        Commands::Backends => commands::backends::run()?,
        Commands::Init => commands::init::run()?,
    }

    Ok(())
}
