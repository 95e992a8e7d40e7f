//! Leasehold CLI - Extract rental agreement terms into a local database.

use clap::Parser;
use leasehold_cli::commands;
use leasehold_cli::{Cli, Command, Config, Formatter};
use leasehold_store::SqliteStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(true) => {}
        // The batch ran but some documents failed; the report was printed
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> leasehold_cli::Result<bool> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = Config::load(cli.config.as_deref())?;
    if !config.file_exists() {
        config.save().ok();
    }

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let database = cli
        .database
        .unwrap_or_else(|| config.settings.database_path.clone());

    match cli.command {
        Command::Process(args) => {
            return commands::execute_process(args, &config, &database, &formatter).await;
        }
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Command::Show(args) => {
            let store = SqliteStore::new(&database)?;
            commands::execute_show(args, &store, &formatter)?;
        }
        Command::List => {
            let store = SqliteStore::new(&database)?;
            commands::execute_list(&store, &formatter)?;
        }
        Command::Forget(args) => {
            let mut store = SqliteStore::new(&database)?;
            commands::execute_forget(args, &mut store, &formatter)?;
        }
    }

    Ok(true)
}
