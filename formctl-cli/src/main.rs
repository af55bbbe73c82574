//! formctl CLI - dynamic form definitions over SQLite
//!
//! Entry point for the `formctl` command-line tool:
//! - HTTP API server (`serve` subcommand)
//! - Form inspection and creation from the terminal (`forms` subcommand)

use anyhow::Result;
use clap::{Parser, Subcommand};

use formctl_core::FormctlConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "formctl",
    author,
    version,
    about = "Define, store and serve dynamic forms",
    long_about = "Store form definitions (a title plus an ordered list of fields with choice \
                  options) in SQLite and serve them over a small JSON API."
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server (/api/formapi routes)
    Serve(commands::serve::ServeArgs),
    /// List, show and create forms directly against the database
    Forms(commands::forms::FormsArgs),
}

/// Load `.env` from the working directory, then `~/.formctl/.env`.
///
/// dotenvy never overwrites variables that are already set, so the working
/// directory wins over the home file and the real environment wins over both.
fn load_env_files() {
    dotenvy::dotenv().ok();
    dotenvy::from_path(FormctlConfig::config_dir().join(".env")).ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env_files();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Forms(args) => commands::run_forms(args).await?,
    }
    Ok(())
}
