//! `content-pipeline` command line entry point.
//!
//! Without a subcommand the dashboard is launched. `run` executes one
//! pipeline run headless and prints its progress, `init` scaffolds the
//! `.content-pipeline/` directory and `health` checks the backend.

mod commands;
mod logging;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use cp_core::config::loader::load_config_with_override;
use cp_core::config::models::AppConfig;
use cp_core::config::BACKEND_URL_ENV;
use std::path::Path;

#[derive(Debug, Parser)]
#[command(name = "content-pipeline", version, about = "Research, plan and produce content from one topic")]
struct Cli {
    /// Backend base URL, overriding config.toml.
    #[arg(long, global = true, env = BACKEND_URL_ENV)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the pipeline once without the dashboard.
    Run(commands::run::RunArgs),

    /// Create the .content-pipeline directory with a default config.
    Init {
        /// Overwrite existing template files.
        #[arg(long)]
        force: bool,
    },

    /// Check that the backend is reachable and healthy.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let root = std::env::current_dir().wrap_err("could not read the current directory")?;

    match cli.command {
        None => {
            let config = load(&root, cli.backend_url.as_deref()).await?;
            logging::init_file(&config.log_file());
            cp_tui::run_app(config)
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e))
        }
        Some(Commands::Run(args)) => {
            logging::init_stderr();
            let config = load(&root, cli.backend_url.as_deref()).await?;
            commands::run::execute(&config, args).await
        }
        Some(Commands::Init { force }) => {
            logging::init_stderr();
            commands::init::execute(&root, force).await
        }
        Some(Commands::Health) => {
            logging::init_stderr();
            let config = load(&root, cli.backend_url.as_deref()).await?;
            commands::health::execute(&config).await
        }
    }
}

async fn load(root: &Path, backend_url: Option<&str>) -> Result<AppConfig> {
    load_config_with_override(root, backend_url)
        .await
        .wrap_err("failed to load configuration")
}
