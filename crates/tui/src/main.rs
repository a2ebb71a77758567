//! Standalone dashboard binary.
//!
//! Loads `.content-pipeline/config.toml` from the current directory and
//! opens the dashboard. The `content-pipeline` CLI offers the same
//! dashboard plus headless commands.

use anyhow::Result;
use cp_core::config::loader::load_config;
use cp_tui::run_app;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().map_err(|e| anyhow::anyhow!(e))?;
    let root = std::env::current_dir()?;
    let config = load_config(&root).await?;
    run_app(config).await
}
