//! `content-pipeline health`

use color_eyre::eyre::{bail, Result, WrapErr};
use colored::Colorize;
use cp_core::backend::HttpBackend;
use cp_core::config::models::AppConfig;

pub async fn execute(config: &AppConfig) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    let status = backend
        .health()
        .await
        .wrap_err_with(|| format!("backend at {} is unreachable", backend.base_url()))?;

    if !status.is_healthy() {
        bail!(
            "backend at {} reported status '{}'",
            backend.base_url(),
            status.status
        );
    }

    println!(
        "{} {}",
        "Backend healthy".green().bold(),
        backend.base_url().dimmed()
    );
    if !status.message.is_empty() {
        println!("  {}", status.message);
    }
    Ok(())
}
