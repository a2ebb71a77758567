//! Tracing setup.
//!
//! Headless commands log to stderr. The dashboard owns the terminal, so it
//! logs to a file under `.content-pipeline/` instead. `RUST_LOG` overrides
//! the default filter in both cases.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,cp_core=info,cp_tui=info,content_pipeline=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to `path`, appending. Logging stays off when the file cannot be
/// opened, typically because the project was never initialized.
pub fn init_file(path: &Path) {
    let Some(dir) = path.parent() else {
        return;
    };
    if !dir.is_dir() {
        return;
    }

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: could not open log file {}: {e}", path.display());
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
