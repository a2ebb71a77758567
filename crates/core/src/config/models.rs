//! Resolved application configuration.
//!
//! `AppConfig` pairs the parsed `config.toml` with the project root it was
//! loaded from, so relative paths in the file can be resolved.

use cp_protocol::config_models::GlobalConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::CONFIG_DIR;

/// Unified application configuration loaded from `.content-pipeline/`.
///
/// # Example
///
/// ```rust,no_run
/// use cp_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Backend at {}", config.global.backend.base_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory containing `.content-pipeline/`.
    pub root: PathBuf,

    /// Settings from `config.toml`, after environment overrides.
    pub global: GlobalConfig,
}

impl AppConfig {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global: GlobalConfig::default(),
        }
    }

    /// The `.content-pipeline/` directory.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Directory reports are saved into.
    pub fn reports_dir(&self) -> PathBuf {
        resolve(&self.root, &self.global.output.reports_dir)
    }

    /// Log file used while the dashboard owns the terminal.
    pub fn log_file(&self) -> PathBuf {
        self.config_dir().join("content-pipeline.log")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.global.backend.timeout_secs.map(Duration::from_secs)
    }

    pub fn video_delay(&self) -> Duration {
        Duration::from_millis(self.global.generation.video_delay_ms)
    }

    pub fn podcast_delay(&self) -> Duration {
        Duration::from_millis(self.global.generation.podcast_delay_ms)
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
