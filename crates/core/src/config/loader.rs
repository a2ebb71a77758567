//! Configuration file loader for the `.content-pipeline/` directory.
//!
//! Only one file is read: `.content-pipeline/config.toml`. A missing
//! directory or file is not an error; the defaults apply instead.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use crate::config::{BACKEND_URL_ENV, CONFIG_DIR};
use cp_protocol::config_models::GlobalConfig;
use std::path::Path;

/// Loads configuration for the project rooted at `root`.
///
/// Order of precedence, lowest first:
/// 1. built-in defaults
/// 2. `.content-pipeline/config.toml`
/// 3. the `CONTENT_PIPELINE_BACKEND_URL` environment variable
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, is not
/// valid TOML, or contains an unusable value (such as a backend URL that is
/// not http or https).
///
/// # Example
///
/// ```rust,no_run
/// use cp_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Reports go to {}", config.reports_dir().display());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let env_url = std::env::var(BACKEND_URL_ENV).ok();
    load_config_with_override(root, env_url.as_deref()).await
}

/// Same as [`load_config`], with the backend URL override passed in
/// explicitly instead of read from the environment.
pub async fn load_config_with_override(
    root: &Path,
    backend_url: Option<&str>,
) -> ConfigResult<AppConfig> {
    let config_path = root.join(CONFIG_DIR).join("config.toml");

    let mut global = load_global_config(&config_path).await?;

    if let Some(url) = backend_url.filter(|url| !url.trim().is_empty()) {
        tracing::debug!(url, "backend URL overridden");
        global.backend.base_url = url.trim().to_string();
    }

    validate(&config_path, &mut global)?;

    Ok(AppConfig {
        root: root.to_path_buf(),
        global,
    })
}

/// Loads global configuration from `config.toml`.
async fn load_global_config(config_path: &Path) -> ConfigResult<GlobalConfig> {
    // If config.toml doesn't exist, return default
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(GlobalConfig::default());
    }

    let content =
        tokio::fs::read_to_string(config_path)
            .await
            .map_err(|source| ConfigError::FileRead {
                path: config_path.to_path_buf(),
                source,
            })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source,
    })
}

/// Normalizes and checks values that serde cannot check on its own.
fn validate(config_path: &Path, global: &mut GlobalConfig) -> ConfigResult<()> {
    let url = global.backend.base_url.trim().trim_end_matches('/').to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidConfig {
            path: config_path.to_path_buf(),
            reason: format!("backend.base_url must be an http or https URL, got '{url}'"),
        });
    }
    global.backend.base_url = url;

    if global.backend.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfig {
            path: config_path.to_path_buf(),
            reason: "backend.timeout_secs must be greater than zero".to_string(),
        });
    }

    if global.output.reports_dir.trim().is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: config_path.to_path_buf(),
            reason: "output.reports_dir must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_protocol::config_models::GenerationMode;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(root: &Path, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).expect("Failed to create config dir");
        fs::write(dir.join("config.toml"), content).expect("Failed to write config.toml");
    }

    #[tokio::test]
    async fn test_load_config_full_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        write_config(
            root,
            r#"
[backend]
base_url = "https://content.example.com/"
timeout_secs = 30

[generation]
mode = "remote"
video_delay_ms = 100
podcast_delay_ms = 50
video_platform = "tiktok"

[strategy]
content_goals = "Grow the newsletter"
brand_guidelines = "Playful"
publishing_frequency = "daily"

[output]
reports_dir = "out"
"#,
        );

        let config = load_config_with_override(root, None)
            .await
            .expect("Failed to load config");

        // Trailing slash is stripped
        assert_eq!(config.global.backend.base_url, "https://content.example.com");
        assert_eq!(config.global.backend.timeout_secs, Some(30));
        assert_eq!(config.global.generation.mode, GenerationMode::Remote);
        assert_eq!(config.global.generation.video_platform, "tiktok");
        assert_eq!(config.global.strategy.publishing_frequency, "daily");
        assert_eq!(config.reports_dir(), root.join("out"));
    }

    #[tokio::test]
    async fn test_load_config_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        let config = load_config_with_override(dir.path(), None)
            .await
            .expect("Should handle missing .content-pipeline");

        assert_eq!(config.global, GlobalConfig::default());
        assert_eq!(config.root, dir.path());
    }

    #[tokio::test]
    async fn test_override_wins_over_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[backend]\nbase_url = \"http://from-file:5000\"\n");

        let config = load_config_with_override(dir.path(), Some("http://from-env:9000"))
            .await
            .expect("Failed to load config");

        assert_eq!(config.global.backend.base_url, "http://from-env:9000");
    }

    #[tokio::test]
    async fn test_blank_override_is_ignored() {
        let dir = tempdir().expect("Failed to create temp dir");

        let config = load_config_with_override(dir.path(), Some("   "))
            .await
            .expect("Failed to load config");

        assert_eq!(config.global.backend.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_invalid_toml_is_reported() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[backend\nbase_url = ");

        let result = load_config_with_override(dir.path(), None).await;
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[tokio::test]
    async fn test_non_http_url_is_rejected() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[backend]\nbase_url = \"ftp://example.com\"\n");

        let result = load_config_with_override(dir.path(), None).await;
        match result {
            Err(ConfigError::InvalidConfig { reason, .. }) => {
                assert!(reason.contains("ftp://example.com"));
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_timeout_is_rejected() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[backend]\ntimeout_secs = 0\n");

        let result = load_config_with_override(dir.path(), None).await;
        assert!(matches!(result, Err(ConfigError::InvalidConfig { .. })));
    }
}
