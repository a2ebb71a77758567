//! Global configuration models for `.content-pipeline/config.toml`.
//!
//! Every section and every field is optional; anything left out falls back
//! to the defaults below.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

use crate::planning_models::ContentStrategy;

/// Represents global settings from `.content-pipeline/config.toml`.
///
/// # Example
///
/// ```toml
/// # .content-pipeline/config.toml
/// [backend]
/// base_url = "http://localhost:5000"
///
/// [generation]
/// mode = "simulated"
/// video_delay_ms = 3000
/// podcast_delay_ms = 2000
///
/// [strategy]
/// publishing_frequency = "3x per week"
///
/// [output]
/// reports_dir = "reports"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
#[serde(default)]
pub struct GlobalConfig {
    pub backend: BackendSettings,
    pub generation: GenerationSettings,
    pub strategy: ContentStrategy,
    pub output: OutputSettings,
}

/// Where the content-production backend lives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL without a trailing slash, e.g. `http://localhost:5000`.
    pub base_url: String,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: None,
        }
    }
}

/// How video and podcast generation are carried out.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Wait a fixed delay and report success.
    #[default]
    Simulated,

    /// Call the backend's video and podcast production endpoints.
    Remote,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default)]
pub struct GenerationSettings {
    pub mode: GenerationMode,

    /// Simulated video generation time.
    pub video_delay_ms: u64,

    /// Simulated podcast generation time.
    pub podcast_delay_ms: u64,

    /// Target platform sent to the video production endpoint.
    pub video_platform: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Simulated,
            video_delay_ms: 3000,
            podcast_delay_ms: 2000,
            video_platform: "youtube".to_string(),
        }
    }
}

/// Where saved reports go.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for saved reports, relative to the project root unless
    /// absolute.
    pub reports_dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            reports_dir: "reports".to_string(),
        }
    }
}
