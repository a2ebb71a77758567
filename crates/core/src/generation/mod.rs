//! Video and podcast generation.
//!
//! Both media stages go through the [`MediaGenerator`] trait. The default
//! [`SimulatedGenerator`] just waits; [`RemoteGenerator`] calls the
//! backend's production endpoints. The orchestrator cannot tell them apart.

pub mod remote;
pub mod simulated;

pub use remote::RemoteGenerator;
pub use simulated::SimulatedGenerator;

use crate::backend::{BackendResult, HttpBackend};
use crate::config::models::AppConfig;
use async_trait::async_trait;
use cp_protocol::config_models::GenerationMode;
use cp_protocol::planning_models::ContentPlan;
use cp_protocol::research_models::ResearchConfig;
use cp_protocol::run_models::Stage;
use serde_json::Value;
use std::sync::Arc;

/// Which medium a generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Podcast,
}

impl MediaKind {
    /// The pipeline stage this medium belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            MediaKind::Video => Stage::VideoGeneration,
            MediaKind::Podcast => Stage::PodcastGeneration,
        }
    }
}

/// Everything a generator gets to work from.
#[derive(Debug, Clone)]
pub struct MediaBrief {
    pub topic: String,
    pub target_audience: String,
    pub plan: ContentPlan,
}

impl MediaBrief {
    pub fn new(config: &ResearchConfig, plan: ContentPlan) -> Self {
        Self {
            topic: config.topic.clone(),
            target_audience: config.target_audience.clone(),
            plan,
        }
    }
}

#[async_trait]
pub trait MediaGenerator: Send + Sync {
    fn kind(&self) -> MediaKind;

    /// Produce the medium. Returns once it is done, with the backend's
    /// response when there was one.
    async fn generate(&self, brief: &MediaBrief) -> BackendResult<Option<Value>>;
}

/// The video and podcast generators for one orchestrator.
#[derive(Clone)]
pub struct Generators {
    pub video: Arc<dyn MediaGenerator>,
    pub podcast: Arc<dyn MediaGenerator>,
}

impl Generators {
    /// Generators selected by `generation.mode`.
    pub fn from_config(config: &AppConfig, backend: Arc<HttpBackend>) -> Self {
        let generation = &config.global.generation;
        match generation.mode {
            GenerationMode::Simulated => Self {
                video: Arc::new(SimulatedGenerator::new(
                    MediaKind::Video,
                    config.video_delay(),
                )),
                podcast: Arc::new(SimulatedGenerator::new(
                    MediaKind::Podcast,
                    config.podcast_delay(),
                )),
            },
            GenerationMode::Remote => Self {
                video: Arc::new(RemoteGenerator::video(
                    Arc::clone(&backend),
                    generation.video_platform.clone(),
                )),
                podcast: Arc::new(RemoteGenerator::podcast(backend)),
            },
        }
    }
}
