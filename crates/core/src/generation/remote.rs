//! Media generation through the backend's production endpoints.

use super::{MediaBrief, MediaGenerator, MediaKind};
use crate::backend::{BackendResult, HttpBackend};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Calls `/api/video-production` or `/api/podcast-production`.
#[derive(Debug, Clone)]
pub struct RemoteGenerator {
    backend: Arc<HttpBackend>,
    kind: MediaKind,
    video_platform: String,
}

impl RemoteGenerator {
    pub fn video(backend: Arc<HttpBackend>, platform: String) -> Self {
        Self {
            backend,
            kind: MediaKind::Video,
            video_platform: platform,
        }
    }

    pub fn podcast(backend: Arc<HttpBackend>) -> Self {
        Self {
            backend,
            kind: MediaKind::Podcast,
            video_platform: String::new(),
        }
    }
}

#[async_trait]
impl MediaGenerator for RemoteGenerator {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    async fn generate(&self, brief: &MediaBrief) -> BackendResult<Option<Value>> {
        let output = match self.kind {
            MediaKind::Video => {
                self.backend
                    .video_production(&brief.topic, &self.video_platform)
                    .await?
            }
            MediaKind::Podcast => {
                // The episode is written from the plan the planner produced
                let source = serde_json::to_string(brief.plan.as_value())?;
                self.backend
                    .podcast_production(&brief.topic, &source)
                    .await?
            }
        };
        Ok(Some(output))
    }
}
