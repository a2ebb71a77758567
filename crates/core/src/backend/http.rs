//! HTTP implementation of [`ContentBackend`] on top of `reqwest`.

use super::error::{BackendError, BackendResult};
use super::ContentBackend;
use crate::config::models::AppConfig;
use async_trait::async_trait;
use cp_protocol::planning_models::{ContentPlan, ContentStrategy};
use cp_protocol::research_models::{MarketResearchResponse, ResearchConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const MARKET_RESEARCH_PATH: &str = "/api/market-research";
const CONTENT_PLANNING_PATH: &str = "/api/content-planning";
const VIDEO_PRODUCTION_PATH: &str = "/api/video-production";
const PODCAST_PRODUCTION_PATH: &str = "/api/podcast-production";

/// Body of the backend's `GET /` health check.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Client for the content-production backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for `base_url` (no trailing slash).
    ///
    /// `timeout` bounds every request; `None` waits indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> BackendResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the `[backend]` section of the configuration.
    pub fn from_config(config: &AppConfig) -> BackendResult<Self> {
        Self::new(
            config.global.backend.base_url.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /`
    pub async fn health(&self) -> BackendResult<HealthStatus> {
        let url = format!("{}/", self.base_url);
        tracing::debug!(%url, "checking backend health");

        let resp = self.client.get(&url).send().await?;
        Self::decode(resp).await
    }

    /// `POST /api/video-production`
    pub async fn video_production(
        &self,
        video_topic: &str,
        target_platform: &str,
    ) -> BackendResult<Value> {
        let body = serde_json::json!({
            "video_topic": video_topic,
            "target_platform": target_platform,
        });
        self.post_json(VIDEO_PRODUCTION_PATH, &body).await
    }

    /// `POST /api/podcast-production`
    pub async fn podcast_production(
        &self,
        episode_topic: &str,
        source_content: &str,
    ) -> BackendResult<Value> {
        let body = serde_json::json!({
            "episode_topic": episode_topic,
            "source_content": source_content,
        });
        self.post_json(PODCAST_PRODUCTION_PATH, &body).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> BackendResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");

        let resp = self.client.post(&url).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn decode<R: DeserializeOwned>(resp: reqwest::Response) -> BackendResult<R> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "backend returned an error status");
            return Err(BackendError::from_status(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentBackend for HttpBackend {
    async fn market_research(
        &self,
        config: &ResearchConfig,
    ) -> BackendResult<MarketResearchResponse> {
        self.post_json(MARKET_RESEARCH_PATH, config).await
    }

    async fn content_planning(&self, strategy: &ContentStrategy) -> BackendResult<ContentPlan> {
        let value: Value = self.post_json(CONTENT_PLANNING_PATH, strategy).await?;
        Ok(ContentPlan::new(value))
    }
}
