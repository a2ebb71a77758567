//! Content-production backend client.
//!
//! The orchestrator talks to the backend through the [`ContentBackend`]
//! trait, so tests can substitute an in-memory implementation and the HTTP
//! client stays a detail of [`HttpBackend`].

pub mod error;
pub mod http;

pub use error::{BackendError, BackendResult};
pub use http::{HealthStatus, HttpBackend};

use async_trait::async_trait;
use cp_protocol::planning_models::{ContentPlan, ContentStrategy};
use cp_protocol::research_models::{MarketResearchResponse, ResearchConfig};

/// The two backend calls the pipeline depends on.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// `POST /api/market-research`
    async fn market_research(&self, config: &ResearchConfig)
        -> BackendResult<MarketResearchResponse>;

    /// `POST /api/content-planning`
    async fn content_planning(&self, strategy: &ContentStrategy) -> BackendResult<ContentPlan>;
}
