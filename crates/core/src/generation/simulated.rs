//! Timer-based stand-in for real media generation.

use super::{MediaBrief, MediaGenerator, MediaKind};
use crate::backend::BackendResult;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Waits a fixed delay, then reports success without a payload. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedGenerator {
    kind: MediaKind,
    delay: Duration,
}

impl SimulatedGenerator {
    pub fn new(kind: MediaKind, delay: Duration) -> Self {
        Self { kind, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl MediaGenerator for SimulatedGenerator {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    async fn generate(&self, brief: &MediaBrief) -> BackendResult<Option<Value>> {
        tracing::debug!(
            kind = ?self.kind,
            topic = %brief.topic,
            delay = ?self.delay,
            "simulating generation"
        );
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}
