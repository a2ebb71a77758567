//! Research configuration models.
//!
//! These types describe what the viewer asks the research stage to do and
//! what the `/api/market-research` endpoint sends back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// How thorough the market research should be.
///
/// Serialized in lowercase (`"basic"`, `"standard"`, `"comprehensive"`),
/// which is the wire format the research endpoint expects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum ResearchDepth {
    /// Quick scan of the topic.
    Basic,

    /// Balanced depth. Used whenever the viewer does not pick one.
    #[default]
    Standard,

    /// Exhaustive research including competitor deep dives.
    Comprehensive,
}

impl ResearchDepth {
    /// All depths in the order they are offered to the viewer.
    pub const ALL: [ResearchDepth; 3] = [
        ResearchDepth::Basic,
        ResearchDepth::Standard,
        ResearchDepth::Comprehensive,
    ];

    /// Wire name of this depth.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchDepth::Basic => "basic",
            ResearchDepth::Standard => "standard",
            ResearchDepth::Comprehensive => "comprehensive",
        }
    }

    /// The next depth in [`ResearchDepth::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            ResearchDepth::Basic => ResearchDepth::Standard,
            ResearchDepth::Standard => ResearchDepth::Comprehensive,
            ResearchDepth::Comprehensive => ResearchDepth::Basic,
        }
    }

    /// The previous depth in [`ResearchDepth::ALL`], wrapping around.
    pub fn previous(self) -> Self {
        match self {
            ResearchDepth::Basic => ResearchDepth::Comprehensive,
            ResearchDepth::Standard => ResearchDepth::Basic,
            ResearchDepth::Comprehensive => ResearchDepth::Standard,
        }
    }
}

impl fmt::Display for ResearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the three research depths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDepth(pub String);

impl fmt::Display for UnknownDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown research depth '{}', expected basic, standard or comprehensive",
            self.0
        )
    }
}

impl std::error::Error for UnknownDepth {}

impl FromStr for ResearchDepth {
    type Err = UnknownDepth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ResearchDepth::Basic),
            "standard" => Ok(ResearchDepth::Standard),
            "comprehensive" => Ok(ResearchDepth::Comprehensive),
            _ => Err(UnknownDepth(s.to_string())),
        }
    }
}

/// A validated research configuration.
///
/// This is both the input of the pipeline orchestrator and, unchanged, the
/// request body of `POST /api/market-research`:
///
/// ```json
/// {
///   "topic": "AI_in_Healthcare",
///   "target_audience": "Healthcare professionals",
///   "competitor_domains": ["example.com", "rival.io"],
///   "research_depth": "standard"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ResearchConfig {
    /// Subject area to research. Never empty once validated.
    pub topic: String,

    /// Primary audience for the content. Never empty once validated.
    pub target_audience: String,

    /// Competitor domains, trimmed, without empty entries or duplicates.
    #[serde(default)]
    pub competitor_domains: Vec<String>,

    /// Research depth, `standard` when omitted.
    #[serde(default)]
    pub research_depth: ResearchDepth,
}

/// Response body of `POST /api/market-research`.
///
/// Only `research_reports` is consumed. Report contents are either plain
/// text or structured JSON, keyed by report filename.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct MarketResearchResponse {
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub research_reports: BTreeMap<String, Value>,

    /// Raw plan-run result, kept for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub result: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_defaults_to_standard() {
        assert_eq!(ResearchDepth::default(), ResearchDepth::Standard);
    }

    #[test]
    fn test_depth_from_str_is_case_insensitive() {
        assert_eq!("Basic".parse::<ResearchDepth>(), Ok(ResearchDepth::Basic));
        assert_eq!(
            " COMPREHENSIVE ".parse::<ResearchDepth>(),
            Ok(ResearchDepth::Comprehensive)
        );
        assert!("deep".parse::<ResearchDepth>().is_err());
    }

    #[test]
    fn test_depth_cycles() {
        let mut depth = ResearchDepth::Basic;
        for _ in 0..3 {
            depth = depth.next();
        }
        assert_eq!(depth, ResearchDepth::Basic);
        assert_eq!(ResearchDepth::Basic.previous(), ResearchDepth::Comprehensive);
    }

    #[test]
    fn test_config_without_depth_deserializes_to_standard() {
        let json = r#"{"topic":"t","target_audience":"a"}"#;
        let config: ResearchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.research_depth, ResearchDepth::Standard);
        assert!(config.competitor_domains.is_empty());
    }

    #[test]
    fn test_response_without_reports_is_empty() {
        let response: MarketResearchResponse =
            serde_json::from_str(r#"{"result": {"ok": true}}"#).unwrap();
        assert!(response.research_reports.is_empty());
        assert!(response.result.is_some());
    }
}
