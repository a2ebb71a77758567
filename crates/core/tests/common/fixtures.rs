//! Test fixtures for research configs, backend payloads and projects.

use cp_core::config::CONFIG_DIR;
use cp_protocol::research_models::{ResearchConfig, ResearchDepth};
use serde_json::{json, Value};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn research_config() -> ResearchConfig {
    ResearchConfig {
        topic: "AI_in_Healthcare".to_string(),
        target_audience: "Doctors".to_string(),
        competitor_domains: vec!["example.com".to_string()],
        research_depth: ResearchDepth::Standard,
    }
}

/// Body returned by a successful `/api/market-research`.
#[allow(dead_code)]
pub fn research_response() -> Value {
    json!({
        "research_reports": {
            "market_analysis.md": "# Market\nGrowing fast.",
            "competitors.json": { "example.com": { "share": 0.4 } }
        },
        "result": { "status": "ok" }
    })
}

/// Body returned by a successful `/api/content-planning`.
#[allow(dead_code)]
pub fn planning_response() -> Value {
    json!({
        "plan_id": "plan-0123456789abcdef",
        "state": "COMPLETE",
        "plan_run_inputs": {
            "publishing_frequency": { "value": "3x per week" },
            "brand_guidelines": { "value": "Evidence-based" },
            "content_goals": { "value": "Thought leadership" }
        },
        "content_plans": {
            "content_calendar.md": "# Calendar",
            "strategy.json": { "pillars": ["trust", "evidence"] }
        }
    })
}

/// Body returned by a successful `/api/video-production`.
#[allow(dead_code)]
pub fn video_production_response() -> Value {
    json!({
        "result": { "status": "ok" },
        "video_link": "https://ai.invideo.io/watch/abc123",
        "video_production_files": {
            "storyboard.json": { "scenes": 4 }
        }
    })
}

/// Body returned by a successful `/api/podcast-production`.
#[allow(dead_code)]
pub fn podcast_production_response() -> Value {
    json!({
        "result": { "status": "ok" },
        "podcast_episodes": {
            "episode_1.md": "# Episode 1"
        }
    })
}

/// A project whose config points at `base_url` and runs media stages
/// without delay.
#[allow(dead_code)]
pub fn create_test_project(base_url: &str, mode: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let cp_dir = temp_dir.path().join(CONFIG_DIR);
    std::fs::create_dir_all(&cp_dir)?;

    let config = format!(
        r#"
[backend]
base_url = "{base_url}"
timeout_secs = 5

[generation]
mode = "{mode}"
video_delay_ms = 0
podcast_delay_ms = 0

[output]
reports_dir = "out"
"#
    );
    std::fs::write(cp_dir.join("config.toml"), config)?;

    Ok(temp_dir)
}
