//! Runtime pipeline run state models.
//!
//! A [`PipelineRun`] holds everything one pass through the pipeline has
//! produced so far. Stage status is never stored; it is derived from the
//! run's flags every time it is asked for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::planning_models::ContentPlan;

/// The four pipeline stages, in execution order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Research,
    ContentPlanning,
    VideoGeneration,
    PodcastGeneration,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Research,
        Stage::ContentPlanning,
        Stage::VideoGeneration,
        Stage::PodcastGeneration,
    ];

    /// Name shown on the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Research => "Research Agent",
            Stage::ContentPlanning => "Content Planner",
            Stage::VideoGeneration => "Video Generation",
            Stage::PodcastGeneration => "Podcast Generation",
        }
    }

    /// Short label used in notifications ("Research Started", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Research => "Research",
            Stage::ContentPlanning => "Content Planning",
            Stage::VideoGeneration => "Video Generation",
            Stage::PodcastGeneration => "Podcast Generation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived status of a stage.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    /// Not started yet, or not reached because an earlier stage halted.
    Pending,

    InProgress,

    /// The stage produced its result.
    Completed,

    /// The last attempt failed. Only research and content planning can
    /// fail with the simulated generators.
    Failed,
}

impl StageStatus {
    /// Progress hint for a gauge, in percent.
    pub fn progress(&self) -> u16 {
        match self {
            StageStatus::InProgress => 50,
            StageStatus::Completed => 100,
            StageStatus::Pending | StageStatus::Failed => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::InProgress => "in-progress",
            StageStatus::Completed => "completed",
            StageStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One boolean per stage.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
pub struct StageFlags {
    pub research: bool,
    pub content_planning: bool,
    pub video_generation: bool,
    pub podcast_generation: bool,
}

impl StageFlags {
    pub fn get(&self, stage: Stage) -> bool {
        match stage {
            Stage::Research => self.research,
            Stage::ContentPlanning => self.content_planning,
            Stage::VideoGeneration => self.video_generation,
            Stage::PodcastGeneration => self.podcast_generation,
        }
    }

    pub fn set(&mut self, stage: Stage, value: bool) {
        match stage {
            Stage::Research => self.research = value,
            Stage::ContentPlanning => self.content_planning = value,
            Stage::VideoGeneration => self.video_generation = value,
            Stage::PodcastGeneration => self.podcast_generation = value,
        }
    }

    /// Stages whose flag is set, in execution order.
    pub fn stages(&self) -> Vec<Stage> {
        Stage::ALL.into_iter().filter(|s| self.get(*s)).collect()
    }
}

/// How a user-facing notification should be presented.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    /// A failure the viewer has to act on.
    Destructive,
}

/// A user-facing notification (the dashboard's toast).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[ts(type = "string")]
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            at: Utc::now(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Destructive)
    }
}

/// The state of one pass through the pipeline.
///
/// Created empty when a session starts and only mutated by the
/// orchestrator. Nothing here is persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PipelineRun {
    #[ts(type = "string")]
    pub id: Uuid,

    #[ts(type = "string")]
    pub started_at: DateTime<Utc>,

    /// Reports returned by the research stage, keyed by filename.
    #[ts(type = "Record<string, unknown> | null")]
    pub research_reports: Option<BTreeMap<String, Value>>,

    /// Plan returned by the content planning stage.
    pub content_plan: Option<ContentPlan>,

    pub video_generated: bool,
    pub podcast_generated: bool,

    /// Response of the video production endpoint, when generation is remote.
    #[serde(default)]
    #[ts(type = "unknown")]
    pub video_output: Option<Value>,

    /// Response of the podcast production endpoint, when generation is remote.
    #[serde(default)]
    #[ts(type = "unknown")]
    pub podcast_output: Option<Value>,

    /// Stages currently running.
    pub in_progress: StageFlags,

    /// Stages whose last attempt failed.
    pub failed: StageFlags,

    /// Every notification emitted for this run, oldest first.
    pub notifications: Vec<Notification>,
}

impl PipelineRun {
    /// An empty run: nothing started, nothing produced.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            research_reports: None,
            content_plan: None,
            video_generated: false,
            podcast_generated: false,
            video_output: None,
            podcast_output: None,
            in_progress: StageFlags::default(),
            failed: StageFlags::default(),
            notifications: Vec::new(),
        }
    }

    /// Whether the stage has produced its result.
    pub fn has_result(&self, stage: Stage) -> bool {
        match stage {
            Stage::Research => self.research_reports.is_some(),
            Stage::ContentPlanning => self.content_plan.is_some(),
            Stage::VideoGeneration => self.video_generated,
            Stage::PodcastGeneration => self.podcast_generated,
        }
    }

    /// Payload a media stage received from the backend, if any.
    pub fn media_output(&self, stage: Stage) -> Option<&Value> {
        match stage {
            Stage::VideoGeneration => self.video_output.as_ref(),
            Stage::PodcastGeneration => self.podcast_output.as_ref(),
            Stage::Research | Stage::ContentPlanning => None,
        }
    }

    /// Store a media stage's payload. Returns false for stages without one.
    pub fn set_media_output(&mut self, stage: Stage, output: Value) -> bool {
        match stage {
            Stage::VideoGeneration => self.video_output = Some(output),
            Stage::PodcastGeneration => self.podcast_output = Some(output),
            Stage::Research | Stage::ContentPlanning => return false,
        }
        true
    }

    /// Link to the finished video, when the production endpoint found one.
    pub fn video_link(&self) -> Option<&str> {
        self.video_output.as_ref().and_then(video_link)
    }

    /// Derive the status of a stage from the run's flags.
    pub fn status_of(&self, stage: Stage) -> StageStatus {
        if self.in_progress.get(stage) {
            StageStatus::InProgress
        } else if self.has_result(stage) {
            StageStatus::Completed
        } else if self.failed.get(stage) {
            StageStatus::Failed
        } else {
            StageStatus::Pending
        }
    }

    /// Status of every stage, in execution order.
    pub fn statuses(&self) -> [(Stage, StageStatus); 4] {
        Stage::ALL.map(|stage| (stage, self.status_of(stage)))
    }

    /// True once every stage has completed.
    pub fn is_complete(&self) -> bool {
        Stage::ALL.iter().all(|s| self.has_result(*s))
    }
}

/// The `video_link` field of a video production response.
///
/// The endpoint sends `null` when it could not find a link; blank strings
/// count as missing too.
pub fn video_link(output: &Value) -> Option<&str> {
    output
        .get("video_link")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|link| !link.is_empty())
}

impl Default for PipelineRun {
    fn default() -> Self {
        Self::new()
    }
}
