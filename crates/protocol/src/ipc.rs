//! Communication protocol between the dashboard and the core.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from the dashboard to the core
//! - `Event`: Status updates sent from the core to the dashboard
//!
//! Communication is asynchronous and channel-based, so the dashboard stays
//! responsive while a stage is waiting on the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use ts_rs::TS;
use uuid::Uuid;

use crate::planning_models::ContentPlan;
use crate::research_models::ResearchConfig;
use crate::run_models::{Notification, Stage, StageStatus};

/// Operations sent from the dashboard to the core.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "startPipeline",
///   "payload": {
///     "config": { "topic": "AI_in_Healthcare", "target_audience": "Doctors" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Run the whole pipeline for a validated research configuration.
    StartPipeline { config: ResearchConfig },

    /// Save a stage result into the reports directory.
    SaveReport {
        filename: String,
        #[ts(type = "unknown")]
        content: Value,
    },

    /// Shut down the core loop.
    Shutdown,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RunOutcome {
    /// Every stage reached its end.
    Finished,

    /// The chain stopped at the given stage.
    Halted { stage: Stage },
}

/// Events sent from the core to the dashboard.
///
/// ```json
/// {
///   "type": "stageStatusUpdate",
///   "payload": {
///     "run_id": "uuid-here",
///     "stage": "research",
///     "status": "in-progress"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A new run has been started.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        topic: String,
        target_audience: String,
    },

    /// A stage's derived status has changed.
    StageStatusUpdate {
        #[ts(type = "string")]
        run_id: Uuid,
        stage: Stage,
        status: StageStatus,
    },

    /// A user-facing notification.
    Notification {
        #[ts(type = "string")]
        run_id: Uuid,
        notification: Notification,
    },

    /// The research stage produced its reports.
    ResearchReportsReady {
        #[ts(type = "string")]
        run_id: Uuid,
        #[ts(type = "Record<string, unknown>")]
        reports: BTreeMap<String, Value>,
    },

    /// The content planning stage produced its plan.
    ContentPlanReady {
        #[ts(type = "string")]
        run_id: Uuid,
        plan: ContentPlan,
    },

    /// A media stage received a payload from the production endpoint.
    MediaReady {
        #[ts(type = "string")]
        run_id: Uuid,
        stage: Stage,
        #[ts(type = "unknown")]
        output: Value,
    },

    /// The run is over, successfully or not.
    RunFinished {
        #[ts(type = "string")]
        run_id: Uuid,
        outcome: RunOutcome,
    },

    /// A report was written to disk.
    ReportSaved { filename: String, path: PathBuf },

    /// Saving a report failed.
    ReportSaveFailed { filename: String, error: String },
}
