//! Pipeline run state transitions.
//!
//! Every change to a [`PipelineRun`] goes through one of these functions,
//! which update the run's flags and emit the matching events. Status events
//! always carry the status derived from the run after the change.

use cp_protocol::ipc::Event;
use cp_protocol::planning_models::ContentPlan;
use cp_protocol::run_models::{Notification, PipelineRun, Severity, Stage};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::mpsc::Sender;

/// Create a new, empty run.
pub fn create_run() -> PipelineRun {
    PipelineRun::new()
}

async fn emit_status(run: &PipelineRun, events_tx: &Sender<Event>, stage: Stage) {
    let _ = events_tx
        .send(Event::StageStatusUpdate {
            run_id: run.id,
            stage,
            status: run.status_of(stage),
        })
        .await;
}

/// Record a notification on the run, log it, and emit it.
pub async fn notify(run: &mut PipelineRun, events_tx: &Sender<Event>, notification: Notification) {
    match notification.severity {
        Severity::Destructive => tracing::error!(
            run_id = %run.id,
            title = %notification.title,
            "{}",
            notification.description
        ),
        Severity::Info | Severity::Success => tracing::info!(
            run_id = %run.id,
            title = %notification.title,
            "{}",
            notification.description
        ),
    }

    run.notifications.push(notification.clone());
    let _ = events_tx
        .send(Event::Notification {
            run_id: run.id,
            notification,
        })
        .await;
}

/// Mark a stage as in progress.
///
/// Clears any earlier failure of the same stage.
pub async fn begin_stage(run: &mut PipelineRun, events_tx: &Sender<Event>, stage: Stage) {
    run.failed.set(stage, false);
    run.in_progress.set(stage, true);
    tracing::debug!(run_id = %run.id, %stage, "stage started");
    emit_status(run, events_tx, stage).await;
}

/// Mark a stage as no longer running after its result was stored.
pub async fn complete_stage(run: &mut PipelineRun, events_tx: &Sender<Event>, stage: Stage) {
    run.in_progress.set(stage, false);
    tracing::debug!(run_id = %run.id, %stage, "stage completed");
    emit_status(run, events_tx, stage).await;
}

/// Mark a stage as failed.
pub async fn fail_stage(
    run: &mut PipelineRun,
    events_tx: &Sender<Event>,
    stage: Stage,
    error: &str,
) {
    run.in_progress.set(stage, false);
    run.failed.set(stage, true);
    tracing::error!(run_id = %run.id, %stage, error, "stage failed");
    emit_status(run, events_tx, stage).await;
}

/// Store the research stage's reports and publish them.
pub async fn store_research_reports(
    run: &mut PipelineRun,
    events_tx: &Sender<Event>,
    reports: BTreeMap<String, Value>,
) {
    run.research_reports = Some(reports.clone());
    let _ = events_tx
        .send(Event::ResearchReportsReady {
            run_id: run.id,
            reports,
        })
        .await;
}

/// Store the content planning stage's plan and publish it.
pub async fn store_content_plan(
    run: &mut PipelineRun,
    events_tx: &Sender<Event>,
    plan: ContentPlan,
) {
    run.content_plan = Some(plan.clone());
    let _ = events_tx
        .send(Event::ContentPlanReady {
            run_id: run.id,
            plan,
        })
        .await;
}

/// Store the payload a media stage received and publish it.
///
/// Research and planning have their own results; for them this is a no-op.
pub async fn store_media_output(
    run: &mut PipelineRun,
    events_tx: &Sender<Event>,
    stage: Stage,
    output: Value,
) {
    if !run.set_media_output(stage, output.clone()) {
        return;
    }
    tracing::debug!(run_id = %run.id, %stage, "media output stored");
    let _ = events_tx
        .send(Event::MediaReady {
            run_id: run.id,
            stage,
            output,
        })
        .await;
}

/// Record that a media stage produced its output.
///
/// Research and planning store real results instead; for them this is a
/// no-op.
pub fn mark_generated(run: &mut PipelineRun, stage: Stage) {
    match stage {
        Stage::VideoGeneration => run.video_generated = true,
        Stage::PodcastGeneration => run.podcast_generated = true,
        Stage::Research | Stage::ContentPlanning => {}
    }
}
