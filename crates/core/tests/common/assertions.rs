//! Event helpers for integration tests.

use cp_protocol::ipc::{Event, RunOutcome};
use cp_protocol::run_models::{Stage, StageStatus};
use std::time::Duration;
use tokio::sync::mpsc;

/// Collect events until RunFinished arrives or `timeout` passes.
#[allow(dead_code)]
pub async fn collect_until_finished(
    rx: &mut mpsc::Receiver<Event>,
    timeout: Duration,
) -> Vec<Event> {
    let mut events = Vec::new();
    let deadline = tokio::time::Instant::now() + timeout;

    while let Ok(Some(event)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        let done = matches!(event, Event::RunFinished { .. });
        events.push(event);
        if done {
            break;
        }
    }

    events
}

/// Whether `stage` was ever reported in progress.
#[allow(dead_code)]
pub fn stage_started(events: &[Event], stage: Stage) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            Event::StageStatusUpdate { stage: s, status: StageStatus::InProgress, .. } if *s == stage
        )
    })
}

/// The last status reported for `stage`.
#[allow(dead_code)]
pub fn last_status(events: &[Event], stage: Stage) -> Option<StageStatus> {
    events.iter().rev().find_map(|e| match e {
        Event::StageStatusUpdate {
            stage: s, status, ..
        } if *s == stage => Some(*status),
        _ => None,
    })
}

#[allow(dead_code)]
pub fn outcome(events: &[Event]) -> Option<RunOutcome> {
    events.iter().find_map(|e| match e {
        Event::RunFinished { outcome, .. } => Some(*outcome),
        _ => None,
    })
}

/// Titles of every notification, in order.
#[allow(dead_code)]
pub fn notification_titles(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Notification { notification, .. } => Some(notification.title.clone()),
            _ => None,
        })
        .collect()
}
