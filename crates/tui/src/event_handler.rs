//! Event handling utilities for the TUI.
//!
//! This module applies core events to the dashboard's copy of the run and
//! maps dashboard key presses (outside the research form) to actions.

use crate::widgets::results_view::ResultsView;
use cp_core::export::result_files;
use cp_core::state::run::mark_generated;
use cp_protocol::ipc::{Event, Op, RunOutcome};
use cp_protocol::run_models::{Notification, PipelineRun, StageStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::Sender;

/// Everything the dashboard knows about the current session.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Mirror of the run the core is executing (or last executed).
    pub run: Option<PipelineRun>,
    pub topic: Option<String>,
    pub target_audience: Option<String>,
    pub running: bool,
    pub outcome: Option<RunOutcome>,
    /// Notifications in arrival order.
    pub notifications: Vec<Notification>,
}

impl DashboardState {
    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// What the app should do after a dashboard key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
    OpenForm,
}

/// Handle an event received from the core.
pub fn handle_core_event(state: &mut DashboardState, event: Event) {
    match event {
        Event::RunStarted {
            run_id,
            topic,
            target_audience,
        } => {
            let mut run = PipelineRun::new();
            run.id = run_id;
            state.run = Some(run);
            state.topic = Some(topic);
            state.target_audience = Some(target_audience);
            state.running = true;
            state.outcome = None;
        }
        Event::StageStatusUpdate {
            run_id,
            stage,
            status,
        } => {
            let Some(run) = current_run(state, run_id) else {
                return;
            };
            match status {
                StageStatus::InProgress => {
                    run.in_progress.set(stage, true);
                    run.failed.set(stage, false);
                }
                StageStatus::Completed => {
                    run.in_progress.set(stage, false);
                    run.failed.set(stage, false);
                    mark_generated(run, stage);
                }
                StageStatus::Failed => {
                    run.in_progress.set(stage, false);
                    run.failed.set(stage, true);
                }
                StageStatus::Pending => {
                    run.in_progress.set(stage, false);
                }
            }
        }
        Event::Notification { notification, .. } => {
            state.push_notification(notification);
        }
        Event::ResearchReportsReady { run_id, reports } => {
            if let Some(run) = current_run(state, run_id) {
                run.research_reports = Some(reports);
            }
        }
        Event::ContentPlanReady { run_id, plan } => {
            if let Some(run) = current_run(state, run_id) {
                run.content_plan = Some(plan);
            }
        }
        Event::MediaReady {
            run_id,
            stage,
            output,
        } => {
            if let Some(run) = current_run(state, run_id) {
                run.set_media_output(stage, output);
            }
        }
        Event::RunFinished { run_id, outcome } => {
            if current_run(state, run_id).is_some() {
                state.running = false;
                state.outcome = Some(outcome);
            }
        }
        Event::ReportSaved { filename, path } => {
            state.push_notification(Notification::success(
                "Report Saved",
                format!("{filename} saved to {}", path.display()),
            ));
        }
        Event::ReportSaveFailed { filename, error } => {
            state.push_notification(Notification::destructive(
                "Save Failed",
                format!("Could not save {filename}: {error}"),
            ));
        }
    }
}

fn current_run(state: &mut DashboardState, run_id: uuid::Uuid) -> Option<&mut PipelineRun> {
    state.run.as_mut().filter(|run| run.id == run_id)
}

/// Handle a dashboard key press while the research form is closed.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    state: &mut DashboardState,
    results: &mut ResultsView,
    op_tx: &Sender<Op>,
) -> KeyAction {
    if key_event.kind != KeyEventKind::Press {
        return KeyAction::Continue;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('n') => {
            if state.running {
                state.push_notification(Notification::info(
                    "Pipeline Running",
                    "Wait for the current run to finish before starting a new one.",
                ));
            } else {
                return KeyAction::OpenForm;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => results.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => {
            let len = state.run.as_ref().map_or(0, |run| result_files(run).len());
            results.select_next(len);
        }
        KeyCode::Enter | KeyCode::Char('d') => save_selected(state, results, op_tx),
        KeyCode::Char('a') => save_all(state, op_tx),
        _ => {}
    }

    KeyAction::Continue
}

fn save_selected(state: &mut DashboardState, results: &ResultsView, op_tx: &Sender<Op>) {
    let Some(file) = results.selected_file(state.run.as_ref()) else {
        return;
    };
    request_save(state, op_tx, file.filename, file.content);
}

fn save_all(state: &mut DashboardState, op_tx: &Sender<Op>) {
    let files = state.run.as_ref().map(result_files).unwrap_or_default();
    for file in files {
        request_save(state, op_tx, file.filename, file.content);
    }
}

fn request_save(
    state: &mut DashboardState,
    op_tx: &Sender<Op>,
    filename: String,
    content: serde_json::Value,
) {
    if let Err(e) = op_tx.try_send(Op::SaveReport {
        filename: filename.clone(),
        content,
    }) {
        tracing::warn!(%filename, error = %e, "could not queue save request");
        state.push_notification(Notification::destructive(
            "Save Failed",
            format!("Could not queue {filename}: {e}"),
        ));
    }
}
