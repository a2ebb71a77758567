//! Session manager for the dashboard.
//!
//! The SessionManager sits between the dashboard and the engine. It accepts
//! [`Op`]s, starts at most one pipeline run at a time in the background,
//! keeps the last finished run, and saves reports on request.

use crate::backend::BackendResult;
use crate::config::models::AppConfig;
use crate::engine::PipelineEngine;
use crate::export;
use crate::state::run::create_run;
use cp_protocol::ipc::{Event, Op};
use cp_protocol::research_models::ResearchConfig;
use cp_protocol::run_models::{Notification, PipelineRun};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

pub struct SessionManager {
    engine: Arc<PipelineEngine>,

    /// Where saved reports go.
    reports_dir: PathBuf,

    /// Channel for sending events to the UI.
    events_tx: mpsc::Sender<Event>,

    /// Id of the run currently executing, if any.
    active: Arc<Mutex<Option<Uuid>>>,

    /// The most recent run that reached its end.
    last_run: Arc<Mutex<Option<PipelineRun>>>,

    task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    /// Create a new SessionManager.
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine that executes runs
    /// * `reports_dir` - Directory for saved reports
    /// * `events_tx` - Channel for sending events to the UI
    pub fn new(
        engine: PipelineEngine,
        reports_dir: PathBuf,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            reports_dir,
            events_tx,
            active: Arc::new(Mutex::new(None)),
            last_run: Arc::new(Mutex::new(None)),
            task: Mutex::new(None),
        }
    }

    /// Build the engine from `config`.
    pub fn from_config(
        config: &AppConfig,
        events_tx: mpsc::Sender<Event>,
    ) -> BackendResult<Self> {
        let engine = PipelineEngine::from_config(config)?;
        Ok(Self::new(engine, config.reports_dir(), events_tx))
    }

    /// Start a pipeline run in the background.
    ///
    /// Returns the new run's id, or `None` when a run is already in
    /// progress. A rejected start is reported to the UI as a notification
    /// on the active run.
    pub async fn start_pipeline(&self, config: ResearchConfig) -> Option<Uuid> {
        let mut active = self.active.lock().await;
        if let Some(run_id) = *active {
            tracing::warn!(%run_id, "start rejected, a run is already in progress");
            let _ = self
                .events_tx
                .send(Event::Notification {
                    run_id,
                    notification: Notification::destructive(
                        "Pipeline Busy",
                        "A pipeline run is already in progress. Wait for it to finish before starting another.",
                    ),
                })
                .await;
            return None;
        }

        let run = create_run();
        let run_id = run.id;
        *active = Some(run_id);
        drop(active);

        let engine = Arc::clone(&self.engine);
        let events_tx = self.events_tx.clone();
        let active = Arc::clone(&self.active);
        let last_run = Arc::clone(&self.last_run);

        let handle = tokio::spawn(async move {
            let finished = engine.run(run, &config, &events_tx).await;
            *last_run.lock().await = Some(finished);
            *active.lock().await = None;
        });
        *self.task.lock().await = Some(handle);

        Some(run_id)
    }

    /// Save one report and tell the UI how it went.
    pub async fn save_report(&self, filename: String, content: Value) {
        let dir = self.reports_dir.clone();
        let name = filename.clone();
        let result =
            tokio::task::spawn_blocking(move || export::save_report(&dir, &name, &content)).await;

        let event = match result {
            Ok(Ok(path)) => Event::ReportSaved { filename, path },
            Ok(Err(e)) => {
                tracing::error!(%filename, error = %e, "failed to save report");
                Event::ReportSaveFailed {
                    filename,
                    error: e.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(%filename, error = %e, "report writer task failed");
                Event::ReportSaveFailed {
                    filename,
                    error: e.to_string(),
                }
            }
        };
        let _ = self.events_tx.send(event).await;
    }

    /// Handle operations until `Shutdown` or the sender goes away.
    pub async fn serve(&self, mut op_rx: mpsc::Receiver<Op>) {
        while let Some(op) = op_rx.recv().await {
            match op {
                Op::StartPipeline { config } => {
                    self.start_pipeline(config).await;
                }
                Op::SaveReport { filename, content } => {
                    self.save_report(filename, content).await;
                }
                Op::Shutdown => {
                    tracing::debug!("session shutting down");
                    break;
                }
            }
        }
    }

    /// Wait for the current run, if any, to reach its end.
    pub async fn wait(&self) {
        let handle = self.task.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "pipeline task failed");
            }
        }
    }

    pub async fn is_running(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// A copy of the most recent finished run.
    pub async fn last_run(&self) -> Option<PipelineRun> {
        self.last_run.lock().await.clone()
    }

    pub fn reports_dir(&self) -> &PathBuf {
        &self.reports_dir
    }
}
