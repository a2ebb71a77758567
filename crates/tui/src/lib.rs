//! # cp-tui
//!
//! Terminal dashboard for content-pipeline.
//!
//! The dashboard collects a research configuration, shows each pipeline
//! stage's status as the run progresses, and saves the resulting reports.
//! It talks to `cp-core` through channels using the `Op` and `Event`
//! protocol defined in `cp-protocol`.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use anyhow::Result;
use cp_core::config::models::AppConfig;
use cp_core::state::manager::SessionManager;
use cp_protocol::ipc::Op;
use std::sync::Arc;
use tokio::sync::mpsc;

const OP_CHANNEL_CAPACITY: usize = 32;
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Run the dashboard until the user quits.
pub async fn run_app(config: AppConfig) -> Result<()> {
    let (op_tx, op_rx) = mpsc::channel(OP_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

    let manager = Arc::new(SessionManager::from_config(&config, event_tx)?);
    let session = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.serve(op_rx).await })
    };
    tracing::info!(
        backend = %config.global.backend.base_url,
        reports_dir = %manager.reports_dir().display(),
        "dashboard starting"
    );

    let mut tui = Tui::init()?;
    let mut app = App::new(op_tx.clone(), event_rx);
    let result = app.run(&mut tui).await;
    tui.restore()?;

    let _ = op_tx.send(Op::Shutdown).await;
    if let Err(e) = session.await {
        tracing::error!(error = %e, "session task failed");
    }

    result
}
