//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that manages the dashboard
//! state and the event loop using `tokio::select!`.

use anyhow::Result;
use cp_protocol::ipc::{Event, Op, RunOutcome};
use cp_protocol::research_models::ResearchConfig;
use cp_protocol::run_models::Notification;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_stream::StreamExt;

use crate::event_handler::{self, DashboardState, KeyAction};
use crate::tui::{Tui, TuiEvent};
use crate::widgets::dashboard::render_dashboard;
use crate::widgets::notifications::render_notifications;
use crate::widgets::{FormOutcome, ResearchFormView, ResultsView};

const KEY_HINTS: &str = "n new run · ↑/↓ select · d save · a save all · q quit";
const FORM_HINTS: &str = "Tab next field · ←/→ depth · Enter start · Esc cancel";

pub struct App {
    pub state: DashboardState,
    /// The research form, while it is open.
    pub form: Option<ResearchFormView>,
    pub results: ResultsView,
    /// Channel to send operations to the core.
    pub op_tx: Sender<Op>,
    /// Channel to receive events from the core.
    pub event_rx: Receiver<Event>,
    pub should_exit: bool,
}

impl App {
    pub fn new(op_tx: Sender<Op>, event_rx: Receiver<Event>) -> Self {
        Self {
            state: DashboardState::default(),
            form: None,
            results: ResultsView::new(),
            op_tx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle terminal input and core events concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();
        let frames = tui.frame_requester();

        frames.schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event);
                    frames.schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    match tui_event {
                        TuiEvent::Key(key) => {
                            self.handle_key_event(key);
                            frames.schedule_frame();
                        }
                        TuiEvent::Paste(text) => {
                            if let Some(form) = self.form.as_mut() {
                                form.paste(&text);
                                frames.schedule_frame();
                            }
                        }
                        TuiEvent::Draw => {
                            tui.draw(|frame| self.render(frame))?;
                        }
                    }
                }
                else => break,
            }
        }

        Ok(())
    }

    fn handle_core_event(&mut self, event: Event) {
        if matches!(event, Event::RunStarted { .. }) {
            self.results.reset();
        }
        event_handler::handle_core_event(&mut self.state, event);
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_exit = true;
            return;
        }

        if let Some(form) = self.form.as_mut() {
            let mut submitted = None;
            let (_, outcome) = form.handle_key_event(key, |config| submitted = Some(config));
            match outcome {
                FormOutcome::Editing => {}
                FormOutcome::Submitted | FormOutcome::Cancelled => self.form = None,
            }
            if let Some(config) = submitted {
                self.start_pipeline(config);
            }
            return;
        }

        match event_handler::handle_keyboard_event(
            key,
            &mut self.state,
            &mut self.results,
            &self.op_tx,
        ) {
            KeyAction::Continue => {}
            KeyAction::Quit => self.should_exit = true,
            KeyAction::OpenForm => self.form = Some(ResearchFormView::new()),
        }
    }

    fn start_pipeline(&mut self, config: ResearchConfig) {
        tracing::info!(topic = %config.topic, "starting pipeline from dashboard");
        if let Err(e) = self.op_tx.try_send(Op::StartPipeline { config }) {
            tracing::error!(error = %e, "could not queue pipeline start");
            self.state.push_notification(Notification::destructive(
                "Pipeline Not Started",
                format!("Could not reach the session: {e}"),
            ));
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(10),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        render_dashboard(frame, chunks[1], self.state.run.as_ref());

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        self.results
            .render(frame, panels[0], self.state.run.as_ref());
        render_notifications(frame, panels[1], &self.state.notifications);

        let hints = if self.form.is_some() {
            FORM_HINTS
        } else {
            KEY_HINTS
        };
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        );

        if let Some(form) = &self.form {
            form.render(area, frame.buffer_mut());
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let (status, color) = match (self.state.running, self.state.outcome) {
            (true, _) => ("running".to_string(), Color::Yellow),
            (false, Some(RunOutcome::Finished)) => ("finished".to_string(), Color::Green),
            (false, Some(RunOutcome::Halted { stage })) => {
                (format!("halted at {}", stage.display_name()), Color::Red)
            }
            (false, None) => ("idle".to_string(), Color::DarkGray),
        };

        let mut spans = vec![Span::styled(
            status,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if let (Some(topic), Some(audience)) = (&self.state.topic, &self.state.target_audience) {
            spans.push(Span::raw(format!("  {topic} for {audience}")));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Content Pipeline"),
        );
        frame.render_widget(paragraph, area);
    }
}
