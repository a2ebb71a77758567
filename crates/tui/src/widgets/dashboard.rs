//! Stage table and overall progress gauge.
//!
//! One row per pipeline stage with its derived status and a progress bar.
//! Before any run starts every stage shows as pending.

use cp_protocol::run_models::{PipelineRun, Stage, StageStatus};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Row, Table};
use ratatui::Frame;

const BAR_WIDTH: usize = 20;

/// Renders the stage table with the overall gauge underneath.
pub fn render_dashboard(frame: &mut Frame, area: Rect, run: Option<&PipelineRun>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(3)])
        .split(area);

    render_stage_table(frame, chunks[0], run);
    render_overall_gauge(frame, chunks[1], run);
}

fn render_stage_table(frame: &mut Frame, area: Rect, run: Option<&PipelineRun>) {
    let rows: Vec<Row> = Stage::ALL
        .iter()
        .map(|stage| {
            let status = status_of(run, *stage);
            Row::new(vec![
                Cell::from(stage.display_name()),
                Cell::from(status.as_str()).style(status_style(status)),
                Cell::from(progress_bar(status.progress(), BAR_WIDTH)),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("Agent"),
        Cell::from("Status"),
        Cell::from("Progress"),
    ])
    .style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Cyan),
    );

    let widths = [
        Constraint::Length(20),
        Constraint::Length(13),
        Constraint::Min(BAR_WIDTH as u16 + 6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Pipeline Stages")
            .style(Style::default().fg(Color::White)),
    );

    frame.render_widget(table, area);
}

fn render_overall_gauge(frame: &mut Frame, area: Rect, run: Option<&PipelineRun>) {
    let percent = overall_progress(run);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Overall"))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .percent(percent);
    frame.render_widget(gauge, area);
}

fn status_of(run: Option<&PipelineRun>, stage: Stage) -> StageStatus {
    run.map_or(StageStatus::Pending, |run| run.status_of(stage))
}

pub fn status_style(status: StageStatus) -> Style {
    match status {
        StageStatus::Pending => Style::default().fg(Color::DarkGray),
        StageStatus::InProgress => Style::default().fg(Color::Yellow),
        StageStatus::Completed => Style::default().fg(Color::Green),
        StageStatus::Failed => Style::default().fg(Color::Red),
    }
}

/// Mean of the per-stage progress hints.
pub fn overall_progress(run: Option<&PipelineRun>) -> u16 {
    let total: u16 = Stage::ALL
        .iter()
        .map(|stage| status_of(run, *stage).progress())
        .sum();
    total / Stage::ALL.len() as u16
}

/// `[██████░░░░]  50%`
pub fn progress_bar(percent: u16, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(run: Option<&PipelineRun>) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_dashboard(frame, frame.area(), run))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_without_run_shows_all_pending() {
        let content = render(None);

        assert!(content.contains("Pipeline Stages"));
        for stage in Stage::ALL {
            assert!(content.contains(stage.display_name()));
        }
        assert!(content.contains("pending"));
        assert!(!content.contains("completed"));
    }

    #[test]
    fn test_render_shows_in_progress_stage() {
        let mut run = PipelineRun::new();
        run.in_progress.set(Stage::Research, true);

        let content = render(Some(&run));
        assert!(content.contains("in-progress"));
        assert!(content.contains(" 50%"));
    }

    #[test]
    fn test_failed_stage_is_red() {
        let mut run = PipelineRun::new();
        run.failed.set(Stage::Research, true);

        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_dashboard(frame, frame.area(), Some(&run)))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let found_red = buffer.content().iter().any(|cell| cell.fg == Color::Red);
        assert!(found_red, "failed stage should be rendered in red");
    }

    #[test]
    fn test_overall_progress() {
        assert_eq!(overall_progress(None), 0);

        let mut run = PipelineRun::new();
        run.video_generated = true;
        run.podcast_generated = true;
        assert_eq!(overall_progress(Some(&run)), 50);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "[░░░░]   0%");
        assert_eq!(progress_bar(50, 4), "[██░░]  50%");
        assert_eq!(progress_bar(100, 4), "[████] 100%");
    }
}
