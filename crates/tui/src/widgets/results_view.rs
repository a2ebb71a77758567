//! Results panel: content-plan summary and the list of saveable files.

use cp_core::export::{result_files, ResultFile};
use cp_protocol::planning_models::ContentPlan;
use cp_protocol::run_models::PipelineRun;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Selection state for the file list.
#[derive(Debug, Default)]
pub struct ResultsView {
    pub selected: usize,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move down, stopping at the last of `len` entries.
    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// The file under the cursor.
    pub fn selected_file(&self, run: Option<&PipelineRun>) -> Option<ResultFile> {
        run.and_then(|run| result_files(run).into_iter().nth(self.selected))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, run: Option<&PipelineRun>) {
        let summary = run
            .and_then(|run| run.content_plan.as_ref())
            .map(summary_lines)
            .unwrap_or_default();
        if summary.is_empty() {
            self.render_files(frame, area, run);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(summary.len() as u16 + 2),
                Constraint::Min(3),
            ])
            .split(area);

        let paragraph = Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Content Plan"));
        frame.render_widget(paragraph, chunks[0]);
        self.render_files(frame, chunks[1], run);
    }

    fn render_files(&self, frame: &mut Frame, area: Rect, run: Option<&PipelineRun>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Reports (d save · a save all)");

        let files = run.map(result_files).unwrap_or_default();
        if files.is_empty() {
            let paragraph = Paragraph::new("No reports yet. Press n to start a research run.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = files
            .iter()
            .map(|file| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        file.filename.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", file.description),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut state = ListState::default();
        state.select(Some(self.selected.min(files.len() - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Key details of a plan, each present only when the plan carries it.
pub fn summary_lines(plan: &ContentPlan) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let label = Style::default().fg(Color::Cyan);

    let fields = [
        ("Publishing Frequency", plan.publishing_frequency()),
        ("Brand Guidelines", plan.brand_guidelines()),
        ("Content Goals", plan.content_goals()),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            lines.push(Line::from(vec![
                Span::styled(format!("{name}: "), label),
                Span::raw(value),
            ]));
        }
    }

    if let Some(state) = plan.state() {
        let state_style = if plan.is_complete() {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let mut spans = vec![
            Span::styled("Plan Status: ", label),
            Span::styled(state.to_string(), state_style),
        ];
        if let Some(id) = plan.short_plan_id() {
            spans.push(Span::styled(
                format!("  ID: {id}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn run_with_results() -> PipelineRun {
        let mut run = PipelineRun::new();
        let mut reports = BTreeMap::new();
        reports.insert("market.json".to_string(), json!({ "a": 1 }));
        reports.insert("summary.md".to_string(), json!("# Summary"));
        run.research_reports = Some(reports);
        run.content_plan = Some(ContentPlan::new(json!({
            "plan_id": "plan-abcdefgh12345678",
            "state": "COMPLETE",
            "plan_run_inputs": { "publishing_frequency": { "value": "Daily" } }
        })));
        run
    }

    fn render(view: &ResultsView, run: Option<&PipelineRun>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area(), run))
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
    fn test_empty_state() {
        let content = render(&ResultsView::new(), None);
        assert!(content.contains("No reports yet"));
    }

    #[test]
    fn test_lists_reports_and_summary() {
        let run = run_with_results();
        let content = render(&ResultsView::new(), Some(&run));

        assert!(content.contains("market.json"));
        assert!(content.contains("Market data and analysis"));
        assert!(content.contains("complete_content_plan.json"));
        assert!(content.contains("Publishing Frequency: Daily"));
        assert!(content.contains("COMPLETE"));
        assert!(content.contains("ID: 12345678"));
    }

    #[test]
    fn test_selection_is_bounded() {
        let run = run_with_results();
        let len = result_files(&run).len();
        let mut view = ResultsView::new();

        for _ in 0..10 {
            view.select_next(len);
        }
        assert_eq!(view.selected, len - 1);
        assert_eq!(
            view.selected_file(Some(&run)).map(|f| f.filename),
            Some("complete_content_plan.json".to_string())
        );

        view.select_previous();
        assert_eq!(
            view.selected_file(Some(&run)).map(|f| f.filename),
            Some("summary.md".to_string())
        );
    }

    #[test]
    fn test_summary_skips_missing_fields() {
        let plan = ContentPlan::new(json!({ "state": "RUNNING" }));
        let lines = summary_lines(&plan);
        assert_eq!(lines.len(), 1);
    }
}
