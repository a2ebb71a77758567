//! Notification feed, newest first.

use cp_protocol::run_models::{Notification, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_notifications(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
    let block = Block::default().borders(Borders::ALL).title("Notifications");

    if notifications.is_empty() {
        let paragraph = Paragraph::new("Nothing yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines = Vec::new();
    for notification in notifications.iter().rev() {
        let color = severity_color(notification.severity);
        lines.push(Line::from(vec![
            Span::styled(
                notification.at.format("%H:%M:%S ").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                notification.title.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::raw(format!(
            "  {}",
            notification.description
        ))));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Destructive => Color::Red,
    }
}
