//! Research configuration form, shown as a modal over the dashboard.
//!
//! Wraps [`ResearchForm`] with focus, cursor and rendering. Text fields take
//! typed characters and pastes; the depth field cycles with Left/Right.

use crate::event::EventStatus;
use cp_core::form::{FormField, ResearchForm, ValidationError};
use cp_protocol::research_models::ResearchConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const PLACEHOLDERS: [(FormField, &str); 3] = [
    (FormField::Topic, "e.g. AI_in_Healthcare"),
    (FormField::TargetAudience, "e.g. Doctors"),
    (FormField::CompetitorDomains, "comma separated, optional"),
];

/// What the form wants the app to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// Still editing.
    Editing,
    /// A valid configuration was handed off.
    Submitted,
    /// The user backed out.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ResearchFormView {
    form: ResearchForm,
    focus: FormField,
    /// Cursor position in chars within the focused text field.
    cursor_pos: usize,
    errors: Option<ValidationError>,
}

impl Default for ResearchFormView {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchFormView {
    pub fn new() -> Self {
        Self {
            form: ResearchForm::new(),
            focus: FormField::Topic,
            cursor_pos: 0,
            errors: None,
        }
    }

    pub fn form(&self) -> &ResearchForm {
        &self.form
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn errors(&self) -> Option<&ValidationError> {
        self.errors.as_ref()
    }

    /// Handle a key press. `on_submit` runs only for a valid submission.
    pub fn handle_key_event<F>(&mut self, key: KeyEvent, on_submit: F) -> (EventStatus, FormOutcome)
    where
        F: FnOnce(ResearchConfig),
    {
        if key.kind != KeyEventKind::Press {
            return (EventStatus::NotConsumed, FormOutcome::Editing);
        }

        let outcome = match key.code {
            KeyCode::Esc => FormOutcome::Cancelled,
            KeyCode::Enter => self.submit(on_submit),
            KeyCode::Tab | KeyCode::Down => {
                self.set_focus(self.focus.next());
                FormOutcome::Editing
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.set_focus(self.focus.previous());
                FormOutcome::Editing
            }
            KeyCode::Left => {
                self.move_left();
                FormOutcome::Editing
            }
            KeyCode::Right => {
                self.move_right();
                FormOutcome::Editing
            }
            KeyCode::Backspace => {
                self.delete_char();
                FormOutcome::Editing
            }
            KeyCode::Char(c) => {
                self.insert_char(c);
                FormOutcome::Editing
            }
            _ => return (EventStatus::NotConsumed, FormOutcome::Editing),
        };

        (EventStatus::Consumed, outcome)
    }

    /// Insert pasted text into the focused field. Newlines are dropped.
    pub fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    fn submit<F>(&mut self, on_submit: F) -> FormOutcome
    where
        F: FnOnce(ResearchConfig),
    {
        match self.form.submit(on_submit) {
            Ok(()) => {
                self.errors = None;
                self.set_focus(FormField::Topic);
                FormOutcome::Submitted
            }
            Err(errors) => {
                if let Some(first) = errors.issues.first() {
                    self.set_focus(first.field);
                }
                self.errors = Some(errors);
                FormOutcome::Editing
            }
        }
    }

    fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        self.cursor_pos = self.form.text(field).chars().count();
    }

    fn insert_char(&mut self, c: char) {
        let pos = self.cursor_pos;
        if let Some(text) = self.form.text_mut(self.focus) {
            let idx = byte_index(text, pos);
            text.insert(idx, c);
            self.cursor_pos += 1;
        }
    }

    fn delete_char(&mut self) {
        let pos = self.cursor_pos;
        if pos == 0 {
            return;
        }
        if let Some(text) = self.form.text_mut(self.focus) {
            let idx = byte_index(text, pos - 1);
            text.remove(idx);
            self.cursor_pos -= 1;
        }
    }

    fn move_left(&mut self) {
        if self.focus == FormField::ResearchDepth {
            self.form.research_depth = self.form.research_depth.previous();
        } else {
            self.cursor_pos = self.cursor_pos.saturating_sub(1);
        }
    }

    fn move_right(&mut self) {
        if self.focus == FormField::ResearchDepth {
            self.form.research_depth = self.form.research_depth.next();
        } else {
            let len = self.form.text(self.focus).chars().count();
            if self.cursor_pos < len {
                self.cursor_pos += 1;
            }
        }
    }

    /// Render as a centered modal inside `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let popup = centered(area, 64, 16);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Start Your Research")
            .style(Style::default().fg(Color::White).bg(Color::Black));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        for field in FormField::ALL {
            let focused = field == self.focus;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(field.label(), label_style)));
            lines.push(self.value_line(field, focused));

            if let Some(message) = self.errors.as_ref().and_then(|e| e.message_for(field)) {
                lines.push(Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter start research · Tab next field · ←/→ depth · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }

    fn value_line(&self, field: FormField, focused: bool) -> Line<'static> {
        if field == FormField::ResearchDepth {
            let depth = self.form.research_depth.as_str();
            let text = if focused {
                format!("  ◀ {depth} ▶")
            } else {
                format!("  {depth}")
            };
            return Line::from(text);
        }

        let value = self.form.text(field);
        if value.is_empty() && !focused {
            let placeholder = PLACEHOLDERS
                .iter()
                .find(|(f, _)| *f == field)
                .map_or("", |(_, p)| *p);
            return Line::from(Span::styled(
                format!("  {placeholder}"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        if !focused {
            return Line::from(format!("  {value}"));
        }

        let idx = byte_index(&value, self.cursor_pos);
        let (before, after) = value.split_at(idx);
        let mut after_chars = after.chars();
        let at_cursor = after_chars.next().map_or(" ".to_string(), String::from);
        Line::from(vec![
            Span::raw(format!("> {before}")),
            Span::styled(at_cursor, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after_chars.collect::<String>()),
        ])
    }
}

fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map_or(text.len(), |(idx, _)| idx)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
