use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::{App, Focus};
use crate::autocomplete::{Phase, render_selection, render_suggestions};

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        // Search box, the two panels, then the status line
        let [input_area, panels_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [suggestions_area, selection_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(panels_area);

        self.render_input_field(frame, input_area);

        let props = self.autocomplete.props();
        render_suggestions(frame, suggestions_area, &props, self.highlighted);

        let cursor = (self.focus == Focus::Selections).then_some(self.selection_cursor);
        render_selection(frame, selection_area, self.autocomplete.value(), cursor);

        self.render_status(frame, status_area);
    }

    fn render_input_field(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focus == Focus::Suggestions {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let title = if self.autocomplete.is_single() {
            " Search (single) "
        } else {
            " Search "
        };

        self.input.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(&self.input.textarea, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.warning {
            Some(warning) => Line::from(Span::styled(
                warning.as_str(),
                Style::default().fg(Color::Yellow),
            )),
            None => {
                let phase = match self.autocomplete.phase() {
                    Phase::Idle => "",
                    Phase::Searching => "Searching… ",
                    Phase::Creating => "Creating… ",
                };
                Line::from(vec![
                    Span::styled(phase, Style::default().fg(Color::Cyan)),
                    Span::styled(
                        "Enter select · Tab switch panel · Esc done",
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            }
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
