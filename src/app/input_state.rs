use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

/// Search box state
pub struct InputState {
    pub textarea: TextArea<'static>,
}

impl InputState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();

        // Single-line input
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Type to search");

        Self { textarea }
    }

    /// Current search text
    pub fn query(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Insert text at the cursor, flattening newlines to spaces
    pub fn insert(&mut self, text: &str) {
        self.textarea.insert_str(text.replace(['\r', '\n'], " "));
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
