use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::app_state::{App, Focus};
use crate::autocomplete::ViewEvent;

impl App {
    /// Wait up to `timeout` for one terminal event and handle it
    ///
    /// Returns true if an event was handled.
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        match event::read()? {
            // Key presses only, to avoid duplicates on platforms that report releases
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Paste(text) => self.handle_paste_event(text),
            _ => {}
        }
        Ok(true)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.handle_global_keys(key) {
            return;
        }

        match self.focus {
            Focus::Suggestions => self.handle_suggestions_key(key),
            Focus::Selections => self.handle_selections_key(key),
        }
    }

    pub fn handle_paste_event(&mut self, text: String) {
        self.focus = Focus::Suggestions;
        self.input.insert(&text);
        self.search_changed();
    }

    /// Returns true if the key was handled
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return true;
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.focus = match self.focus {
                Focus::Suggestions
                    if !self.autocomplete.is_single() && !self.autocomplete.value().is_empty() =>
                {
                    Focus::Selections
                }
                _ => Focus::Suggestions,
            };
            return true;
        }

        false
    }

    fn handle_suggestions_key(&mut self, key: KeyEvent) {
        let rows = self.autocomplete.props().row_count();
        match key.code {
            KeyCode::Down => {
                self.highlighted = match self.highlighted {
                    None if rows > 0 => Some(0),
                    Some(i) if i + 1 < rows => Some(i + 1),
                    other => other,
                };
            }
            KeyCode::Up => {
                self.highlighted = match self.highlighted {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
            }
            KeyCode::Enter => self.activate_highlighted(),
            // The search box is a single line; keys the textarea reads as a newline are dropped
            KeyCode::Char('m' | 'j') if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Char('\r' | '\n') => {}
            _ => {
                if self.input.textarea.input(key) {
                    self.search_changed();
                }
            }
        }
    }

    fn handle_selections_key(&mut self, key: KeyEvent) {
        let count = self.autocomplete.value().len();
        match key.code {
            KeyCode::Down if self.selection_cursor + 1 < count => self.selection_cursor += 1,
            KeyCode::Up => self.selection_cursor = self.selection_cursor.saturating_sub(1),
            KeyCode::Enter | KeyCode::Delete | KeyCode::Backspace => {
                let Some(record) = self
                    .autocomplete
                    .value()
                    .records()
                    .get(self.selection_cursor)
                    .cloned()
                else {
                    return;
                };
                self.dispatch(ViewEvent::Remove(record));
            }
            _ => {}
        }
    }

    /// Enter on the suggestion list: the highlighted row, or create with no highlight
    fn activate_highlighted(&mut self) {
        let props = self.autocomplete.props();
        let event = match self.highlighted {
            Some(index) => props.activate(index),
            None if props.can_create => Some(ViewEvent::Create),
            None => None,
        };
        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    fn search_changed(&mut self) {
        let event = self.autocomplete.props().change(self.input.query());
        self.highlighted = None;
        self.dispatch(event);
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
