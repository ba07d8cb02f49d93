use std::cell::RefCell;
use std::rc::Rc;

use crate::autocomplete::{AutocompleteState, ViewEvent};
use crate::form::HiddenField;
use crate::selection::Selection;

use super::input_state::InputState;

/// Which panel has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Suggestions,
    Selections,
}

/// Terminal front end around one autocomplete widget
pub struct App {
    pub autocomplete: AutocompleteState,
    pub input: InputState,
    /// Highlighted suggestion row; `None` means "create" is the Enter action
    pub highlighted: Option<usize>,
    pub focus: Focus,
    /// Focused row of the selection panel
    pub selection_cursor: usize,
    pub should_quit: bool,
    /// Shown in the status line (config problems)
    pub warning: Option<String>,
    /// Values the widget proposed while acting as its host
    host_updates: Option<Rc<RefCell<Vec<Selection>>>>,
}

impl App {
    /// Wrap `autocomplete`; a host-owned widget gets this app as its host
    pub fn new(autocomplete: AutocompleteState, controlled: bool) -> Self {
        let (autocomplete, host_updates) = if controlled {
            let updates = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&updates);
            let autocomplete = autocomplete.with_on_change(move |event| {
                sink.borrow_mut().push(event.value.clone());
            });
            (autocomplete, Some(updates))
        } else {
            (autocomplete, None)
        };

        Self {
            autocomplete,
            input: InputState::new(),
            highlighted: None,
            focus: Focus::Suggestions,
            selection_cursor: 0,
            should_quit: false,
            warning: None,
            host_updates,
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn query(&self) -> &str {
        self.input.query()
    }

    /// Form field to print on exit
    pub fn output(&self) -> HiddenField {
        HiddenField::new(self.autocomplete.name(), self.autocomplete.value())
    }

    /// Apply arrived API responses; true if anything changed
    pub fn tick(&mut self) -> bool {
        let received = self.autocomplete.poll_responses();
        if received {
            self.accept_host_updates();
            self.clamp_cursors();
        }
        received
    }

    /// Route a view event to the controller
    pub fn dispatch(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Click(record) => self.autocomplete.handle_click(record),
            ViewEvent::Change(text) => self.autocomplete.handle_change(&text),
            ViewEvent::Create => self.autocomplete.handle_create(),
            ViewEvent::Remove(record) => self.autocomplete.handle_remove(&record),
        }
        self.accept_host_updates();
        self.clamp_cursors();
    }

    /// As the host of a controlled widget, accept every proposed value
    fn accept_host_updates(&mut self) {
        let Some(updates) = &self.host_updates else {
            return;
        };
        let proposed: Vec<Selection> = updates.borrow_mut().drain(..).collect();
        for value in proposed {
            self.autocomplete.set_host_value(value);
        }
    }

    fn clamp_cursors(&mut self) {
        let rows = self.autocomplete.props().row_count();
        self.highlighted = self.highlighted.filter(|&i| i < rows);

        let selected = self.autocomplete.value().len();
        self.selection_cursor = self.selection_cursor.min(selected.saturating_sub(1));
        if selected == 0 {
            self.focus = Focus::Suggestions;
        }
    }
}
