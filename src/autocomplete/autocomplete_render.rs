//! Suggestion list and selection rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::autocomplete::suggestion_list::{SuggestionListProps, SuggestionRow};
use crate::selection::Selection;

// Width taken by the "► " / "  " row marker
const MARKER_WIDTH: usize = 2;
const BORDER_WIDTH: usize = 2;
const ELLIPSIS: &str = "…";

/// Render the suggestion rows, highlighting `highlighted`
pub fn render_suggestions(
    frame: &mut Frame,
    area: Rect,
    props: &SuggestionListProps<'_>,
    highlighted: Option<usize>,
) {
    let title = if props.is_loading {
        " Suggestions · Creating… "
    } else {
        " Suggestions "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if props.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No matches",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let max_label_width = (area.width as usize).saturating_sub(BORDER_WIDTH + MARKER_WIDTH);

    let items: Vec<ListItem> = props
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let (text, base_style) = match row {
                SuggestionRow::Suggestion(record) => (
                    record.label.clone(),
                    Style::default().fg(Color::White),
                ),
                SuggestionRow::Create(value) => (
                    format!("+ Create \"{}\"", value),
                    Style::default().fg(Color::Green),
                ),
            };
            let text = truncate_to_width(&text, max_label_width);

            let line = if Some(i) == highlighted {
                Line::from(Span::styled(
                    format!("► {}", text),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(format!("  {}", text), base_style))
            };
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Render the current selection; `cursor` marks the focused record
pub fn render_selection(
    frame: &mut Frame,
    area: Rect,
    value: &Selection,
    cursor: Option<usize>,
) {
    let title = match value {
        Selection::Single(_) => " Selected ",
        Selection::Multi(records) if records.is_empty() => " Selected ",
        Selection::Multi(_) => " Selected (Tab, Del to remove) ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));

    if value.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Nothing selected.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let max_label_width = (area.width as usize).saturating_sub(BORDER_WIDTH + MARKER_WIDTH);

    let items: Vec<ListItem> = value
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let label = if record.label.is_empty() {
                format!("#{}", record.id)
            } else {
                record.label.clone()
            };
            let label = truncate_to_width(&label, max_label_width);

            let line = if Some(i) == cursor {
                Line::from(Span::styled(
                    format!("✕ {}", label),
                    Style::default().fg(Color::Black).bg(Color::Red),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", label),
                    Style::default().fg(Color::Yellow),
                ))
            };
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Cut `text` to at most `max_width` display columns, marking the cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - ELLIPSIS.width();
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
#[path = "autocomplete_render_tests.rs"]
mod autocomplete_render_tests;
