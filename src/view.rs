//! View model layer.
//!
//! Transforms the domain state (task list + filter) into a plain description
//! of rows and counters. The terminal renderer in `ui` consumes this
//! description; nothing here depends on ratatui, so the presentation rules
//! are testable without a terminal.

use crate::tasks::{Filter, TaskList};

/// Placeholder row text shown when the filtered selection is empty.
pub const EMPTY_PLACEHOLDER: &str = "No tasks";

/// One visible task row.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    /// Markup-escaped display title.
    pub title: String,
    pub done: bool,
}

/// Plain description of the visible list plus the summary counters.
///
/// The counters are computed over the unfiltered list, not the visible
/// subset. An empty `rows` means the renderer shows the placeholder entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub rows: Vec<Row>,
    pub total_count: usize,
    pub done_count: usize,
}

/// Derive the visible rows and counters for the given filter, preserving
/// list order.
///
pub fn build(list: &TaskList, filter: Filter) -> ViewModel {
    let rows = list
        .tasks()
        .iter()
        .filter(|t| filter.matches(t))
        .map(|t| Row {
            id: t.id.clone(),
            title: escape_markup(&t.title),
            done: t.done,
        })
        .collect();
    ViewModel {
        rows,
        total_count: list.len(),
        done_count: list.done_count(),
    }
}

/// Neutralize `& < > "` so task titles always render as literal text and can
/// never be interpreted as markup.
///
pub fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
