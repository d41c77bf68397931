use super::Frame;
use crate::state::{InputBuffer, State};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the new-task entry field.
///
pub fn entry(frame: &mut Frame, size: Rect, state: &State) {
    let widget = Paragraph::new(input_line(state.input()))
        .block(Block::default().borders(Borders::ALL).title(" New task "));
    frame.render_widget(widget, size);
}

/// Build a line from the input buffer with the caret shown as a reversed
/// cell, so caret position is visible without moving the terminal cursor.
///
pub(super) fn input_line(input: &InputBuffer) -> Line<'static> {
    let chars: Vec<char> = input.text().chars().collect();
    let cursor = input.cursor();
    let before: String = chars[..cursor].iter().collect();
    let at: String = chars
        .get(cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = if cursor < chars.len() {
        chars[cursor + 1..].iter().collect()
    } else {
        String::new()
    };
    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}
