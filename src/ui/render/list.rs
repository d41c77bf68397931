use super::entry::input_line;
use super::Frame;
use crate::state::{Mode, State};
use crate::view;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render the visible task rows. An empty filtered selection renders the
/// single placeholder entry with no selection highlight. The row being
/// edited swaps its title for the edit buffer with a visible caret.
///
pub fn list(frame: &mut Frame, size: Rect, state: &State) {
    let rows = &state.view().rows;

    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(Span::styled(
            view::EMPTY_PLACEHOLDER,
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        rows.iter()
            .map(|row| {
                let mark = if row.done { "[x] " } else { "[ ] " };
                let editing = matches!(state.mode(), Mode::EditInput)
                    && state.editing_id() == Some(row.id.as_str());
                if editing {
                    let mut line = input_line(state.input());
                    line.spans.insert(0, Span::raw(mark));
                    ListItem::new(line)
                } else if row.done {
                    ListItem::new(Line::from(vec![
                        Span::raw(mark),
                        Span::styled(
                            row.title.clone(),
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::CROSSED_OUT),
                        ),
                    ]))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw(mark),
                        Span::raw(row.title.clone()),
                    ]))
                }
            })
            .collect()
    };

    let mut list_state = ListState::default();
    if !rows.is_empty() {
        list_state.select(Some(state.selected()));
    }

    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Tasks "))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(widget, size, &mut list_state);
}
