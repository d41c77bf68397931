use super::*;
use crate::state::{Mode, State};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render the whole frame: status bar, task list, optional entry field and
/// log pane, footer, and any modal overlay on top.
///
pub fn all(frame: &mut Frame, state: &State) {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(1)];
    let entry_open = matches!(state.mode(), Mode::AddInput);
    if entry_open {
        constraints.push(Constraint::Length(3));
    }
    if state.show_log() {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    status(frame, chunks[0], state);
    list(frame, chunks[1], state);

    let mut next = 2;
    if entry_open {
        entry(frame, chunks[next], state);
        next += 1;
    }
    if state.show_log() {
        log(frame, chunks[next]);
        next += 1;
    }
    footer(frame, chunks[next], state);

    modal(frame, state);
}
