use super::Frame;
use crate::state::{Modal, Mode, State};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hints and mode tag for the current mode or modal.
///
fn mode_line(state: &State) -> (&'static str, Color, &'static str) {
    match state.modal() {
        Some(Modal::ConfirmDelete(_)) => {
            return ("DELETE:", Color::Red, " y: confirm, n: cancel");
        }
        Some(Modal::Alert(_)) => return ("NOTICE:", Color::Yellow, " Enter: dismiss"),
        Some(Modal::ImportPath) => {
            return ("IMPORT:", Color::Magenta, " type a path, Enter: import, Esc: cancel");
        }
        None => {}
    }
    match state.mode() {
        Mode::AddInput => ("ADD:", Color::Green, " type a title, Enter: add, Esc: done"),
        Mode::EditInput => ("EDIT:", Color::Blue, " Enter: save, Esc: cancel"),
        Mode::Normal => (
            "NORMAL:",
            Color::Cyan,
            " a: add, Space: toggle, e: edit, d: delete, 1/2/3: filter, \
             C: clear done, s: export, i: import, L: logs, q: quit",
        ),
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let (tag, color, hints) = mode_line(state);
    let controls_content = Line::from(vec![
        Span::styled(
            tag,
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints, Style::default().fg(Color::Gray)),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::DarkGray),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
