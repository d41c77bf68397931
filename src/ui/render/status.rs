use super::Frame;
use crate::state::State;
use crate::tasks::Filter;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the status bar: summary counters on the left, filter selection
/// tabs on the right. Counters always cover the unfiltered list.
///
pub fn status(frame: &mut Frame, size: Rect, state: &State) {
    let view = state.view();
    let counters = format!(" {} total, {} done ", view.total_count, view.done_count);

    let mut spans = vec![
        Span::styled(counters, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
    ];
    for (key, filter) in [
        ("1", Filter::All),
        ("2", Filter::Active),
        ("3", Filter::Completed),
    ] {
        let style = if state.filter() == filter {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {}:{} ", key, filter.label()), style));
        spans.push(Span::raw(" "));
    }

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(concat!(" todo-tui v", env!("CARGO_PKG_VERSION"), " ")),
        );
    frame.render_widget(widget, size);
}
