use super::Frame;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_logger::TuiLoggerWidget;

/// Render the in-app log pane. Storage and export failures surface here
/// rather than as dialogs.
///
pub fn log(frame: &mut Frame, size: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(Block::default().borders(Borders::ALL).title(" Log "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Green))
        .style_debug(Style::default().fg(Color::DarkGray));
    frame.render_widget(widget, size);
}
