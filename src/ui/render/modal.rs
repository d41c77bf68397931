use super::entry::input_line;
use super::Frame;
use crate::state::{Modal, State};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the pending modal overlay, if any, centered over the frame.
///
pub fn modal(frame: &mut Frame, state: &State) {
    let modal = match state.modal() {
        Some(modal) => modal,
        None => return,
    };

    match modal {
        Modal::ConfirmDelete(_) => {
            let area = centered_rect(40, 5, frame.size());
            frame.render_widget(Clear, area);
            let widget = Paragraph::new(vec![
                Line::from("Delete this task?"),
                Line::from(""),
                Line::styled("y: delete    n: keep", Style::default().fg(Color::DarkGray)),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Confirm "),
            );
            frame.render_widget(widget, area);
        }
        Modal::Alert(message) => {
            let area = centered_rect(50, 6, frame.size());
            frame.render_widget(Clear, area);
            let widget = Paragraph::new(vec![
                Line::from(message.as_str()),
                Line::from(""),
                Line::styled("Enter: dismiss", Style::default().fg(Color::DarkGray)),
            ])
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Notice "),
            );
            frame.render_widget(widget, area);
        }
        Modal::ImportPath => {
            let area = centered_rect(60, 3, frame.size());
            frame.render_widget(Clear, area);
            let widget = Paragraph::new(input_line(state.input())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Import from file ")
                    .title_style(Style::default().add_modifier(Modifier::BOLD)),
            );
            frame.render_widget(widget, area);
        }
    }
}

/// Center a fixed-height, percentage-width rectangle inside the frame.
///
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
