use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::theme;

/// Render the status row (bottom of screen): a transient message or the
/// key hints for the current mode on the left, the side-toggle states on
/// the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let left_style = if app.status_is_error {
        Style::default().fg(app.theme.error).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };

    let left = match (&app.status_message, app.mode) {
        (Some(message), _) => message.clone(),
        (None, Mode::Navigate) => {
            "a add  space toggle  e edit  d delete  1/2/3 filter  ? help".to_string()
        }
        (None, Mode::Add) => "Enter add  Esc close".to_string(),
        (None, Mode::Edit) => "Enter save  Esc cancel".to_string(),
        (None, Mode::Confirm) => "y delete  n cancel".to_string(),
    };

    let notify_state = if app.notifications_enabled { "on" } else { "off" };
    let mut right = format!(
        "theme:{} · notify:{}",
        theme::choice_label(app.theme_choice),
        notify_state
    );
    if app.install.is_some() {
        right.push_str(" · i install");
    }
    right.push(' ');

    let mut spans = vec![Span::styled(format!(" {left}"), left_style)];
    let left_width = left.chars().count() + 1;
    let right_width = right.chars().count();
    if left_width + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - left_width - right_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            right,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
