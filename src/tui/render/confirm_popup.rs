use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the delete confirmation popup over the pending task
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup_w: u16 = 44.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.error)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let hint_style = Style::default().fg(app.theme.dim).bg(bg);

    let pending_text = app
        .pending_delete
        .and_then(|id| app.tasks.get(id))
        .map(|t| t.text.as_str())
        .unwrap_or("");

    let mut quoted = format!("\u{201c}{pending_text}\u{201d}");
    if quoted.chars().count() > inner_w {
        quoted = quoted.chars().take(inner_w.saturating_sub(1)).collect();
        quoted.push('…');
    }

    let lines = vec![
        Line::from(Span::styled(" Delete task?", header_style)),
        Line::from(Span::styled("", text_style)),
        Line::from(Span::styled(format!("  {quoted}"), bright_style)),
        Line::from(Span::styled("", text_style)),
        Line::from(Span::styled("  y delete · n cancel", hint_style)),
    ];

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.error).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
