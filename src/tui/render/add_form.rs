use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{AddField, App};

/// Render the add form: a text field plus the priority selector and
/// optional due date, with the focused field highlighted.
pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let theme = &app.theme;
    let form = &app.add_form;

    let focus_style = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let blur_style = Style::default().fg(theme.text).bg(bg);
    let label_style = Style::default().fg(theme.dim).bg(bg);
    let cursor_style = Style::default().fg(theme.highlight).bg(bg);

    // Text field, with a visible cursor when focused
    let mut text_spans = vec![Span::styled(" task: ", label_style)];
    if form.field == AddField::Text {
        let (before, after) = form.text.split_at(form.text_cursor);
        text_spans.push(Span::styled(before.to_string(), focus_style));
        text_spans.push(Span::styled("\u{258C}", cursor_style));
        text_spans.push(Span::styled(after.to_string(), focus_style));
    } else {
        text_spans.push(Span::styled(form.text.clone(), blur_style));
    }

    // Priority selector and due date on the second row
    let mut meta_spans = vec![Span::styled(" priority: ", label_style)];
    meta_spans.push(Span::styled(
        format!("\u{2039} {} \u{203A}", form.priority.label()),
        if form.field == AddField::Priority {
            focus_style.fg(theme.priority_color(form.priority))
        } else {
            Style::default().fg(theme.priority_color(form.priority)).bg(bg)
        },
    ));
    meta_spans.push(Span::styled("   due: ", label_style));
    if form.field == AddField::Due {
        let (before, after) = form.due.split_at(form.due_cursor);
        meta_spans.push(Span::styled(before.to_string(), focus_style));
        meta_spans.push(Span::styled("\u{258C}", cursor_style));
        meta_spans.push(Span::styled(after.to_string(), focus_style));
    } else if form.due.is_empty() {
        meta_spans.push(Span::styled("(none)", label_style));
    } else {
        meta_spans.push(Span::styled(form.due.clone(), blur_style));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .title(Span::styled(
            " Add Task ",
            Style::default().fg(theme.highlight).bg(bg),
        ));

    let paragraph = Paragraph::new(vec![
        Line::from(text_spans),
        Line::from(meta_spans),
        Line::from(Span::styled(
            " Enter add · Tab next field · \u{2190}\u{2192} priority · Esc close",
            label_style,
        )),
    ])
    .block(block)
    .style(Style::default().bg(bg));

    frame.render_widget(paragraph, area);
}
