use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::model::Task;
use crate::view::Bucket;

use crate::tui::app::{App, Mode};

/// Render the three bucket sections (today / upcoming / no date) in
/// stable filtered order, or the empty-state banner when the collection
/// holds nothing at all.
pub fn render_buckets(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if app.tasks.is_empty() {
        render_empty_state(frame, app, area);
        return;
    }

    let vm = app.view_model(app.today());
    let section_style = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    let mut index = 0usize;

    let sections = [
        (Bucket::Today, &vm.today),
        (Bucket::Upcoming, &vm.upcoming),
        (Bucket::NoDate, &vm.no_date),
    ];
    for (bucket, tasks) in sections {
        lines.push(Line::from(Span::styled(
            format!(" {}", bucket.title()),
            section_style,
        )));
        for &task in tasks.iter() {
            lines.push(task_line(app, task, index, area.width as usize));
            index += 1;
        }
        lines.push(Line::from(Span::styled(
            String::new(),
            Style::default().bg(bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut lines = vec![Line::from(""); (area.height / 3) as usize];
    lines.push(
        Line::from(Span::styled(
            "No tasks yet",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
    );
    lines.push(
        Line::from(Span::styled(
            "press a to add one",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .centered(),
    );
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn task_line<'a>(app: &'a App, task: &'a Task, index: usize, width: usize) -> Line<'a> {
    let selected = app.mode != Mode::Add && index == app.cursor;
    let editing = app.mode == Mode::Edit && app.edit_target == Some(task.id);
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let checkbox_style = if task.completed {
        Style::default().fg(app.theme.done).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };

    let mut spans = vec![
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(checkbox, checkbox_style),
        Span::styled(
            format!(" {} ", task.priority.marker()),
            Style::default()
                .fg(app.theme.priority_color(task.priority))
                .bg(bg),
        ),
    ];

    if editing {
        // Swap the text for the edit buffer with a visible cursor
        let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
        let edit_style = Style::default().fg(app.theme.text_bright).bg(bg);
        spans.push(Span::styled(before.to_string(), edit_style));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(after.to_string(), edit_style));
    } else {
        let mut text_style = Style::default()
            .fg(if selected {
                app.theme.text_bright
            } else {
                app.theme.text
            })
            .bg(bg);
        if task.completed {
            text_style = text_style
                .fg(app.theme.dim)
                .add_modifier(Modifier::CROSSED_OUT);
        }
        spans.push(Span::styled(
            truncate_to_width(&task.text, width.saturating_sub(24)),
            text_style,
        ));
        if let Some(due) = task.due_date {
            spans.push(Span::styled(
                format!("  · {}", due.format("%Y-%m-%d")),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    Line::from(spans)
}

/// Truncate to a display width, appending an ellipsis when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
