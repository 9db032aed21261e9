pub mod add_form;
pub mod buckets;
pub mod confirm_popup;
pub mod header;
pub mod help_overlay;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | add form (when open) | status row
    let mut constraints = vec![
        Constraint::Length(2), // title + progress
        Constraint::Min(1),    // bucket lists
    ];
    if app.mode == Mode::Add {
        constraints.push(Constraint::Length(4));
    }
    constraints.push(Constraint::Length(1)); // status row

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    header::render_header(frame, app, chunks[0]);
    buckets::render_buckets(frame, app, chunks[1]);
    if app.mode == Mode::Add {
        add_form::render_add_form(frame, app, chunks[2]);
    }
    status_row::render_status_row(frame, app, chunks[chunks.len() - 1]);

    // Delete confirmation popup (rendered on top of everything)
    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, frame.area());
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}
