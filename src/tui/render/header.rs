use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

use crate::tui::app::App;

/// Render the header: title and counters on the first row, the
/// completion gauge on the second.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let vm = app.view_model(app.today());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let title = Span::styled(
        " slate",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );
    let counters = format!(
        "{} Tasks · {} Done · filter: {} ",
        vm.total,
        vm.done,
        app.filter.label()
    );

    let width = area.width as usize;
    let title_width = title.content.chars().count();
    let counters_width = counters.chars().count();
    let padding = width.saturating_sub(title_width + counters_width);

    let line = Line::from(vec![
        title,
        Span::styled(" ".repeat(padding), Style::default().bg(bg)),
        Span::styled(counters, Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.progress).bg(bg))
        .label(format!("{}% completed", vm.percent))
        .percent(u16::from(vm.percent));
    frame.render_widget(gauge, rows[1]);
}
