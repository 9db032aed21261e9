use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::Filter;

use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts its own keys
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    // Clear any transient status message on keypress
    app.clear_status();

    let today = app.today();

    match (key.modifiers, key.code) {
        // Quit: q or Ctrl+C
        (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Cursor movement across the three buckets
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            let len = app.view_model(today).visible_len();
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (_, KeyCode::Char('g')) => {
            app.cursor = 0;
        }
        (_, KeyCode::Char('G')) => {
            let len = app.view_model(today).visible_len();
            app.cursor = len.saturating_sub(1);
        }

        // Task actions
        (_, KeyCode::Char(' ')) => app.toggle_selected(),
        (_, KeyCode::Char('e') | KeyCode::Enter) => app.start_edit(),
        (_, KeyCode::Char('d')) => app.request_delete_selected(),
        (_, KeyCode::Char('a')) => app.start_add(),

        // Filters
        (_, KeyCode::Char('1')) => set_filter(app, Filter::All),
        (_, KeyCode::Char('2')) => set_filter(app, Filter::Active),
        (_, KeyCode::Char('3')) => set_filter(app, Filter::Done),

        // Side toggles
        (_, KeyCode::Char('t')) => app.cycle_theme(),
        (_, KeyCode::Char('n')) => app.toggle_notifications(),
        (_, KeyCode::Char('i')) => app.trigger_install(),

        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        _ => {}
    }
}

fn set_filter(app: &mut App, filter: Filter) {
    app.filter = filter;
    app.cursor = 0;
}
