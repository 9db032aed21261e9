use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::config::Config;
use crate::notify::{Notifier, Permission};
use crate::store::MemStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Notifier that always grants and swallows every notification
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn request_permission(&mut self) -> Permission {
        Permission::Granted
    }

    fn show(&mut self, _title: &str, _body: &str) {}
}

/// An app over an in-memory store with no captured install signal
pub fn app_for_test() -> App {
    App::new(
        Box::new(MemStore::new()),
        &Config::default(),
        Box::new(SilentNotifier),
        None,
    )
}

/// Render the full frame into an in-memory buffer and return plain text
/// (no styles), trailing blanks trimmed.
pub fn render_to_string(app: &mut App, w: u16, h: u16) -> String {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| super::render(frame, app))
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use crate::model::Priority;
    use crate::tui::app::Mode;

    use super::*;

    #[test]
    fn empty_collection_shows_empty_state() {
        let mut app = app_for_test();
        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("No tasks yet"));
        assert!(screen.contains("press a to add one"));
        assert!(screen.contains("0% completed"));
    }

    #[test]
    fn tasks_render_under_their_buckets() {
        let mut app = app_for_test();
        let today = Local::now().date_naive();
        app.tasks
            .add(&mut *app.kv, "due now", Priority::High, Some(today))
            .unwrap();
        app.tasks
            .add(
                &mut *app.kv,
                "later on",
                Priority::Low,
                Some(today.succ_opt().unwrap()),
            )
            .unwrap();
        app.tasks
            .add(&mut *app.kv, "someday", Priority::Medium, None)
            .unwrap();

        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        let today_at = screen.find("Today").unwrap();
        let upcoming_at = screen.find("Upcoming").unwrap();
        let nodate_at = screen.find("No Due Date").unwrap();
        assert!(today_at < upcoming_at && upcoming_at < nodate_at);

        assert!(screen.find("due now").unwrap() > today_at);
        assert!(screen.find("later on").unwrap() > upcoming_at);
        assert!(screen.find("someday").unwrap() > nodate_at);
        assert!(screen.contains("3 Tasks"));
        assert!(screen.contains("0 Done"));
    }

    #[test]
    fn progress_and_counters_follow_completion() {
        let mut app = app_for_test();
        app.tasks
            .add(&mut *app.kv, "one", Priority::Low, None)
            .unwrap();
        app.tasks
            .add(&mut *app.kv, "two", Priority::Low, None)
            .unwrap();
        app.cursor = 0;
        app.toggle_selected();

        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("1 Done"));
        assert!(screen.contains("50% completed"));
    }

    #[test]
    fn confirm_popup_names_the_pending_task() {
        let mut app = app_for_test();
        app.tasks
            .add(&mut *app.kv, "doomed task", Priority::Low, None)
            .unwrap();
        app.request_delete_selected();

        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("Delete task?"));
        assert!(screen.contains("doomed task"));
        assert!(screen.contains("y delete"));
    }

    #[test]
    fn add_form_appears_in_add_mode() {
        let mut app = app_for_test();
        app.start_add();
        app.add_form.text = "half".into();
        app.add_form.text_cursor = app.add_form.text.len();

        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("Add Task"));
        assert!(screen.contains("half"));
        assert!(screen.contains("priority:"));
    }

    #[test]
    fn edit_buffer_replaces_task_text_while_editing() {
        let mut app = app_for_test();
        app.tasks
            .add(&mut *app.kv, "committed text", Priority::Low, None)
            .unwrap();
        app.start_edit();
        app.edit_buffer = "draft text".into();
        app.edit_cursor = app.edit_buffer.len();
        assert_eq!(app.mode, Mode::Edit);

        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("draft text"));
        assert!(!screen.contains("committed text"));
    }

    #[test]
    fn help_overlay_lists_bindings() {
        let mut app = app_for_test();
        app.show_help = true;
        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("Key Bindings"));
        assert!(screen.contains("Cycle theme"));
    }

    #[test]
    fn status_row_shows_toggle_states() {
        let mut app = app_for_test();
        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("theme:system"));
        assert!(screen.contains("notify:off"));

        app.cycle_theme();
        app.toggle_notifications();
        let screen = render_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("theme:light"));
        assert!(screen.contains("notify:on"));
    }
}
