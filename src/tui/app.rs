use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Config;
use crate::install::{self, InstallPrompt};
use crate::model::{Priority, TaskId, ThemeChoice};
use crate::notify::{DesktopNotifier, Notifier, Permission, Scheduler};
use crate::store::{FileStore, KvStore, TaskStore, settings};
use crate::view::{self, Filter, ViewModel};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Add,
    Edit,
    Confirm,
}

/// Which add-form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Text,
    Priority,
    Due,
}

impl AddField {
    pub fn next(self) -> AddField {
        match self {
            AddField::Text => AddField::Priority,
            AddField::Priority => AddField::Due,
            AddField::Due => AddField::Text,
        }
    }

    pub fn prev(self) -> AddField {
        match self {
            AddField::Text => AddField::Due,
            AddField::Priority => AddField::Text,
            AddField::Due => AddField::Priority,
        }
    }
}

/// Add-form state. The form outlives a single submit: text and due date
/// are cleared after a successful add, the priority selection sticks.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub text: String,
    pub text_cursor: usize,
    pub priority: Priority,
    pub due: String,
    pub due_cursor: usize,
    pub field: AddField,
}

impl AddForm {
    fn clear_inputs(&mut self) {
        self.text.clear();
        self.text_cursor = 0;
        self.due.clear();
        self.due_cursor = 0;
        self.field = AddField::Text;
    }
}

/// Main application state
pub struct App {
    pub kv: Box<dyn KvStore>,
    pub tasks: TaskStore,
    pub filter: Filter,
    /// Cursor index into the projected visible list
    pub cursor: usize,
    pub mode: Mode,
    pub theme_choice: ThemeChoice,
    pub theme: Theme,
    pub add_form: AddForm,
    /// Task being inline-edited (Mode::Edit)
    pub edit_target: Option<TaskId>,
    pub edit_buffer: String,
    /// Byte offset into edit_buffer
    pub edit_cursor: usize,
    /// Task awaiting delete confirmation (Mode::Confirm)
    pub pending_delete: Option<TaskId>,
    /// Persisted opt-in flag; ticking additionally requires the platform grant
    pub notifications_enabled: bool,
    pub scheduler: Scheduler,
    pub notifier: Box<dyn Notifier>,
    /// Captured install signal; Some = affordance visible
    pub install: Option<InstallPrompt>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        mut kv: Box<dyn KvStore>,
        config: &Config,
        notifier: Box<dyn Notifier>,
        install: Option<InstallPrompt>,
    ) -> App {
        let tasks = TaskStore::load(&mut *kv);
        let theme_choice = settings::theme_choice(&*kv);
        let notifications_enabled = settings::notifications_enabled(&*kv);
        let scheduler = Scheduler::new(
            settings::last_notified_ms(&*kv),
            config.cooldown(),
            config.tick(),
        );

        let mut app = App {
            kv,
            tasks,
            filter: Filter::All,
            cursor: 0,
            mode: Mode::Navigate,
            theme_choice,
            theme: Theme::for_choice(theme_choice),
            add_form: AddForm::default(),
            edit_target: None,
            edit_buffer: String::new(),
            edit_cursor: 0,
            pending_delete: None,
            notifications_enabled,
            scheduler,
            notifier,
            install,
            show_help: false,
            status_message: None,
            status_is_error: false,
            should_quit: false,
        };

        // Resume the tick only when the opt-in is stored AND the platform
        // still grants the capability
        if app.notifications_enabled
            && app.notifier.request_permission() == Permission::Granted
        {
            app.scheduler.start();
        }

        app
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn view_model(&self, today: NaiveDate) -> ViewModel<'_> {
        view::project(self.tasks.tasks(), self.filter, today)
    }

    /// Id of the task under the cursor, if any
    pub fn selected_task_id(&self, today: NaiveDate) -> Option<TaskId> {
        self.view_model(today).nth(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the visible list after a mutation
    pub fn clamp_cursor(&mut self, today: NaiveDate) {
        let len = self.view_model(today).visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    // ------------------------------------------------------------------
    // Task actions

    pub fn toggle_selected(&mut self) {
        let today = self.today();
        let Some(id) = self.selected_task_id(today) else {
            return;
        };
        if self.tasks.toggle(&mut *self.kv, id) {
            self.scheduler.reset_cooldown();
            self.clamp_cursor(today);
        }
    }

    /// Record the task under the cursor as pending deletion and open the
    /// confirmation popup. A new request simply replaces the pending id.
    pub fn request_delete_selected(&mut self) {
        let today = self.today();
        let Some(id) = self.selected_task_id(today) else {
            return;
        };
        self.pending_delete = Some(id);
        self.mode = Mode::Confirm;
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.tasks.remove(&mut *self.kv, id);
        }
        self.mode = Mode::Navigate;
        let today = self.today();
        self.clamp_cursor(today);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Navigate;
    }

    // ------------------------------------------------------------------
    // Add form

    pub fn start_add(&mut self) {
        self.mode = Mode::Add;
        self.add_form.field = AddField::Text;
    }

    pub fn cancel_add(&mut self) {
        self.mode = Mode::Navigate;
    }

    /// Submit the add form. Blank text is a silent no-op (the form stays
    /// open); an unparseable due date keeps the form open with an error.
    pub fn submit_add(&mut self) {
        if self.add_form.text.trim().is_empty() {
            return;
        }

        let due = self.add_form.due.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    self.set_error(format!("invalid date \"{due}\" (want YYYY-MM-DD)"));
                    return;
                }
            }
        };

        let text = self.add_form.text.clone();
        let priority = self.add_form.priority;
        if self
            .tasks
            .add(&mut *self.kv, &text, priority, due_date)
            .is_some()
        {
            self.add_form.clear_inputs();
            self.clear_status();
        }
    }

    // ------------------------------------------------------------------
    // Inline edit

    /// Swap the selected task's text for an edit buffer pre-filled with
    /// the current text
    pub fn start_edit(&mut self) {
        let today = self.today();
        let Some(id) = self.selected_task_id(today) else {
            return;
        };
        let Some(task) = self.tasks.get(id) else {
            return;
        };
        self.edit_buffer = task.text.clone();
        self.edit_cursor = self.edit_buffer.len();
        self.edit_target = Some(id);
        self.mode = Mode::Edit;
    }

    /// Commit the edit. A blank buffer is discarded by the store and the
    /// original text kept, matching the add-side validation.
    pub fn commit_edit(&mut self) {
        if let Some(id) = self.edit_target.take() {
            let buffer = std::mem::take(&mut self.edit_buffer);
            self.tasks.edit(&mut *self.kv, id, &buffer);
        }
        self.edit_cursor = 0;
        self.mode = Mode::Navigate;
    }

    /// Abandon the edit; the next render re-reads committed state
    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.mode = Mode::Navigate;
    }

    // ------------------------------------------------------------------
    // Theme / notifications / install

    pub fn cycle_theme(&mut self) {
        self.theme_choice = self.theme_choice.next();
        self.theme = Theme::for_choice(self.theme_choice);
        settings::set_theme_choice(&mut *self.kv, self.theme_choice);
    }

    /// Toggle the notification opt-in. Enabling requires the platform
    /// grant: refused or unreachable means the flag stays off.
    pub fn toggle_notifications(&mut self) {
        if self.notifications_enabled {
            self.notifications_enabled = false;
            settings::set_notifications_enabled(&mut *self.kv, false);
            self.scheduler.stop();
            self.set_status("notifications off");
            return;
        }

        match self.notifier.request_permission() {
            Permission::Granted => {
                self.notifications_enabled = true;
                settings::set_notifications_enabled(&mut *self.kv, true);
                self.scheduler.start();
                self.set_status("notifications on (hourly)");
            }
            Permission::Denied => {
                // Refused silently; the toggle stays off
            }
            Permission::Unsupported => {
                self.set_error("Notifications not supported");
            }
        }
    }

    /// Replay the captured install signal once; no-op when none exists
    pub fn trigger_install(&mut self) {
        let Some(prompt) = self.install.take() else {
            return;
        };
        match prompt.prompt() {
            Ok(path) => self.set_status(format!("installed {}", path.display())),
            Err(err) => self.set_error(format!("install failed: {err}")),
        }
    }

    // ------------------------------------------------------------------
    // Scheduler wiring

    /// Called from the event loop; runs at most one scheduler tick per
    /// tick interval and persists the firing time when one happens.
    pub fn run_scheduler(&mut self) {
        if !self.scheduler.tick_due() {
            return;
        }
        let now_ms = Utc::now().timestamp_millis();
        let any_incomplete = self.tasks.any_incomplete();
        if let Some(fired_at) =
            self.scheduler
                .on_tick(now_ms, any_incomplete, &mut *self.notifier)
        {
            settings::set_last_notified_ms(&mut *self.kv, fired_at);
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&data_dir.join("store.json"))?;
    let config = Config::load(data_dir);

    let mut app = App::new(
        Box::new(store),
        &config,
        Box::new(DesktopNotifier),
        install::capture_install_signal(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.run_scheduler();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::MemStore;
    use crate::store::settings::{LAST_NOTIFIED_KEY, NOTIFY_KEY, THEME_KEY};

    pub(crate) struct FakeNotifier {
        pub permission: Permission,
        pub shown: usize,
    }

    impl Notifier for FakeNotifier {
        fn request_permission(&mut self) -> Permission {
            self.permission
        }

        fn show(&mut self, _title: &str, _body: &str) {
            self.shown += 1;
        }
    }

    fn app_with(permission: Permission) -> App {
        App::new(
            Box::new(MemStore::new()),
            &Config::default(),
            Box::new(FakeNotifier {
                permission,
                shown: 0,
            }),
            None,
        )
    }

    fn add_task(app: &mut App, text: &str) -> TaskId {
        app.tasks
            .add(&mut *app.kv, text, Priority::Medium, None)
            .unwrap()
    }

    #[test]
    fn submit_add_appends_and_clears_inputs() {
        let mut app = app_with(Permission::Granted);
        app.start_add();
        app.add_form.text = "Buy milk".into();
        app.add_form.priority = Priority::High;
        app.add_form.due = String::new();

        app.submit_add();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].priority, Priority::High);
        assert!(app.add_form.text.is_empty());
        // Priority selection sticks for the next add
        assert_eq!(app.add_form.priority, Priority::High);
        assert_eq!(app.mode, Mode::Add);
    }

    #[test]
    fn submit_add_with_blank_text_is_silent_noop() {
        let mut app = app_with(Permission::Granted);
        app.start_add();
        app.add_form.text = "   ".into();
        app.submit_add();
        assert_eq!(app.tasks.len(), 0);
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn submit_add_with_bad_date_keeps_form_and_reports() {
        let mut app = app_with(Permission::Granted);
        app.start_add();
        app.add_form.text = "Report".into();
        app.add_form.due = "tomorrow".into();
        app.submit_add();

        assert_eq!(app.tasks.len(), 0);
        assert!(app.status_is_error);
        assert_eq!(app.add_form.text, "Report");
    }

    #[test]
    fn edit_commit_rewrites_and_cancel_preserves() {
        let mut app = app_with(Permission::Granted);
        let id = add_task(&mut app, "original");

        app.start_edit();
        assert_eq!(app.edit_buffer, "original");
        app.edit_buffer = "rewritten".into();
        app.commit_edit();
        assert_eq!(app.tasks.get(id).unwrap().text, "rewritten");
        assert_eq!(app.mode, Mode::Navigate);

        app.start_edit();
        app.edit_buffer = "discarded".into();
        app.cancel_edit();
        assert_eq!(app.tasks.get(id).unwrap().text, "rewritten");
    }

    #[test]
    fn delete_needs_confirmation_and_new_request_replaces_pending() {
        let mut app = app_with(Permission::Granted);
        let first = add_task(&mut app, "first");
        let second = add_task(&mut app, "second");

        app.cursor = 0;
        app.request_delete_selected();
        assert_eq!(app.pending_delete, Some(first));
        assert_eq!(app.mode, Mode::Confirm);

        // Cancel leaves everything in place
        app.cancel_delete();
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.pending_delete, None);

        // A fresh request on another row replaces the pending id
        app.cursor = 1;
        app.request_delete_selected();
        assert_eq!(app.pending_delete, Some(second));
        app.confirm_delete();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].id, first);
    }

    #[test]
    fn cycle_theme_persists_and_system_clears_key() {
        let mut app = app_with(Permission::Granted);
        assert_eq!(app.theme_choice, ThemeChoice::System);

        app.cycle_theme();
        assert_eq!(app.theme_choice, ThemeChoice::Light);
        assert_eq!(app.kv.get(THEME_KEY).as_deref(), Some("light"));

        app.cycle_theme();
        app.cycle_theme();
        assert_eq!(app.theme_choice, ThemeChoice::Dark);

        app.cycle_theme();
        assert_eq!(app.theme_choice, ThemeChoice::System);
        assert_eq!(app.kv.get(THEME_KEY), None);
    }

    #[test]
    fn enabling_notifications_requires_grant() {
        let mut app = app_with(Permission::Granted);
        app.toggle_notifications();
        assert!(app.notifications_enabled);
        assert!(app.scheduler.enabled());
        assert_eq!(app.kv.get(NOTIFY_KEY).as_deref(), Some("true"));

        app.toggle_notifications();
        assert!(!app.notifications_enabled);
        assert!(!app.scheduler.enabled());
        assert_eq!(app.kv.get(NOTIFY_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn denied_permission_refuses_silently() {
        let mut app = app_with(Permission::Denied);
        app.toggle_notifications();
        assert!(!app.notifications_enabled);
        assert!(!app.scheduler.enabled());
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn unsupported_platform_alerts() {
        let mut app = app_with(Permission::Unsupported);
        app.toggle_notifications();
        assert!(!app.notifications_enabled);
        assert!(app.status_is_error);
    }

    #[test]
    fn toggle_selected_clears_cooldown_state() {
        let mut app = app_with(Permission::Granted);
        add_task(&mut app, "task");
        settings::set_last_notified_ms(&mut *app.kv, 123_456);

        app.cursor = 0;
        app.toggle_selected();
        assert!(app.tasks.tasks()[0].completed);
        assert_eq!(app.kv.get(LAST_NOTIFIED_KEY), None);
    }

    #[test]
    fn trigger_install_without_signal_is_noop() {
        let mut app = app_with(Permission::Granted);
        app.trigger_install();
        assert_eq!(app.status_message, None);
    }
}
