//! Hourly "you still have unfinished tasks" nudge: a one-minute tick
//! that fires at most one desktop notification per cooldown window while
//! any incomplete task exists.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

pub const NOTIFY_TITLE: &str = "⏰ Pending Tasks";
pub const NOTIFY_BODY: &str = "You still have unfinished tasks.";

/// Outcome of the platform permission handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// No notification service is reachable at all
    Unsupported,
}

/// The platform notification service: a permission handshake plus a
/// fire-and-forget show primitive.
pub trait Notifier {
    fn request_permission(&mut self) -> Permission;
    fn show(&mut self, title: &str, body: &str);
}

/// Desktop notifications through the session's notification daemon
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    #[cfg(all(unix, not(target_os = "macos")))]
    fn request_permission(&mut self) -> Permission {
        match notify_rust::get_capabilities() {
            Ok(_) => Permission::Granted,
            Err(err) => {
                warn!(error = %err, "no notification service reachable");
                Permission::Unsupported
            }
        }
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn request_permission(&mut self) -> Permission {
        // These platforms prompt on first delivery instead
        Permission::Granted
    }

    fn show(&mut self, title: &str, body: &str) {
        let result = notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .appname("slate")
            .show();
        if let Err(err) = result {
            warn!(error = %err, "notification delivery failed");
        }
    }
}

/// Tick state for the notification loop. The event loop polls
/// [`Scheduler::tick_due`] and calls [`Scheduler::on_tick`] when a tick
/// elapses; enabling/disabling restarts or stops the tick cleanly.
#[derive(Debug)]
pub struct Scheduler {
    enabled: bool,
    last_notified_ms: i64,
    cooldown: Duration,
    tick: Duration,
    last_tick: Option<Instant>,
}

impl Scheduler {
    pub fn new(last_notified_ms: i64, cooldown: Duration, tick: Duration) -> Scheduler {
        Scheduler {
            enabled: false,
            last_notified_ms,
            cooldown,
            tick,
            last_tick: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Start ticking. The first tick comes one full interval from now.
    pub fn start(&mut self) {
        self.enabled = true;
        self.last_tick = Some(Instant::now());
        debug!(tick_secs = self.tick.as_secs(), "notification tick started");
    }

    /// Stop ticking entirely; a later start begins a fresh interval
    pub fn stop(&mut self) {
        self.enabled = false;
        self.last_tick = None;
        debug!("notification tick stopped");
    }

    /// Forget the last firing so the next eligible tick may fire at once
    pub fn reset_cooldown(&mut self) {
        self.last_notified_ms = 0;
    }

    /// True at most once per tick interval, and never while stopped
    pub fn tick_due(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(last) = self.last_tick else {
            return false;
        };
        if last.elapsed() < self.tick {
            return false;
        }
        self.last_tick = Some(Instant::now());
        true
    }

    /// One tick: fire when enabled, outside the cooldown, and something
    /// is still incomplete. Returns the firing time (epoch ms) so the
    /// caller can persist it.
    pub fn on_tick(
        &mut self,
        now_ms: i64,
        any_incomplete: bool,
        notifier: &mut dyn Notifier,
    ) -> Option<i64> {
        if !self.enabled {
            return None;
        }
        if now_ms - self.last_notified_ms < self.cooldown.as_millis() as i64 {
            return None;
        }
        if !any_incomplete {
            return None;
        }

        notifier.show(NOTIFY_TITLE, NOTIFY_BODY);
        self.last_notified_ms = now_ms;
        info!(at_ms = now_ms, "pending-tasks notification fired");
        Some(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeNotifier {
        permission: Option<Permission>,
        shown: Vec<(String, String)>,
    }

    impl Notifier for FakeNotifier {
        fn request_permission(&mut self) -> Permission {
            self.permission.unwrap_or(Permission::Granted)
        }

        fn show(&mut self, title: &str, body: &str) {
            self.shown.push((title.to_string(), body.to_string()));
        }
    }

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn hourly() -> Scheduler {
        Scheduler::new(0, Duration::from_secs(3600), Duration::from_secs(60))
    }

    #[test]
    fn disabled_scheduler_never_fires() {
        let mut scheduler = hourly();
        let mut sink = FakeNotifier::default();
        assert_eq!(scheduler.on_tick(HOUR_MS * 10, true, &mut sink), None);
        assert!(sink.shown.is_empty());
    }

    #[test]
    fn fires_once_then_respects_cooldown() {
        let mut scheduler = hourly();
        scheduler.start();
        let mut sink = FakeNotifier::default();

        let t0 = HOUR_MS * 10;
        assert_eq!(scheduler.on_tick(t0, true, &mut sink), Some(t0));
        assert_eq!(sink.shown.len(), 1);
        assert_eq!(sink.shown[0].0, NOTIFY_TITLE);
        assert_eq!(sink.shown[0].1, NOTIFY_BODY);

        // One minute later: still inside the cooldown
        assert_eq!(scheduler.on_tick(t0 + 60_000, true, &mut sink), None);
        // A full hour later: fires again
        assert_eq!(
            scheduler.on_tick(t0 + HOUR_MS, true, &mut sink),
            Some(t0 + HOUR_MS)
        );
        assert_eq!(sink.shown.len(), 2);
    }

    #[test]
    fn nothing_incomplete_means_no_notification() {
        let mut scheduler = hourly();
        scheduler.start();
        let mut sink = FakeNotifier::default();
        assert_eq!(scheduler.on_tick(HOUR_MS * 10, false, &mut sink), None);
        assert!(sink.shown.is_empty());
    }

    #[test]
    fn cooldown_reset_allows_immediate_refire() {
        let mut scheduler = hourly();
        scheduler.start();
        let mut sink = FakeNotifier::default();

        let t0 = HOUR_MS * 10;
        scheduler.on_tick(t0, true, &mut sink);
        // A task was toggled back to incomplete: the cooldown resets
        scheduler.reset_cooldown();
        // The very next tick, well inside the old cooldown, fires
        assert_eq!(
            scheduler.on_tick(t0 + 60_000, true, &mut sink),
            Some(t0 + 60_000)
        );
        assert_eq!(sink.shown.len(), 2);
    }

    #[test]
    fn resumed_last_notified_still_gates() {
        let t0 = HOUR_MS * 10;
        let mut scheduler =
            Scheduler::new(t0, Duration::from_secs(3600), Duration::from_secs(60));
        scheduler.start();
        let mut sink = FakeNotifier::default();

        assert_eq!(scheduler.on_tick(t0 + 30 * 60_000, true, &mut sink), None);
        assert_eq!(
            scheduler.on_tick(t0 + HOUR_MS, true, &mut sink),
            Some(t0 + HOUR_MS)
        );
    }

    #[test]
    fn tick_due_only_while_started() {
        let mut scheduler = Scheduler::new(0, Duration::from_secs(3600), Duration::ZERO);
        assert!(!scheduler.tick_due());

        scheduler.start();
        assert!(scheduler.tick_due());

        scheduler.stop();
        assert!(!scheduler.tick_due());
    }
}
