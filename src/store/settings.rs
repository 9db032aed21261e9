use crate::model::ThemeChoice;

use super::kv::KvStore;

pub const THEME_KEY: &str = "theme";
pub const NOTIFY_KEY: &str = "notify";
pub const LAST_NOTIFIED_KEY: &str = "lastNotified";

/// Read the persisted theme choice; absent key means system
pub fn theme_choice(kv: &dyn KvStore) -> ThemeChoice {
    ThemeChoice::from_stored(kv.get(THEME_KEY).as_deref())
}

/// Persist a theme choice; selecting system clears the stored value
pub fn set_theme_choice(kv: &mut dyn KvStore, choice: ThemeChoice) {
    match choice.as_stored() {
        Some(value) => kv.set(THEME_KEY, value),
        None => kv.remove(THEME_KEY),
    }
}

pub fn notifications_enabled(kv: &dyn KvStore) -> bool {
    kv.get(NOTIFY_KEY).as_deref() == Some("true")
}

pub fn set_notifications_enabled(kv: &mut dyn KvStore, enabled: bool) {
    kv.set(NOTIFY_KEY, if enabled { "true" } else { "false" });
}

/// Epoch milliseconds of the last notification; 0 = never notified
pub fn last_notified_ms(kv: &dyn KvStore) -> i64 {
    kv.get(LAST_NOTIFIED_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

pub fn set_last_notified_ms(kv: &mut dyn KvStore, at_ms: i64) {
    kv.set(LAST_NOTIFIED_KEY, &at_ms.to_string());
}

/// Forget the last notification time so the next eligible tick may fire
pub fn clear_last_notified(kv: &mut dyn KvStore) {
    kv.remove(LAST_NOTIFIED_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::MemStore;

    #[test]
    fn theme_absent_means_system() {
        let kv = MemStore::new();
        assert_eq!(theme_choice(&kv), ThemeChoice::System);
    }

    #[test]
    fn theme_persists_and_system_clears() {
        let mut kv = MemStore::new();
        set_theme_choice(&mut kv, ThemeChoice::Dark);
        assert_eq!(kv.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(theme_choice(&kv), ThemeChoice::Dark);

        set_theme_choice(&mut kv, ThemeChoice::System);
        assert_eq!(kv.get(THEME_KEY), None);
        assert_eq!(theme_choice(&kv), ThemeChoice::System);
    }

    #[test]
    fn notify_flag_round_trips_as_strings() {
        let mut kv = MemStore::new();
        assert!(!notifications_enabled(&kv));

        set_notifications_enabled(&mut kv, true);
        assert_eq!(kv.get(NOTIFY_KEY).as_deref(), Some("true"));
        assert!(notifications_enabled(&kv));

        set_notifications_enabled(&mut kv, false);
        assert_eq!(kv.get(NOTIFY_KEY).as_deref(), Some("false"));
        assert!(!notifications_enabled(&kv));
    }

    #[test]
    fn last_notified_defaults_to_zero_and_clears() {
        let mut kv = MemStore::new();
        assert_eq!(last_notified_ms(&kv), 0);

        set_last_notified_ms(&mut kv, 1_712_000_000_000);
        assert_eq!(last_notified_ms(&kv), 1_712_000_000_000);

        clear_last_notified(&mut kv);
        assert_eq!(kv.get(LAST_NOTIFIED_KEY), None);
        assert_eq!(last_notified_ms(&kv), 0);
    }

    #[test]
    fn unparseable_last_notified_reads_as_zero() {
        let mut kv = MemStore::new();
        kv.set(LAST_NOTIFIED_KEY, "garbage");
        assert_eq!(last_notified_ms(&kv), 0);
    }
}
