use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Optional overrides read from `config.toml` in the data directory.
/// A missing file means defaults; a parse error logs a warning and
/// falls back to defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Minimum minutes between two notifications
    pub cooldown_minutes: u64,
    /// Seconds between scheduler ticks
    pub tick_seconds: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            cooldown_minutes: 60,
            tick_seconds: 60,
        }
    }
}

impl Config {
    pub fn load(data_dir: &Path) -> Config {
        let path = data_dir.join("config.toml");
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Config::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "config unreadable, using defaults");
                Config::default()
            }
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.notify.cooldown_minutes * 60)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.notify.tick_seconds)
    }
}
