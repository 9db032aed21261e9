use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Single-character marker shown next to the task text
    pub fn marker(self) -> char {
        match self {
            Priority::Low => '·',
            Priority::Medium => '•',
            Priority::High => '!',
        }
    }

    /// Cycle to the next priority (used by the add form selector)
    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn prev(self) -> Priority {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Unique task identifier: epoch milliseconds scaled by 1000 plus a
/// sub-millisecond component, so ids created within the same millisecond
/// still differ. Stable for the task's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

/// Per-process sub-millisecond counter, seeded from the clock's
/// nanoseconds so restarts don't repeat the same sequence
fn id_seq() -> &'static AtomicU64 {
    static SEQ: OnceLock<AtomicU64> = OnceLock::new();
    SEQ.get_or_init(|| AtomicU64::new(u64::from(Utc::now().timestamp_subsec_nanos())))
}

impl TaskId {
    /// Generate a fresh id from the current wall clock
    pub fn generate() -> TaskId {
        let now = Utc::now();
        let millis = now.timestamp_millis().max(0) as u64;
        let frac = id_seq().fetch_add(1, Ordering::Relaxed) % 1000;
        TaskId(millis * 1000 + frac)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Display text; never persisted empty or whitespace-only
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// `None` means the task always lands in the no-date bucket
    #[serde(default, with = "due_date_serde")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new incomplete task with a fresh id
    pub fn new(text: String, priority: Priority, due_date: Option<NaiveDate>) -> Self {
        Task {
            id: TaskId::generate(),
            text,
            completed: false,
            priority,
            due_date,
        }
    }
}

/// Serde for the `dueDate` field. The original store writes `""` for a
/// missing due date, so both the empty string and null/absent map to
/// `None`, and `None` serializes back as `""`.
pub mod due_date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
