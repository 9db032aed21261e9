use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::model::task::due_date_serde;
use crate::model::{Priority, Task, TaskId};

use super::kv::KvStore;
use super::settings;

pub const TASKS_KEY: &str = "tasks";

/// The in-memory task collection. Insertion order is the persisted order;
/// every mutation serializes the whole collection back to the store.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

/// Loose task shape accepted at load time. Legacy entries may lack an id
/// (or carry a float id from the original store); everything else falls
/// back to defaults rather than dropping the entry.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    #[serde(default)]
    id: Option<serde_json::Number>,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Priority,
    #[serde(default, with = "due_date_serde")]
    due_date: Option<NaiveDate>,
}

impl TaskStore {
    /// Load the collection from the store. Malformed or absent data is an
    /// empty collection. Entries without a usable id get a fresh one and
    /// the migrated collection is written back once.
    pub fn load(kv: &mut dyn KvStore) -> TaskStore {
        let raw = match kv.get(TASKS_KEY) {
            Some(raw) => raw,
            None => return TaskStore::default(),
        };

        let entries: Vec<RawTask> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "task data unreadable, starting empty");
                return TaskStore::default();
            }
        };

        let mut seen: HashSet<TaskId> = HashSet::new();
        let mut migrated = 0usize;
        let tasks: Vec<Task> = entries
            .into_iter()
            .map(|entry| {
                let id = entry
                    .id
                    .as_ref()
                    .and_then(number_to_id)
                    .filter(|id| !seen.contains(id))
                    .unwrap_or_else(|| {
                        migrated += 1;
                        fresh_id(&seen)
                    });
                seen.insert(id);
                Task {
                    id,
                    text: entry.text,
                    completed: entry.completed,
                    priority: entry.priority,
                    due_date: entry.due_date,
                }
            })
            .collect();

        let store = TaskStore { tasks };
        if migrated > 0 {
            info!(migrated, "assigned ids to legacy tasks");
            store.persist(kv);
        }
        debug!(count = store.tasks.len(), "loaded tasks");
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn any_incomplete(&self) -> bool {
        self.tasks.iter().any(|t| !t.completed)
    }

    /// Append a new task. Blank text (after trimming) is a silent no-op.
    /// Returns the new task's id when one was added.
    pub fn add(
        &mut self,
        kv: &mut dyn KvStore,
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut task = Task::new(text.to_string(), priority, due_date);
        while self.tasks.iter().any(|t| t.id == task.id) {
            task.id = TaskId::generate();
        }
        let id = task.id;
        self.tasks.push(task);
        self.persist(kv);
        Some(id)
    }

    /// Flip a task's completed flag. Unknown ids are ignored. Any toggle
    /// clears the last-notified time so a reopened task can trigger a
    /// fresh notification cycle.
    pub fn toggle(&mut self, kv: &mut dyn KvStore, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        settings::clear_last_notified(kv);
        self.persist(kv);
        true
    }

    /// Replace a task's text. A blank replacement (after trimming) is
    /// discarded and the original text kept.
    pub fn edit(&mut self, kv: &mut dyn KvStore, id: TaskId, new_text: &str) -> bool {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.text = new_text.to_string();
        self.persist(kv);
        true
    }

    /// Remove the task with the given id (no-op if absent)
    pub fn remove(&mut self, kv: &mut dyn KvStore, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist(kv);
        true
    }

    /// Serialize the full collection under the tasks key (write-through)
    fn persist(&self, kv: &mut dyn KvStore) {
        match serde_json::to_string(&self.tasks) {
            Ok(serialized) => kv.set(TASKS_KEY, &serialized),
            Err(err) => warn!(error = %err, "task serialization failed"),
        }
    }
}

fn number_to_id(num: &serde_json::Number) -> Option<TaskId> {
    if let Some(id) = num.as_u64() {
        return Some(TaskId(id));
    }
    // Legacy float ids (epoch millis + random fraction) scale to the same
    // millis×1000 space the generator uses.
    num.as_f64()
        .filter(|f| f.is_finite() && *f > 0.0)
        .map(|f| TaskId((f * 1000.0) as u64))
}

fn fresh_id(seen: &HashSet<TaskId>) -> TaskId {
    let mut id = TaskId::generate();
    while seen.contains(&id) {
        id = TaskId::generate();
    }
    id
}
