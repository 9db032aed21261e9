//! Pure projection of the task collection into what the screen shows:
//! a status filter, three due-date buckets, and aggregate counters.

use chrono::NaiveDate;

use crate::model::Task;

/// User-selected visibility mode, applied before bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Done,
}

impl Filter {
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Done => "done",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Done => task.completed,
        }
    }
}

/// Due-date grouping for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Today,
    Upcoming,
    NoDate,
}

impl Bucket {
    pub fn title(self) -> &'static str {
        match self {
            Bucket::Today => "Today",
            Bucket::Upcoming => "Upcoming",
            Bucket::NoDate => "No Due Date",
        }
    }
}

/// Classify a task by its due date relative to `today`. A due date in the
/// past (and not today) falls back to the no-date bucket; there is no
/// overdue bucket.
pub fn bucket_for(task: &Task, today: NaiveDate) -> Bucket {
    match task.due_date {
        None => Bucket::NoDate,
        Some(due) if due == today => Bucket::Today,
        Some(due) if due > today => Bucket::Upcoming,
        Some(_) => Bucket::NoDate,
    }
}

/// Everything the render pass needs for one frame. Counters are computed
/// over the unfiltered collection; the buckets hold only filtered tasks,
/// in stable collection order.
#[derive(Debug, Default)]
pub struct ViewModel<'a> {
    pub today: Vec<&'a Task>,
    pub upcoming: Vec<&'a Task>,
    pub no_date: Vec<&'a Task>,
    pub total: usize,
    pub done: usize,
    pub percent: u8,
}

impl<'a> ViewModel<'a> {
    /// Tasks in display order: today, then upcoming, then no-date
    pub fn visible(&self) -> impl Iterator<Item = &&'a Task> {
        self.today
            .iter()
            .chain(self.upcoming.iter())
            .chain(self.no_date.iter())
    }

    pub fn visible_len(&self) -> usize {
        self.today.len() + self.upcoming.len() + self.no_date.len()
    }

    pub fn nth(&self, index: usize) -> Option<&'a Task> {
        self.visible().nth(index).copied()
    }
}

/// Project the collection through the filter into buckets and counters
pub fn project<'a>(tasks: &'a [Task], filter: Filter, today: NaiveDate) -> ViewModel<'a> {
    let mut vm = ViewModel {
        total: tasks.len(),
        done: tasks.iter().filter(|t| t.completed).count(),
        ..ViewModel::default()
    };
    vm.percent = if vm.total == 0 {
        0
    } else {
        (100.0 * vm.done as f64 / vm.total as f64).round() as u8
    };

    for task in tasks.iter().filter(|t| filter.matches(t)) {
        match bucket_for(task, today) {
            Bucket::Today => vm.today.push(task),
            Bucket::Upcoming => vm.upcoming.push(task),
            Bucket::NoDate => vm.no_date.push(task),
        }
    }
    vm
}
