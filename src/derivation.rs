//! Everything a task list displays is derived from two inputs: the latest snapshot of tasks and the selected day.
//!
//! Derivation is a pure, full recomputation. Task sets are expected to be small (tens of tasks), so nothing is diffed or cached between two runs.

use chrono::NaiveDate;

use crate::calendar::{Marker, MarkerMap};
use crate::config::Palette;
use crate::task::Task;
use crate::utils::comparison::compare_tasks_by_start;

/// The output of a derivation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedTasks {
    /// Tasks to display, sorted by start date
    pub filtered: Vec<Task>,
    /// How each calendar day is highlighted
    pub markers: MarkerMap,
    /// Whether a day is selected but no task covers it
    pub empty_state: bool,
}

pub fn derive(tasks: &[Task], selected: Option<NaiveDate>, palette: &Palette) -> DerivedTasks {
    let mut filtered = filter_tasks(tasks, selected);
    sort_by_start(&mut filtered);
    let markers = mark_dates(tasks, selected, palette);
    let empty_state = selected.is_some() && filtered.is_empty();

    DerivedTasks { filtered, markers, empty_state }
}

/// Keep the tasks that cover `selected`, or every task if no day is selected
pub fn filter_tasks(tasks: &[Task], selected: Option<NaiveDate>) -> Vec<Task> {
    match selected {
        None => tasks.to_vec(),
        Some(day) => tasks.iter()
            .filter(|task| task.covers(day))
            .cloned()
            .collect(),
    }
}

/// Sort by ascending start date. Tasks that start at the same instant keep their relative order.
pub fn sort_by_start(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks_by_start);
}

/// Build the markers of every day covered by a task.
///
/// Tasks are processed in the given order. When several tasks cover the same day, the last one decides the dot color:
/// markers only ever show a single dot per day.
pub fn mark_dates(tasks: &[Task], selected: Option<NaiveDate>, palette: &Palette) -> MarkerMap {
    let mut markers = MarkerMap::new();

    for task in tasks {
        let color = palette.dot_color(task.completed());
        for day in task.days() {
            markers.insert(day, Marker::dot(color.clone()));
        }
    }

    if let Some(day) = selected {
        markers.entry(day)
            .or_default()
            .select(palette.selected.clone());
    }

    markers
}


/// Completion counts over a whole task set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed()).count();
        Self { total, completed, pending: total - completed }
    }
}
