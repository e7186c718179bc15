//! Utilities to compare tasks
//!
//! These can be used to sort results, e.g. by passing them to `sort_by`

use std::cmp::Ordering;

use crate::task::Task;

/// Compare tasks by their start date (earliest first)
pub fn compare_tasks_by_start(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(left.start_date(), right.start_date())
}

/// Compare tasks alphabetically, ignoring case
pub fn compare_tasks_alpha(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(&left.name().to_lowercase(), &right.name().to_lowercase())
}
