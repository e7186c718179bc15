//! Calendar days, day selection and per-day markers

pub mod marker;
pub use marker::{Marker, MarkerMap};

use chrono::NaiveDate;

/// Iterates over consecutive calendar days, both ends included.
///
/// The range is empty when `last` is before `first`.
#[derive(Clone, Debug)]
pub struct DayRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DayRange {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { next: Some(first), last }
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        if current > self.last {
            self.next = None;
            return None;
        }
        self.next = current.succ_opt();
        Some(current)
    }
}


/// The day the user has picked in the calendar, if any.
///
/// When a day is selected, only the tasks that cover it are displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DaySelection {
    selected: Option<NaiveDate>,
}

impl DaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Tapping a day selects it, tapping the selected day again clears the selection
    pub fn tap(&mut self, day: NaiveDate) {
        if self.selected == Some(day) {
            self.selected = None;
        } else {
            self.selected = Some(day);
        }
    }
}
