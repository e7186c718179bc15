//! Date-ranged to-do tasks

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::DayRange;

/// The identifier of the user that owns a task collection
pub type OwnerId = String;

/// An opaque task identifier, assigned by the store when the task is created
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}


/// The content of a task document, as it is stored in the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskFields {
    pub fn new(name: String, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self { name, start_date, end_date, completed: false }
    }
}

/// A set of changes to apply on an existing task document.
///
/// Fields that are `None` are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTaskFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl PartialTaskFields {
    /// Changes that only set the completion status
    pub fn completion(completed: bool) -> Self {
        Self { completed: Some(completed), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_date.is_none() && self.end_date.is_none() && self.completed.is_none()
    }

    pub fn apply_to(&self, fields: &mut TaskFields) {
        if let Some(name) = &self.name {
            fields.name = name.clone();
        }
        if let Some(start_date) = self.start_date {
            fields.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            fields.end_date = end_date;
        }
        if let Some(completed) = self.completed {
            fields.completed = completed;
        }
    }
}

impl From<TaskFields> for PartialTaskFields {
    fn from(fields: TaskFields) -> Self {
        Self {
            name: Some(fields.name),
            start_date: Some(fields.start_date),
            end_date: Some(fields.end_date),
            completed: Some(fields.completed),
        }
    }
}


/// A to-do task, spanning one or several calendar days
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    #[serde(flatten)]
    fields: TaskFields,
}

impl Task {
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> &TaskId                 { &self.id }
    pub fn name(&self) -> &str                  { &self.fields.name }
    pub fn start_date(&self) -> &DateTime<Utc>  { &self.fields.start_date }
    pub fn end_date(&self) -> &DateTime<Utc>    { &self.fields.end_date }
    pub fn completed(&self) -> bool             { self.fields.completed }
    pub fn fields(&self) -> &TaskFields         { &self.fields }

    /// The (UTC) calendar day this task starts on
    pub fn start_day(&self) -> NaiveDate {
        self.fields.start_date.date_naive()
    }

    /// The (UTC) calendar day this task ends on
    pub fn end_day(&self) -> NaiveDate {
        self.fields.end_date.date_naive()
    }

    /// Whether `day` is within this task range (both ends included).
    ///
    /// Time of day is ignored. A task whose end is before its start covers no day at all.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_day() <= day && day <= self.end_day()
    }

    /// Every calendar day covered by this task, in ascending order
    pub fn days(&self) -> DayRange {
        DayRange::new(self.start_day(), self.end_day())
    }

    /// Apply changes coming from the store
    pub(crate) fn apply(&mut self, changes: &PartialTaskFields) {
        changes.apply_to(&mut self.fields);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(start: (u32, u32), end: (u32, u32)) -> Task {
        let start = Utc.with_ymd_and_hms(2024, start.0, start.1, 18, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, end.0, end.1, 7, 0, 0).unwrap();
        Task::new(TaskId::from("t"), TaskFields::new("Task".to_string(), start, end))
    }

    #[test]
    fn coverage_ignores_time_of_day() {
        let t = task((5, 1), (5, 3));
        assert!(t.covers(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        assert!(t.covers(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()));
        assert!(!t.covers(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()));
        assert!(!t.covers(NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()));
        assert_eq!(t.days().count(), 3);
    }

    #[test]
    fn inverted_range_covers_nothing() {
        let t = task((5, 3), (5, 1));
        assert!(!t.covers(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()));
        assert_eq!(t.days().count(), 0);
    }

    #[test]
    fn document_shape() {
        let t = task((5, 1), (5, 2));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["id"], "t");
        assert_eq!(json["name"], "Task");
        assert_eq!(json["completed"], false);
        assert!(json["startDate"].as_str().unwrap().starts_with("2024-05-01T18:30:00"));

        // `completed` is optional in stored documents
        let fields: TaskFields = serde_json::from_str(
            r#"{"name": "n", "startDate": "2024-05-01T00:00:00Z", "endDate": "2024-05-01T00:00:00Z"}"#
        ).unwrap();
        assert_eq!(fields.completed, false);
    }

    #[test]
    fn partial_changes() {
        let mut t = task((5, 1), (5, 2));
        let changes = PartialTaskFields::completion(true);
        assert!(!changes.is_empty());
        t.apply(&changes);
        assert!(t.completed());
        assert_eq!(t.name(), "Task");
        assert!(PartialTaskFields::default().is_empty());
    }
}
