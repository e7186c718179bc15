//! The add/edit task form

use chrono::{DateTime, Utc};

use crate::error::{Error, ValidationError};
use crate::task::{OwnerId, PartialTaskFields, Task, TaskFields};
use crate::traits::TaskStore;

/// The transient state of the form used to add a task, or to edit an existing one.
///
/// Nothing is inserted locally on commit: the created or edited task shows up once the store pushes its next snapshot.
#[derive(Clone, Debug)]
pub struct TaskEditSession {
    task_name: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    completed: bool,
    /// The task being edited, or `None` when adding a new task
    editing_task: Option<Task>,
    is_open: bool,
}

impl Default for TaskEditSession {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            task_name: String::new(),
            start_date: now,
            end_date: now,
            completed: false,
            editing_task: None,
            is_open: false,
        }
    }
}

impl TaskEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_name(&self) -> &str                { &self.task_name }
    pub fn start_date(&self) -> &DateTime<Utc>     { &self.start_date }
    pub fn end_date(&self) -> &DateTime<Utc>       { &self.end_date }
    pub fn completed(&self) -> bool                { self.completed }
    pub fn editing_task(&self) -> Option<&Task>    { self.editing_task.as_ref() }
    pub fn is_open(&self) -> bool                  { self.is_open }

    pub fn set_task_name(&mut self, name: String)              { self.task_name = name; }
    pub fn set_start_date(&mut self, date: DateTime<Utc>)      { self.start_date = date; }
    pub fn set_end_date(&mut self, date: DateTime<Utc>)        { self.end_date = date; }
    pub fn set_completed(&mut self, completed: bool)           { self.completed = completed; }

    /// Open an empty form, to add a new task
    pub fn open_for_create(&mut self) {
        self.reset();
        self.is_open = true;
    }

    /// Open a form pre-filled with an existing task
    pub fn open_for_edit(&mut self, task: &Task) {
        self.task_name = task.name().to_string();
        self.start_date = *task.start_date();
        self.end_date = *task.end_date();
        self.completed = task.completed();
        self.editing_task = Some(task.clone());
        self.is_open = true;
    }

    /// Close the form, discarding its content
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// The task document this form currently describes
    pub fn validate(&self) -> Result<TaskFields, ValidationError> {
        if self.task_name.trim().is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }
        Ok(TaskFields {
            name: self.task_name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            completed: self.completed,
        })
    }

    /// Send the form content to the store: this updates the edited task, or creates a new one.
    ///
    /// On success, the form is reset and closed.
    /// On failure, it is left untouched, so that the user can fix it or try again.
    pub async fn commit<S>(&mut self, store: &S, owner: &OwnerId) -> Result<(), Error>
    where
        S: TaskStore + ?Sized,
    {
        let fields = self.validate()?;

        match &self.editing_task {
            Some(task) => {
                log::info!("Saving changes of task {}", task.id());
                store.update(owner, task.id(), PartialTaskFields::from(fields)).await?;
            },
            None => {
                log::info!("Adding task {:?}", fields.name);
                store.create(owner, fields).await?;
            },
        }

        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
