//! Errors returned by this crate

use std::path::PathBuf;

use crate::task::TaskId;

/// A user input was rejected before anything was sent to a backend.
///
/// The `Display` output of each variant is meant to be shown as-is in an alert.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Task name required.")]
    EmptyTaskName,
    #[error("Username cannot be empty.")]
    EmptyUsername,
    #[error("All fields are required.")]
    MissingPasswordFields,
    #[error("New passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Network, permission or any other failure reported by a backend
    #[error("backend error: {0}")]
    Backend(String),
    /// The task does not exist (anymore) in the store
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("User not authenticated.")]
    NotAuthenticated,
    #[error("unable to load settings from {path:?}: {reason}")]
    Settings { path: PathBuf, reason: String },
}
