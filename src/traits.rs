//! The backends this crate relies on: a live document store and an identity provider

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Error;
use crate::subscription::Subscription;
use crate::task::{OwnerId, PartialTaskFields, TaskFields, TaskId};

/// A store that holds the task collection of every user, and pushes the whole collection whenever it changes.
#[async_trait]
pub trait TaskStore {
    /// Start listening to the tasks of `owner`.
    ///
    /// The returned subscription yields the current tasks right away, then a full snapshot after every change.
    /// Dropping it stops the subscription.
    async fn subscribe(&self, owner: &OwnerId) -> Result<Subscription, Error>;

    /// Create a task. Its id is picked by the store.
    async fn create(&self, owner: &OwnerId, fields: TaskFields) -> Result<(), Error>;

    /// Apply `changes` to an existing task.
    ///
    /// Returns [`Error::NotFound`] in case this task does not exist (anymore)
    async fn update(&self, owner: &OwnerId, id: &TaskId, changes: PartialTaskFields) -> Result<(), Error>;

    /// Delete a task.
    ///
    /// Returns [`Error::NotFound`] in case this task does not exist (anymore)
    async fn delete(&self, owner: &OwnerId, id: &TaskId) -> Result<(), Error>;
}


/// A signed-in user, as seen by the identity provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: OwnerId,
    pub email: String,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait IdentityProvider {
    /// The currently signed-in user, if any
    fn current_user(&self) -> Option<AuthUser>;

    /// A receiver that is notified on every sign-in and sign-out
    fn auth_state(&self) -> watch::Receiver<Option<AuthUser>>;

    /// Change the display name of the current user
    async fn update_display_name(&self, display_name: &str) -> Result<(), Error>;

    /// Check the credentials of the current user again. This is required before sensitive operations
    async fn reauthenticate(&self, email: &str, password: &str) -> Result<(), Error>;

    async fn update_password(&self, new_password: &str) -> Result<(), Error>;
}
