//! Backend clients shared by the whole application
//!
//! A [`ClientContext`] is built once at start-up, passed to whatever needs a backend, and torn down at shutdown.
//! Tests build theirs with the in-memory backends.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::Settings;
use crate::error::Error;
use crate::profile::AuthProfile;
use crate::screen::TaskListScreen;
use crate::traits::{AuthUser, IdentityProvider, TaskStore};

pub struct ClientContext<S, I> {
    store: Arc<S>,
    identity: Arc<I>,
    settings: Settings,
}

impl<S, I> ClientContext<S, I>
where
    S: TaskStore + Send + Sync + 'static,
    I: IdentityProvider + Send + Sync,
{
    pub fn init(store: Arc<S>, identity: Arc<I>, settings: Settings) -> Self {
        log::info!("Client context initialized");
        Self { store, identity, settings }
    }

    /// Release the backend clients
    pub fn teardown(self) {
        log::info!("Client context torn down");
    }

    pub fn store(&self) -> &Arc<S>          { &self.store }
    pub fn identity(&self) -> &Arc<I>       { &self.identity }
    pub fn settings(&self) -> &Settings     { &self.settings }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.identity.current_user()
    }

    /// Notified on every sign-in and sign-out. A task list should be unmounted (and a new one mounted) on every change.
    pub fn auth_state(&self) -> watch::Receiver<Option<AuthUser>> {
        self.identity.auth_state()
    }

    pub fn profile(&self) -> Result<AuthProfile, Error> {
        AuthProfile::load(&*self.identity)
    }

    /// Mount the task list of the signed-in user
    pub async fn open_task_list(&self) -> Result<TaskListScreen<S>, Error> {
        let user = self.current_user().ok_or(Error::NotAuthenticated)?;
        TaskListScreen::mount(Arc::clone(&self.store), user.uid, self.settings.clone()).await
    }
}
