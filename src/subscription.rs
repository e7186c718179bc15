//! Live subscriptions to a task collection, and handles to in-flight writes

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::Error;
use crate::task::{OwnerId, Task};

/// The full, authoritative task set of an owner, as pushed by the store
pub type Snapshot = Vec<Task>;

/// A live query over the tasks of one owner.
///
/// The subscription ends when this is dropped.
pub struct Subscription {
    owner: OwnerId,
    receiver: watch::Receiver<Snapshot>,
    /// Whether the current value has not been handed out yet
    primed: bool,
}

impl Subscription {
    pub fn new(owner: OwnerId, receiver: watch::Receiver<Snapshot>) -> Self {
        log::debug!("Subscribing to the tasks of {}", owner);
        Self { owner, receiver, primed: true }
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Wait for the next snapshot.
    ///
    /// The first call returns immediately with the current tasks.
    /// Returns `None` once the store has gone away.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if self.primed == false {
            if self.receiver.changed().await.is_err() {
                log::debug!("Task store for {} has been closed", self.owner);
                return None;
            }
        }
        Some(self.current())
    }

    /// Returns a snapshot if one is available right now, without waiting
    pub fn try_next(&mut self) -> Option<Snapshot> {
        if self.primed || self.receiver.has_changed().unwrap_or(false) {
            Some(self.current())
        } else {
            None
        }
    }

    fn current(&mut self) -> Snapshot {
        self.primed = false;
        self.receiver.borrow_and_update().clone()
    }

    /// Explicitly end this subscription
    pub fn unsubscribe(self) {
        // Dropping is enough
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        log::debug!("Unsubscribing from the tasks of {}", self.owner);
    }
}


/// A write that has been sent to a backend.
///
/// The write goes on even if this handle is dropped. There is no way to cancel it.
pub struct PendingWrite {
    description: String,
    handle: JoinHandle<Result<(), Error>>,
}

impl PendingWrite {
    /// Start `write` in the background.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime
    pub fn spawn<F>(description: String, write: F) -> Self
    where
        F: Future<Output = Result<(), Error>> + Send + 'static,
    {
        let log_description = description.clone();
        let handle = tokio::spawn(async move {
            let result = write.await;
            if let Err(err) = &result {
                log::warn!("Unable to {}: {}", log_description, err);
            }
            result
        });
        Self { description, handle }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Wait for the backend to confirm (or reject) this write
    pub async fn outcome(self) -> Result<(), Error> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(Error::Backend(format!("{} was aborted: {}", self.description, err))),
        }
    }
}
