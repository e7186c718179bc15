//! An in-memory task store
//!
//! It behaves like a live document database: every change is broadcast as a full snapshot to the subscribers of the
//! affected owner. It is used in tests and demos, and failures can be injected with a [`MockBehaviour`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Error;
use crate::mock_behaviour::MockBehaviour;
use crate::subscription::{Snapshot, Subscription};
use crate::task::{OwnerId, PartialTaskFields, Task, TaskFields, TaskId};
use crate::traits::TaskStore;

/// The tasks of a single owner, in creation order
struct Collection {
    sender: watch::Sender<Snapshot>,
}

impl Collection {
    fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self { sender }
    }

    fn tasks(&self) -> Snapshot {
        self.sender.borrow().clone()
    }

    /// Change the tasks and notify every subscriber
    fn modify<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Snapshot) -> T,
    {
        let mut tasks = self.tasks();
        let result = f(&mut tasks);
        self.sender.send_replace(tasks);
        result
    }
}

/// A [`TaskStore`] that keeps everything in memory
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<OwnerId, Collection>>,
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_mock_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            mock_behaviour: Some(mock_behaviour),
        }
    }

    /// The current tasks of an owner
    pub fn tasks(&self, owner: &OwnerId) -> Snapshot {
        self.with_collection(owner, |collection| collection.tasks())
    }

    /// How many live subscriptions exist for the tasks of `owner`
    pub fn subscriber_count(&self, owner: &OwnerId) -> usize {
        self.with_collection(owner, |collection| collection.sender.receiver_count())
    }

    fn with_collection<F, T>(&self, owner: &OwnerId, f: F) -> T
    where
        F: FnOnce(&Collection) -> T,
    {
        let mut collections = self.collections.lock().unwrap();
        let collection = collections.entry(owner.clone()).or_insert_with(Collection::new);
        f(collection)
    }

    fn check_behaviour<F>(&self, check: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Error>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => check(&mut behaviour.lock().unwrap()),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn subscribe(&self, owner: &OwnerId) -> Result<Subscription, Error> {
        self.check_behaviour(MockBehaviour::can_subscribe)?;
        let receiver = self.with_collection(owner, |collection| collection.sender.subscribe());
        Ok(Subscription::new(owner.clone(), receiver))
    }

    async fn create(&self, owner: &OwnerId, fields: TaskFields) -> Result<(), Error> {
        self.check_behaviour(MockBehaviour::can_create)?;
        let task = Task::new(TaskId::random(), fields);
        log::debug!("Creating task {} ({}) for {}", task.id(), task.name(), owner);
        self.with_collection(owner, |collection| {
            collection.modify(|tasks| tasks.push(task))
        });
        Ok(())
    }

    async fn update(&self, owner: &OwnerId, id: &TaskId, changes: PartialTaskFields) -> Result<(), Error> {
        self.check_behaviour(MockBehaviour::can_update)?;
        log::debug!("Updating task {} for {}", id, owner);
        self.with_collection(owner, |collection| {
            if collection.tasks().iter().any(|t| t.id() == id) == false {
                return Err(Error::NotFound(id.clone()));
            }
            collection.modify(|tasks| {
                for task in tasks.iter_mut().filter(|t| t.id() == id) {
                    task.apply(&changes);
                }
            });
            Ok(())
        })
    }

    async fn delete(&self, owner: &OwnerId, id: &TaskId) -> Result<(), Error> {
        self.check_behaviour(MockBehaviour::can_delete)?;
        log::debug!("Deleting task {} for {}", id, owner);
        self.with_collection(owner, |collection| {
            if collection.tasks().iter().any(|t| t.id() == id) == false {
                return Err(Error::NotFound(id.clone()));
            }
            collection.modify(|tasks| tasks.retain(|t| t.id() != id));
            Ok(())
        })
    }
}
