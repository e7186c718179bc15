//! Completing and un-completing tasks

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::subscription::PendingWrite;
use crate::task::{OwnerId, PartialTaskFields, Task};
use crate::traits::TaskStore;
use crate::transition::TransitionMap;

/// Flips the completion status of tasks.
///
/// The checkbox transition starts right away, without waiting for the store to confirm the write.
/// Nothing is rolled back if the write fails: the next snapshot from the store brings the checkbox back to the stored value.
pub struct CompletionToggle<S> {
    store: Arc<S>,
    owner: OwnerId,
    duration: Duration,
}

impl<S> CompletionToggle<S>
where
    S: TaskStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, owner: OwnerId, duration: Duration) -> Self {
        Self { store, owner, duration }
    }

    /// Mark `task` as completed if it is pending, or as pending if it is completed.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime
    pub fn toggle(&self, task: &Task, transitions: &mut TransitionMap, now: Instant) -> PendingWrite {
        let completed = !task.completed();
        log::debug!("Toggling task {} to {}", task.id(), if completed { "completed" } else { "pending" });

        transitions.drive(task.id(), completed, now, self.duration);
        let in_flight = transitions.track_write(task.id());

        let store = Arc::clone(&self.store);
        let owner = self.owner.clone();
        let id = task.id().clone();
        PendingWrite::spawn(
            format!("set completion of task {}", id),
            async move {
                let result = store.update(&owner, &id, PartialTaskFields::completion(completed)).await;
                drop(in_flight);
                result
            },
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};

    use crate::error::Error;
    use crate::memory_store::MemoryStore;
    use crate::mock_behaviour::MockBehaviour;
    use crate::task::TaskFields;

    const DURATION: Duration = Duration::from_millis(250);

    async fn store_with_one_task(store: &MemoryStore, owner: &OwnerId) -> Task {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        store.create(owner, TaskFields::new("Water the plants".to_string(), date, date)).await.unwrap();
        store.tasks(owner).remove(0)
    }

    #[tokio::test]
    async fn toggling_twice_restores_completion_and_transition() {
        let _ = env_logger::builder().is_test(true).try_init();

        let store = Arc::new(MemoryStore::new());
        let owner = OwnerId::from("alice");
        let task = store_with_one_task(&store, &owner).await;
        let controller = CompletionToggle::new(Arc::clone(&store), owner.clone(), DURATION);

        let t0 = Instant::now();
        let mut transitions = TransitionMap::new();
        transitions.reconcile(&store.tasks(&owner), t0, DURATION);

        controller.toggle(&task, &mut transitions, t0).outcome().await.unwrap();
        // The transition starts before anything is read back from the store
        assert_eq!(transitions.get(task.id()).unwrap().target(), 1.0);
        assert!(!transitions.has_write_in_flight(task.id()));
        let toggled = store.tasks(&owner).remove(0);
        assert!(toggled.completed());

        let t1 = t0 + Duration::from_millis(300);
        controller.toggle(&toggled, &mut transitions, t1).outcome().await.unwrap();
        let restored = store.tasks(&owner).remove(0);
        assert_eq!(restored.completed(), task.completed());
        assert_eq!(transitions.value(task.id(), t1 + DURATION), Some(0.0));
    }

    #[tokio::test]
    async fn failed_write_keeps_the_transition_until_next_snapshot() {
        let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
        let store = Arc::new(MemoryStore::new_with_mock_behaviour(Arc::clone(&behaviour)));
        let owner = OwnerId::from("alice");
        let task = store_with_one_task(&store, &owner).await;
        let controller = CompletionToggle::new(Arc::clone(&store), owner.clone(), DURATION);

        let t0 = Instant::now();
        let mut transitions = TransitionMap::new();
        transitions.reconcile(&store.tasks(&owner), t0, DURATION);

        *behaviour.lock().unwrap() = MockBehaviour::fail_now(1);
        let outcome = controller.toggle(&task, &mut transitions, t0).outcome().await;
        assert!(matches!(outcome, Err(Error::Backend(_))));
        assert!(!transitions.has_write_in_flight(task.id()));
        assert_eq!(transitions.get(task.id()).unwrap().target(), 1.0);
        assert!(store.tasks(&owner)[0].completed() == false);

        transitions.reconcile(&store.tasks(&owner), t0 + DURATION, DURATION);
        assert_eq!(transitions.value(task.id(), t0 + DURATION * 3), Some(0.0));
    }
}
