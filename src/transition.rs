//! Time-based visual transitions (checkbox fills, fades, slides)
//!
//! Transitions are evaluated lazily: they store where they started and where they go, and are sampled at a given instant.
//! Nothing here ticks on its own.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::task::{Task, TaskId};

/// A linear interpolation between two values over a fixed duration
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl Transition {
    /// A transition that already rests at `value`
    pub fn settled(value: f32, now: Instant) -> Self {
        Self { from: value, to: value, started_at: now, duration: Duration::ZERO }
    }

    pub fn start(from: f32, to: f32, now: Instant, duration: Duration) -> Self {
        Self { from, to, started_at: now, duration }
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * progress
    }

    /// The value this transition ends at
    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_running(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) < self.duration
    }

    /// Head toward a new target, starting from wherever this transition currently is
    pub fn retarget(&mut self, to: f32, now: Instant, duration: Duration) {
        let current = self.value_at(now);
        *self = Self::start(current, to, now, duration);
    }
}


/// The resting value of a task checkbox
pub fn completion_endpoint(completed: bool) -> f32 {
    if completed { 1.0 } else { 0.0 }
}

/// Checkbox transitions of every task, keyed by task id.
///
/// Snapshots from the store are merged into this map by id, so that a transition started by a toggle keeps running
/// when an unrelated change (or the echo of the toggle itself) comes back from the store.
///
/// While a write is in flight for a task, snapshots cannot know about it yet, so they never turn its transition back.
#[derive(Debug, Default)]
pub struct TransitionMap {
    transitions: HashMap<TaskId, Transition>,
    in_flight: Arc<Mutex<HashMap<TaskId, usize>>>,
}

/// Marks a completion write as not yet confirmed by the store, until this is dropped
#[derive(Debug)]
pub struct InFlightWrite {
    id: TaskId,
    in_flight: Arc<Mutex<HashMap<TaskId, usize>>>,
}

impl Drop for InFlightWrite {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap();
        if let Some(count) = in_flight.get_mut(&self.id) {
            *count -= 1;
            if *count == 0 {
                in_flight.remove(&self.id);
            }
        }
    }
}

impl TransitionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Merge a fresh snapshot.
    ///
    /// * tasks not seen before rest at their completion endpoint
    /// * transitions heading to the stored completion are kept untouched (even mid-flight)
    /// * transitions with a write in flight are kept untouched, the snapshot predates that write
    /// * transitions heading elsewhere (e.g. after a failed write) turn back toward the stored value
    /// * transitions of tasks that left the snapshot are dropped
    pub fn reconcile(&mut self, snapshot: &[Task], now: Instant, duration: Duration) {
        self.transitions.retain(|id, _| snapshot.iter().any(|task| task.id() == id));
        let in_flight = self.in_flight.lock().unwrap();

        for task in snapshot {
            let endpoint = completion_endpoint(task.completed());
            match self.transitions.get_mut(task.id()) {
                None => {
                    self.transitions.insert(task.id().clone(), Transition::settled(endpoint, now));
                },
                Some(_) if in_flight.contains_key(task.id()) => {
                    log::trace!("Task {} has a write in flight, keeping its transition", task.id());
                },
                Some(transition) => {
                    if (transition.target() - endpoint).abs() > f32::EPSILON {
                        log::debug!("Task {} is now {} in the store, reverting its transition",
                            task.id(), if task.completed() { "completed" } else { "pending" });
                        transition.retarget(endpoint, now, duration);
                    }
                },
            }
        }
    }

    /// Animate a task checkbox toward its (new) completion status
    pub fn drive(&mut self, id: &TaskId, completed: bool, now: Instant, duration: Duration) {
        let endpoint = completion_endpoint(completed);
        match self.transitions.get_mut(id) {
            Some(transition) => transition.retarget(endpoint, now, duration),
            None => {
                self.transitions.insert(id.clone(), Transition::start(1.0 - endpoint, endpoint, now, duration));
            },
        }
    }

    /// Register a completion write for `id`. Snapshots do not revert its transition until the returned guard is dropped.
    pub fn track_write(&self, id: &TaskId) -> InFlightWrite {
        *self.in_flight.lock().unwrap().entry(id.clone()).or_insert(0) += 1;
        InFlightWrite { id: id.clone(), in_flight: Arc::clone(&self.in_flight) }
    }

    pub fn has_write_in_flight(&self, id: &TaskId) -> bool {
        self.in_flight.lock().unwrap().contains_key(id)
    }

    pub fn get(&self, id: &TaskId) -> Option<&Transition> {
        self.transitions.get(id)
    }

    /// The current checkbox value of a task, or `None` if this task is unknown
    pub fn value(&self, id: &TaskId, now: Instant) -> Option<f32> {
        self.transitions.get(id).map(|t| t.value_at(now))
    }
}
