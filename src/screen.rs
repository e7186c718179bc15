//! The main task list: a calendar on top, and the tasks of the selected day below it

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::calendar::{DaySelection, MarkerMap};
use crate::config::Settings;
use crate::derivation::{derive, DerivedTasks, TaskStats};
use crate::edit_session::TaskEditSession;
use crate::error::Error;
use crate::nav_bar::{NavBarAnimation, ScrollVisibility};
use crate::subscription::{PendingWrite, Snapshot, Subscription};
use crate::task::{OwnerId, Task, TaskId};
use crate::toggle::CompletionToggle;
use crate::traits::TaskStore;
use crate::transition::{Transition, TransitionMap};

/// The state of the task list of one user.
///
/// It holds a live subscription to the store for as long as it exists.
pub struct TaskListScreen<S> {
    owner: OwnerId,
    store: Arc<S>,
    settings: Settings,
    subscription: Subscription,

    /// Whether no snapshot has been received yet
    loading: bool,
    tasks: Snapshot,
    selection: DaySelection,
    derived: DerivedTasks,

    transitions: TransitionMap,
    empty_state_fade: Transition,
    toggle: CompletionToggle<S>,

    scroll: ScrollVisibility,
    nav_bar: NavBarAnimation,

    edit_session: TaskEditSession,
}

impl<S> TaskListScreen<S>
where
    S: TaskStore + Send + Sync + 'static,
{
    /// Subscribe to the tasks of `owner`, and display them right away
    pub async fn mount(store: Arc<S>, owner: OwnerId, settings: Settings) -> Result<Self, Error> {
        let subscription = store.subscribe(&owner).await?;
        let now = Instant::now();
        let toggle = CompletionToggle::new(Arc::clone(&store), owner.clone(), settings.completion_transition());
        let nav_bar = NavBarAnimation::new(settings.nav_bar_slide_px, settings.nav_bar_transition(), now);

        let mut screen = Self {
            owner,
            store,
            settings,
            subscription,
            loading: true,
            tasks: Vec::new(),
            selection: DaySelection::new(),
            derived: DerivedTasks::default(),
            transitions: TransitionMap::new(),
            empty_state_fade: Transition::settled(0.0, now),
            toggle,
            scroll: ScrollVisibility::new(),
            nav_bar,
            edit_session: TaskEditSession::new(),
        };
        screen.poll_snapshot(now);
        log::info!("Task list of {} mounted ({} tasks)", screen.owner, screen.tasks.len());
        Ok(screen)
    }

    /// Stop listening to the store
    pub fn unmount(self) {
        log::info!("Task list of {} unmounted", self.owner);
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every task of the latest snapshot, in store order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the whole task set with a snapshot from the store
    pub fn apply_snapshot(&mut self, snapshot: Snapshot, now: Instant) {
        log::debug!("Received a snapshot of {} tasks", snapshot.len());
        self.transitions.reconcile(&snapshot, now, self.settings.completion_transition());
        self.tasks = snapshot;
        self.loading = false;
        self.rederive(now);
    }

    /// Apply the pending snapshot, if any. Returns whether there was one.
    pub fn poll_snapshot(&mut self, now: Instant) -> bool {
        match self.subscription.try_next() {
            None => false,
            Some(snapshot) => {
                self.apply_snapshot(snapshot, now);
                true
            },
        }
    }

    /// Wait for the next snapshot, and apply it as if it had been received at `now`.
    ///
    /// Returns `false` once the store has gone away.
    pub async fn refresh(&mut self, now: Instant) -> bool {
        match self.subscription.next().await {
            None => false,
            Some(snapshot) => {
                self.apply_snapshot(snapshot, now);
                true
            },
        }
    }

    fn rederive(&mut self, now: Instant) {
        let was_empty = self.derived.empty_state;
        self.derived = derive(&self.tasks, self.selection.selected(), self.settings.palette());

        match (was_empty, self.derived.empty_state) {
            (false, true) => {
                self.empty_state_fade = Transition::start(0.0, 1.0, now, self.settings.empty_state_fade());
            },
            (_, false) => {
                self.empty_state_fade = Transition::settled(0.0, now);
            },
            (true, true) => {},
        }
    }


    pub fn tap_day(&mut self, day: NaiveDate, now: Instant) {
        self.selection.tap(day);
        log::debug!("Selected day: {:?}", self.selection.selected());
        self.rederive(now);
    }

    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.selection.selected()
    }

    /// The tasks to display, sorted by start date
    pub fn visible_tasks(&self) -> &[Task] {
        &self.derived.filtered
    }

    pub fn markers(&self) -> &MarkerMap {
        &self.derived.markers
    }

    /// Whether a "no task found" message should be displayed instead of the list
    pub fn shows_empty_state(&self) -> bool {
        self.derived.empty_state
    }

    pub fn empty_state_opacity(&self, now: Instant) -> f32 {
        self.empty_state_fade.value_at(now)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }


    /// Flip the completion of a task of the current snapshot
    pub fn toggle_completion(&mut self, id: &TaskId, now: Instant) -> Result<PendingWrite, Error> {
        let task = self.tasks.iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        Ok(self.toggle.toggle(task, &mut self.transitions, now))
    }

    /// The checkbox fill of a task, between 0 (pending) and 1 (completed)
    pub fn transition_value(&self, id: &TaskId, now: Instant) -> Option<f32> {
        self.transitions.value(id, now)
    }

    pub fn delete_task(&self, id: &TaskId) -> PendingWrite {
        let store = Arc::clone(&self.store);
        let owner = self.owner.clone();
        let id = id.clone();
        PendingWrite::spawn(
            format!("delete task {}", id),
            async move { store.delete(&owner, &id).await },
        )
    }


    /// Feed the scroll offset of the list. Returns the new nav bar visibility if it has changed.
    pub fn on_scroll(&mut self, offset: f64, now: Instant) -> Option<bool> {
        let change = self.scroll.on_scroll(offset);
        if let Some(visible) = change {
            self.nav_bar.on_visibility(visible, now);
        }
        change
    }

    pub fn show_nav_bar(&self) -> bool {
        self.scroll.show_nav_bar()
    }

    pub fn nav_bar(&self) -> &NavBarAnimation {
        &self.nav_bar
    }


    pub fn edit_session(&self) -> &TaskEditSession {
        &self.edit_session
    }

    pub fn edit_session_mut(&mut self) -> &mut TaskEditSession {
        &mut self.edit_session
    }

    pub fn open_for_create(&mut self) {
        self.edit_session.open_for_create();
    }

    /// Open the edit form of a task of the current snapshot
    pub fn open_for_edit(&mut self, id: &TaskId) -> Result<(), Error> {
        let task = self.tasks.iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        self.edit_session.open_for_edit(task);
        Ok(())
    }

    pub async fn commit_edit(&mut self) -> Result<(), Error> {
        self.edit_session.commit(&*self.store, &self.owner).await
    }
}
