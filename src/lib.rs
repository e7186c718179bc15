//! This crate provides the state behind a calendar-driven task list.
//!
//! Tasks live in an external document store (see [`TaskStore`](traits::TaskStore)) that pushes the whole task
//! collection of a user whenever it changes. Everything displayed is derived from the latest snapshot and from the
//! day selected in the calendar, in the [`derivation`] module: the filtered and sorted task list, and the per-day
//! [`calendar`] markers.
//!
//! A [`TaskListScreen`] ties it all together: it holds the subscription to the store, the day selection, the checkbox
//! transitions (see [`transition`]), the navigation bar visibility (see [`nav_bar`]), and the [`TaskEditSession`]
//! used to add and edit tasks. \
//! Backends are handed over explicitly through a [`ClientContext`]. In-memory implementations are provided in
//! [`memory_store`] and [`memory_identity`], for tests and demos.

pub mod traits;
pub mod error;
pub use error::{Error, ValidationError};
pub mod config;

mod task;
pub use task::{OwnerId, PartialTaskFields, Task, TaskFields, TaskId};
pub mod calendar;
pub mod derivation;
pub mod transition;
pub mod subscription;
pub use subscription::{PendingWrite, Snapshot, Subscription};

pub mod toggle;
pub mod nav_bar;
pub mod edit_session;
pub use edit_session::TaskEditSession;
pub mod profile;
pub mod screen;
pub use screen::TaskListScreen;
pub mod context;
pub use context::ClientContext;

pub mod memory_store;
pub use memory_store::MemoryStore;
pub mod memory_identity;
pub use memory_identity::MemoryIdentity;
pub mod mock_behaviour;

pub mod utils;
