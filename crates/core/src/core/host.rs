//! The seam between the navigator and whatever provides history and a DOM.
//!
//! A browser host lives in the `spa_web` crate; [`crate::memory::MemoryHost`]
//! implements the same contract in memory for tests and native runs.

use crate::error::NavError;

/// Handle for a registered listener; pass it back to [`Host::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Notifications a host feeds back into [`crate::navigator::Navigator::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A click on an element that has a live click listener.
    Click { element_id: String },
    /// Back/forward moved the history cursor; re-read [`Host::current_path`].
    HistoryPop,
}

impl HostEvent {
    pub fn click(element_id: impl Into<String>) -> Self {
        HostEvent::Click {
            element_id: element_id.into(),
        }
    }
}

pub trait Host {
    /// Path segment of the current location, e.g. `/nav`.
    fn current_path(&self) -> String;

    /// Push a history entry for `path` without reloading the page.
    fn push_path(&mut self, path: &str) -> Result<(), NavError>;

    fn title(&self) -> String;

    fn set_title(&mut self, title: &str);

    /// Markup currently held by the mount point.
    fn content(&self) -> String;

    /// Replace every child of the mount point with `markup`.
    fn replace_content(&mut self, markup: &str) -> Result<(), NavError>;

    fn has_element(&self, element_id: &str) -> bool;

    /// Subscribe to clicks on `#element_id` within the mounted content.
    fn listen_click(&mut self, element_id: &str) -> Result<ListenerId, NavError>;

    /// Subscribe to back/forward notifications.
    fn listen_history(&mut self) -> Result<ListenerId, NavError>;

    /// Unsubscribe. Releasing an unknown id is a no-op.
    fn release(&mut self, id: ListenerId);
}
