//! In-memory [`Host`]: a history stack with a cursor, a title, a content
//! string and a listener registry.
//!
//! User actions ([`MemoryHost::click`], [`MemoryHost::back`],
//! [`MemoryHost::forward`]) return the events a browser would fire, one per
//! live listener, so callers can feed them to the navigator.

use std::collections::BTreeMap;

use crate::error::NavError;
use crate::host::{Host, HostEvent, ListenerId};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Listener {
    Click(String),
    History,
}

#[derive(Debug, Clone)]
pub struct MemoryHost {
    entries: Vec<String>,
    cursor: usize,
    title: String,
    content: String,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener: u32,
}

impl MemoryHost {
    /// A host whose history holds exactly one entry, `initial_path`.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_path.into()],
            cursor: 0,
            title: String::new(),
            content: String::new(),
            listeners: BTreeMap::new(),
            next_listener: 0,
        }
    }

    /// Every history entry, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Simulate a click on `#element_id`.
    pub fn click(&self, element_id: &str) -> Vec<HostEvent> {
        if !self.has_element(element_id) {
            return Vec::new();
        }
        self.listeners
            .values()
            .filter(|l| matches!(l, Listener::Click(id) if id == element_id))
            .map(|_| HostEvent::click(element_id))
            .collect()
    }

    /// Browser back button. Returns no events when already at the oldest entry.
    pub fn back(&mut self) -> Vec<HostEvent> {
        if !self.can_go_back() {
            return Vec::new();
        }
        self.cursor -= 1;
        self.pop_events()
    }

    pub fn forward(&mut self) -> Vec<HostEvent> {
        if !self.can_go_forward() {
            return Vec::new();
        }
        self.cursor += 1;
        self.pop_events()
    }

    fn pop_events(&self) -> Vec<HostEvent> {
        self.listeners
            .values()
            .filter(|l| **l == Listener::History)
            .map(|_| HostEvent::HistoryPop)
            .collect()
    }

    pub fn live_click_listeners(&self) -> usize {
        self.listeners
            .values()
            .filter(|l| matches!(l, Listener::Click(_)))
            .count()
    }

    pub fn live_history_listeners(&self) -> usize {
        self.listeners
            .values()
            .filter(|l| **l == Listener::History)
            .count()
    }

    fn register(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.insert(id, listener);
        id
    }
}

impl Host for MemoryHost {
    fn current_path(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push_path(&mut self, path: &str) -> Result<(), NavError> {
        // Pushing from the middle of the stack discards the forward entries.
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
        Ok(())
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn replace_content(&mut self, markup: &str) -> Result<(), NavError> {
        self.content = markup.to_string();
        Ok(())
    }

    fn has_element(&self, element_id: &str) -> bool {
        // `id` must be a whole attribute name, not the tail of `data-id`.
        let needle = format!("id=\"{element_id}\"");
        self.content.match_indices(&needle).any(|(at, _)| {
            self.content[..at]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_whitespace() || c == '<')
        })
    }

    fn listen_click(&mut self, element_id: &str) -> Result<ListenerId, NavError> {
        if !self.has_element(element_id) {
            return Err(NavError::MissingElement(element_id.to_string()));
        }
        Ok(self.register(Listener::Click(element_id.to_string())))
    }

    fn listen_history(&mut self) -> Result<ListenerId, NavError> {
        Ok(self.register(Listener::History))
    }

    fn release(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
