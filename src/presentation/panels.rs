//! Per-tab side panel state.

use crate::domain::TabId;
use std::collections::HashMap;

/// Whether the side panel is open, per tab.
///
/// Runtime-only: never persisted. Tabs without an entry count as closed.
/// Only the presentation layer mutates it; opening is reserved for
/// [`PanelToggle`](super::PanelToggle).
#[derive(Debug, Default)]
pub struct PanelStates {
    open: HashMap<TabId, bool>,
}

impl PanelStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the panel is open in `tab`.
    pub fn is_open(&self, tab: TabId) -> bool {
        self.open.get(&tab).copied().unwrap_or(false)
    }

    /// Returns true if `tab` has an entry.
    pub fn is_tracked(&self, tab: TabId) -> bool {
        self.open.contains_key(&tab)
    }

    /// Number of tracked tabs.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub(super) fn mark_open(&mut self, tab: TabId) {
        self.open.insert(tab, true);
    }

    pub(super) fn mark_closed(&mut self, tab: TabId) {
        self.open.insert(tab, false);
    }

    pub(super) fn forget(&mut self, tab: TabId) -> bool {
        self.open.remove(&tab).is_some()
    }

    pub(super) fn clear(&mut self) {
        self.open.clear();
    }
}
