//! Panel toggle controller: explicit user intent to open or close the panel.

use super::PanelStates;
use super::host::{Host, PanelOptions, PanelScope};
use crate::domain::TabId;

/// Result of a toggle or open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTransition {
    Opened,
    Closed,
    /// The panel could not be enabled or shown; the tab stays closed.
    OpenFailed,
}

/// Applies user open/close requests to one tab's panel.
///
/// Borrows the per-tab state from [`PresentationSync`](super::PresentationSync)
/// so every user-driven change goes through one place.
pub struct PanelToggle<'a, H> {
    panels: &'a mut PanelStates,
    host: &'a mut H,
}

impl<'a, H: Host> PanelToggle<'a, H> {
    pub fn new(panels: &'a mut PanelStates, host: &'a mut H) -> Self {
        Self { panels, host }
    }

    /// Closes the panel if open, otherwise opens it.
    pub fn toggle(&mut self, tab: TabId) -> PanelTransition {
        if self.panels.is_open(tab) {
            self.close(tab);
            PanelTransition::Closed
        } else {
            self.open(tab)
        }
    }

    /// Enables the panel for `tab`, then shows it.
    ///
    /// The panel is only shown once enabling succeeded, and the tab is only
    /// recorded as open once both steps succeeded.
    pub fn open(&mut self, tab: TabId) -> PanelTransition {
        if let Err(err) = self
            .host
            .set_panel_options(PanelScope::Tab(tab), PanelOptions::panel_document())
        {
            tracing::error!(tab_id = %tab, error = %err, "failed to enable side panel");
            self.panels.mark_closed(tab);
            return PanelTransition::OpenFailed;
        }

        if let Err(err) = self.host.open_panel(tab) {
            tracing::error!(tab_id = %tab, error = %err, "failed to open side panel");
            self.panels.mark_closed(tab);
            return PanelTransition::OpenFailed;
        }

        self.panels.mark_open(tab);
        tracing::debug!(tab_id = %tab, "side panel opened");
        PanelTransition::Opened
    }

    /// Disables the panel for `tab` and records it closed.
    ///
    /// The tab is recorded closed even when disabling fails.
    pub fn close(&mut self, tab: TabId) {
        if let Err(err) = self
            .host
            .set_panel_options(PanelScope::Tab(tab), PanelOptions::Disabled)
        {
            tracing::warn!(tab_id = %tab, error = %err, "failed to disable side panel");
        }
        self.panels.mark_closed(tab);
        tracing::debug!(tab_id = %tab, "side panel closed");
    }

    /// Records that the panel in `tab` was closed from inside the panel.
    pub fn acknowledge_closed(&mut self, tab: TabId) {
        self.panels.mark_closed(tab);
    }

    /// Rolls back an [`open`](Self::open) that the browser later rejected.
    ///
    /// Hosts that apply effects asynchronously report enable or show failures
    /// after the tab was recorded open. The tab goes back to closed and its
    /// panel is disabled again.
    pub fn open_failed(&mut self, tab: TabId) -> PanelTransition {
        let was_open = self.panels.is_open(tab);
        self.panels.mark_closed(tab);
        if let Err(err) = self
            .host
            .set_panel_options(PanelScope::Tab(tab), PanelOptions::Disabled)
        {
            tracing::warn!(tab_id = %tab, error = %err, "failed to disable side panel");
        }
        tracing::debug!(tab_id = %tab, was_open, "side panel open rolled back");
        PanelTransition::OpenFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::testing::{Call, RecordingHost};
    use pretty_assertions::assert_eq;

    const TAB: TabId = TabId::new(7);

    #[test]
    fn toggle_opens_closed_tab() {
        let mut panels = PanelStates::new();
        let mut host = RecordingHost::default();

        let outcome = PanelToggle::new(&mut panels, &mut host).toggle(TAB);

        assert_eq!(outcome, PanelTransition::Opened);
        assert!(panels.is_open(TAB));
        assert_eq!(
            host.calls,
            vec![
                Call::SetPanelOptions(PanelScope::Tab(TAB), PanelOptions::panel_document()),
                Call::OpenPanel(TAB),
            ]
        );
    }

    #[test]
    fn toggle_closes_open_tab() {
        let mut panels = PanelStates::new();
        let mut host = RecordingHost::default();
        let mut toggle = PanelToggle::new(&mut panels, &mut host);
        toggle.toggle(TAB);

        assert_eq!(toggle.toggle(TAB), PanelTransition::Closed);
        assert!(!panels.is_open(TAB));
        assert_eq!(
            host.calls.last(),
            Some(&Call::SetPanelOptions(PanelScope::Tab(TAB), PanelOptions::Disabled))
        );
    }

    #[test]
    fn failed_enable_never_opens() {
        let mut panels = PanelStates::new();
        let mut host = RecordingHost::default().failing("setPanelOptions");

        let outcome = PanelToggle::new(&mut panels, &mut host).toggle(TAB);

        assert_eq!(outcome, PanelTransition::OpenFailed);
        assert!(!panels.is_open(TAB));
        assert!(!host.calls.contains(&Call::OpenPanel(TAB)));
    }

    #[test]
    fn failed_open_stays_closed() {
        let mut panels = PanelStates::new();
        let mut host = RecordingHost::default().failing("openPanel");

        let outcome = PanelToggle::new(&mut panels, &mut host).toggle(TAB);

        assert_eq!(outcome, PanelTransition::OpenFailed);
        assert!(!panels.is_open(TAB));
    }

    #[test]
    fn close_records_state_even_if_disable_fails() {
        let mut panels = PanelStates::new();
        panels.mark_open(TAB);
        let mut host = RecordingHost::default().failing("setPanelOptions");

        PanelToggle::new(&mut panels, &mut host).close(TAB);

        assert!(!panels.is_open(TAB));
        assert!(panels.is_tracked(TAB));
    }

    #[test]
    fn rejected_open_rolls_back_to_closed() {
        let mut panels = PanelStates::new();
        let mut host = RecordingHost::default();
        let mut toggle = PanelToggle::new(&mut panels, &mut host);
        assert_eq!(toggle.toggle(TAB), PanelTransition::Opened);

        assert_eq!(toggle.open_failed(TAB), PanelTransition::OpenFailed);
        // The next click opens again instead of closing a panel that never showed.
        assert_eq!(toggle.toggle(TAB), PanelTransition::Opened);

        assert!(panels.is_open(TAB));
        assert_eq!(
            host.calls,
            vec![
                Call::SetPanelOptions(PanelScope::Tab(TAB), PanelOptions::panel_document()),
                Call::OpenPanel(TAB),
                Call::SetPanelOptions(PanelScope::Tab(TAB), PanelOptions::Disabled),
                Call::SetPanelOptions(PanelScope::Tab(TAB), PanelOptions::panel_document()),
                Call::OpenPanel(TAB),
            ]
        );
    }

    #[test]
    fn acknowledge_closed_makes_no_host_calls() {
        let mut panels = PanelStates::new();
        panels.mark_open(TAB);
        let mut host = RecordingHost::default();

        PanelToggle::new(&mut panels, &mut host).acknowledge_closed(TAB);

        assert!(!panels.is_open(TAB));
        assert!(host.calls.is_empty());
    }
}
