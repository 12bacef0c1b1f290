//! Recording host for presentation tests.

use super::host::{Host, HostError, HostResult, IconVariant, PanelOptions, PanelScope};
use crate::domain::TabId;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SetIcon(TabId, IconVariant),
    ClearBadge(TabId),
    SetPanelOptions(PanelScope, PanelOptions),
    SetPanelBehavior(bool),
    OpenPanel(TabId),
    ShowToast(TabId, String),
}

/// Records every call and fails the operations named in `failing`.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) calls: Vec<Call>,
    failing: HashSet<&'static str>,
}

impl RecordingHost {
    pub(crate) fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub(crate) fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub(crate) fn icons(&self) -> Vec<(TabId, IconVariant)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetIcon(tab, icon) => Some((*tab, *icon)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn toasts(&self) -> Vec<(TabId, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::ShowToast(tab, url) => Some((*tab, url.clone())),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_panel_options(&self, tab: TabId) -> Option<PanelOptions> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::SetPanelOptions(PanelScope::Tab(t), options) if *t == tab => Some(*options),
            _ => None,
        })
    }

    fn record(&mut self, operation: &'static str, call: Call) -> HostResult<()> {
        self.calls.push(call);
        if self.failing.contains(operation) {
            Err(HostError::new(operation, "simulated failure"))
        } else {
            Ok(())
        }
    }
}

impl Host for RecordingHost {
    fn set_icon(&mut self, tab: TabId, icon: IconVariant) -> HostResult<()> {
        self.record("setIcon", Call::SetIcon(tab, icon))
    }

    fn clear_badge(&mut self, tab: TabId) -> HostResult<()> {
        self.record("clearBadge", Call::ClearBadge(tab))
    }

    fn set_panel_options(&mut self, scope: PanelScope, options: PanelOptions) -> HostResult<()> {
        self.record("setPanelOptions", Call::SetPanelOptions(scope, options))
    }

    fn set_panel_behavior(&mut self, open_on_action_click: bool) -> HostResult<()> {
        self.record("setPanelBehavior", Call::SetPanelBehavior(open_on_action_click))
    }

    fn open_panel(&mut self, tab: TabId) -> HostResult<()> {
        self.record("openPanel", Call::OpenPanel(tab))
    }

    fn show_toast(&mut self, tab: TabId, url: &str, _text: &str) -> HostResult<()> {
        self.record("showToast", Call::ShowToast(tab, url.to_string()))
    }
}
