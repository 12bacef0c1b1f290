//! Host implementation that queues browser effects for the extension shim.

use crate::domain::TabId;
use crate::presentation::{Host, HostResult, IconVariant, PanelOptions, PanelScope};
use serde::Serialize;
use std::collections::BTreeMap;

/// A browser API call for the extension side to perform.
///
/// Effects are fire-and-forget: the shim applies them in order and only
/// reports back when a `setPanelOptions` that enables a tab's panel or an
/// `openPanel` fails. It does so with a `panelOpenFailed` event carrying the
/// tab id, which returns the tab to closed. Other failures stay on the
/// browser side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Effect {
    SetIcon {
        tab_id: TabId,
        path: BTreeMap<u32, &'static str>,
    },
    ClearBadge {
        tab_id: TabId,
    },
    SetPanelOptions {
        #[serde(skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
        enabled: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<&'static str>,
    },
    SetPanelBehavior {
        open_panel_on_action_click: bool,
    },
    OpenPanel {
        tab_id: TabId,
    },
    ShowToast {
        tab_id: TabId,
        url: String,
        text: String,
    },
}

/// Collects effects until the serve loop flushes them.
///
/// Calls always succeed here; a rejected panel open comes back as a
/// `panelOpenFailed` event.
#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: Vec<Effect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn push(&mut self, effect: Effect) -> HostResult<()> {
        self.pending.push(effect);
        Ok(())
    }
}

impl Host for EffectQueue {
    fn set_icon(&mut self, tab: TabId, icon: IconVariant) -> HostResult<()> {
        self.push(Effect::SetIcon {
            tab_id: tab,
            path: icon.paths().into_iter().collect(),
        })
    }

    fn clear_badge(&mut self, tab: TabId) -> HostResult<()> {
        self.push(Effect::ClearBadge { tab_id: tab })
    }

    fn set_panel_options(&mut self, scope: PanelScope, options: PanelOptions) -> HostResult<()> {
        self.push(Effect::SetPanelOptions {
            tab_id: scope.tab_id(),
            enabled: options.is_enabled(),
            path: options.path(),
        })
    }

    fn set_panel_behavior(&mut self, open_on_action_click: bool) -> HostResult<()> {
        self.push(Effect::SetPanelBehavior {
            open_panel_on_action_click: open_on_action_click,
        })
    }

    fn open_panel(&mut self, tab: TabId) -> HostResult<()> {
        self.push(Effect::OpenPanel { tab_id: tab })
    }

    fn show_toast(&mut self, tab: TabId, url: &str, text: &str) -> HostResult<()> {
        self.push(Effect::ShowToast {
            tab_id: tab,
            url: url.to_string(),
            text: text.to_string(),
        })
    }
}
