//! Keeps toolbar icons, side panel availability and page notifications in
//! line with stored notes as tabs come and go.

use super::host::{Host, IconVariant, NOTE_TOAST_TEXT, PanelOptions, PanelScope};
use super::toast::ToastLimiter;
use super::toggle::{PanelToggle, PanelTransition};
use super::PanelStates;
use crate::domain::{TabId, canonicalize};
use crate::store::{KeySpace, NoteStore};
use std::time::Instant;

/// Owner of all per-tab presentation state.
///
/// Tab lifecycle events reset or forget state here, but only the embedded
/// [`PanelToggle`] ever records a panel as open. Navigation and activation
/// re-apply whatever state the tab already has.
pub struct PresentationSync<H> {
    host: H,
    panels: PanelStates,
    toasts: ToastLimiter,
}

impl<H: Host> PresentationSync<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            panels: PanelStates::new(),
            toasts: ToastLimiter::default(),
        }
    }

    /// Replaces the toast rate limiter.
    pub fn with_toast_limiter(mut self, toasts: ToastLimiter) -> Self {
        self.toasts = toasts;
        self
    }

    /// Returns the browser host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the browser host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the per-tab panel state.
    pub fn panels(&self) -> &PanelStates {
        &self.panels
    }

    /// Returns true if the panel is open in `tab`.
    pub fn is_panel_open(&self, tab: TabId) -> bool {
        self.panels.is_open(tab)
    }

    /// Returns the toggle controller over this sync's state.
    pub fn controller(&mut self) -> PanelToggle<'_, H> {
        PanelToggle::new(&mut self.panels, &mut self.host)
    }

    // ===========================================================================
    // Lifecycle
    // ===========================================================================

    /// Resets everything on install or browser startup.
    ///
    /// The toolbar click no longer opens the panel by itself, the panel is
    /// disabled globally, and every tab in `open_tabs` starts closed.
    pub fn on_started(&mut self, open_tabs: &[TabId]) {
        tracing::info!(tabs = open_tabs.len(), "resetting side panel state");

        if let Err(err) = self.host.set_panel_behavior(false) {
            tracing::warn!(error = %err, "failed to set side panel behavior");
        }
        if let Err(err) = self
            .host
            .set_panel_options(PanelScope::Global, PanelOptions::Disabled)
        {
            tracing::warn!(error = %err, "failed to disable side panel globally");
        }

        self.panels.clear();
        for &tab in open_tabs {
            self.disable_panel(tab);
            self.panels.mark_closed(tab);
        }
    }

    /// A new tab starts with its panel disabled and closed.
    pub fn on_tab_created(&mut self, tab: TabId) {
        self.disable_panel(tab);
        self.panels.mark_closed(tab);
    }

    /// Forgets everything held for a closed tab.
    pub fn on_tab_closed(&mut self, tab: TabId) {
        self.panels.forget(tab);
        self.toasts.forget(tab);
        tracing::debug!(tab_id = %tab, "forgot closed tab");
    }

    // ===========================================================================
    // Page changes
    // ===========================================================================

    /// Recomputes presentation for a tab that became active.
    ///
    /// `url` is `None` when the tab's URL is unknown; the icon is left alone
    /// but the panel state is still re-applied.
    pub fn on_tab_activated<K: KeySpace>(
        &mut self,
        store: &NoteStore<K>,
        tab: TabId,
        url: Option<&str>,
    ) {
        self.recompute(store, tab, url, true);
    }

    /// Recomputes presentation after a navigation.
    ///
    /// Ignored until the page finishes loading. A navigation never opens or
    /// closes the panel, whatever the new URL.
    pub fn on_tab_navigated<K: KeySpace>(
        &mut self,
        store: &NoteStore<K>,
        tab: TabId,
        url: Option<&str>,
        complete: bool,
        active: bool,
    ) {
        if !complete {
            tracing::trace!(tab_id = %tab, "navigation still loading");
            return;
        }
        self.recompute(store, tab, url, active);
    }

    /// Sets `tab`'s toolbar icon from whether `url` has a note.
    ///
    /// Returns `None` when `url` is unidentifiable, in which case nothing is
    /// touched. Storage errors are logged and treated as "no note".
    pub fn refresh_icon<K: KeySpace>(
        &mut self,
        store: &NoteStore<K>,
        tab: TabId,
        url: &str,
    ) -> Option<bool> {
        let id = canonicalize(url)?;
        let has_note = match store.get(&id) {
            Ok(note) => note.is_some_and(|note| note.has_content()),
            Err(err) => {
                tracing::warn!(tab_id = %tab, id = %id, error = %err, "failed to look up note");
                false
            }
        };

        if let Err(err) = self.host.clear_badge(tab) {
            tracing::warn!(tab_id = %tab, error = %err, "failed to clear badge");
        }
        if let Err(err) = self.host.set_icon(tab, IconVariant::for_note(has_note)) {
            tracing::warn!(tab_id = %tab, error = %err, "failed to set icon");
        }

        tracing::debug!(tab_id = %tab, id = %id, has_note, "icon refreshed");
        Some(has_note)
    }

    // ===========================================================================
    // User intent
    // ===========================================================================

    /// Opens the panel in `tab` if closed, closes it if open.
    pub fn toggle(&mut self, tab: TabId) -> PanelTransition {
        self.controller().toggle(tab)
    }

    /// Closes the panel in `tab`.
    pub fn close_panel(&mut self, tab: TabId) {
        self.controller().close(tab);
    }

    /// Records that the panel in `tab` closed itself.
    pub fn acknowledge_panel_closed(&mut self, tab: TabId) {
        self.controller().acknowledge_closed(tab);
    }

    /// Records that the browser failed to enable or show the panel in `tab`.
    pub fn panel_open_failed(&mut self, tab: TabId) -> PanelTransition {
        self.controller().open_failed(tab)
    }

    // ===========================================================================
    // Internals
    // ===========================================================================

    fn recompute<K: KeySpace>(
        &mut self,
        store: &NoteStore<K>,
        tab: TabId,
        url: Option<&str>,
        active: bool,
    ) {
        let has_note = url
            .and_then(|url| self.refresh_icon(store, tab, url))
            .unwrap_or(false);

        let open = self.panels.is_open(tab);
        self.reapply_panel(tab, open);

        if has_note
            && active
            && !open
            && let Some(url) = url
        {
            self.notify(tab, url, Instant::now());
        }
    }

    fn reapply_panel(&mut self, tab: TabId, open: bool) {
        let options = if open {
            PanelOptions::panel_document()
        } else {
            PanelOptions::Disabled
        };
        if let Err(err) = self.host.set_panel_options(PanelScope::Tab(tab), options) {
            tracing::warn!(
                tab_id = %tab,
                open,
                error = %err,
                "failed to re-apply side panel state"
            );
        }
    }

    fn disable_panel(&mut self, tab: TabId) {
        if let Err(err) = self
            .host
            .set_panel_options(PanelScope::Tab(tab), PanelOptions::Disabled)
        {
            tracing::warn!(tab_id = %tab, error = %err, "failed to disable side panel");
        }
    }

    fn notify(&mut self, tab: TabId, url: &str, now: Instant) {
        if !self.toasts.allows(tab, url, now) {
            tracing::trace!(tab_id = %tab, "note toast suppressed");
            return;
        }
        match self.host.show_toast(tab, url, NOTE_TOAST_TEXT) {
            Ok(()) => self.toasts.record(tab, url, now),
            // Pages without a content script cannot show toasts.
            Err(err) => tracing::debug!(tab_id = %tab, error = %err, "note toast not shown"),
        }
    }
}
