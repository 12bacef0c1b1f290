//! Routes requests and browser events to the store and presentation layers.

use super::protocol::{
    BrowserEvent, MISSING_TAB_ID, MISSING_TAB_INFO, Request, Response, Sender, TOGGLE_COMMAND,
};
use crate::domain::{NoteUpdate, TabId, canonicalize};
use crate::presentation::{Host, PresentationSync};
use crate::store::{KeySpace, NoteStore, QuotaMonitor};
use serde_json::Value;

/// The extension core: one note store, one presentation sync.
///
/// Requests and events are handled one at a time, each to completion.
pub struct Dispatcher<K, H> {
    store: NoteStore<K>,
    sync: PresentationSync<H>,
    quota: QuotaMonitor,
}

impl<K: KeySpace, H: Host> Dispatcher<K, H> {
    pub fn new(store: NoteStore<K>, sync: PresentationSync<H>) -> Self {
        Self {
            store,
            sync,
            quota: QuotaMonitor::default(),
        }
    }

    /// Replaces the quota monitor.
    pub fn with_quota_monitor(mut self, quota: QuotaMonitor) -> Self {
        self.quota = quota;
        self
    }

    /// Returns the note store.
    pub fn store(&self) -> &NoteStore<K> {
        &self.store
    }

    /// Returns the presentation sync.
    pub fn sync(&self) -> &PresentationSync<H> {
        &self.sync
    }

    /// Returns the presentation sync mutably.
    pub fn sync_mut(&mut self) -> &mut PresentationSync<H> {
        &mut self.sync
    }

    /// Parses and handles a raw request body.
    pub fn handle_value(&mut self, body: Value, sender: Sender) -> Response {
        match Request::parse(body) {
            Ok(request) => self.handle(request, sender),
            Err(err) => {
                tracing::warn!(error = %err, "rejected request");
                err.into()
            }
        }
    }

    /// Handles one request.
    pub fn handle(&mut self, request: Request, sender: Sender) -> Response {
        let action = request.action();
        tracing::debug!(action, tab_id = ?sender.tab_id(), "handling request");

        match request {
            Request::GetNote { url } => self.get_note(url.as_deref()),
            Request::SaveNote { url, note_data } => {
                self.save_note(url.as_deref(), note_data, sender)
            }
            Request::DeleteNote { url } => self.delete_note(url.as_deref(), sender),
            Request::CheckQuota => Response::quota(self.quota.check_usage(self.store.keyspace())),
            Request::ExportNotes => self.export_notes(),
            Request::UrlChanged { url } => match sender.tab {
                Some(tab) => {
                    self.sync
                        .on_tab_navigated(&self.store, tab.id, url.as_deref(), true, tab.active);
                    Response::ack()
                }
                None => Response::failure(MISSING_TAB_INFO),
            },
            Request::TabActivated { url } => match sender.tab_id() {
                Some(tab) => {
                    self.sync.on_tab_activated(&self.store, tab, url.as_deref());
                    Response::ack()
                }
                None => Response::failure(MISSING_TAB_INFO),
            },
            Request::TogglePanel { tab_id } => match tab_id.or(sender.tab_id()) {
                Some(tab) => {
                    self.sync.toggle(tab);
                    Response::ack()
                }
                None => Response::failure(MISSING_TAB_ID),
            },
            Request::PanelClosed { tab_id } => {
                if let Some(tab) = tab_id {
                    self.sync.acknowledge_panel_closed(tab);
                }
                Response::ack()
            }
            Request::ClosePanel { tab_id } => match tab_id {
                Some(tab) => {
                    self.sync.close_panel(tab);
                    Response::ack()
                }
                None => Response::failure(MISSING_TAB_ID),
            },
        }
    }

    /// Handles one browser event.
    pub fn handle_event(&mut self, event: BrowserEvent) {
        tracing::trace!(?event, "handling event");

        match event {
            BrowserEvent::TabActivated { tab_id, url } => {
                self.sync.on_tab_activated(&self.store, tab_id, url.as_deref());
            }
            BrowserEvent::TabUpdated {
                tab_id,
                url,
                status,
                active,
            } => {
                let complete = status.as_deref() == Some("complete");
                self.sync
                    .on_tab_navigated(&self.store, tab_id, url.as_deref(), complete, active);
            }
            BrowserEvent::TabCreated { tab_id } => self.sync.on_tab_created(tab_id),
            BrowserEvent::TabRemoved { tab_id } => self.sync.on_tab_closed(tab_id),
            BrowserEvent::Installed { tab_ids } | BrowserEvent::Startup { tab_ids } => {
                self.sync.on_started(&tab_ids);
            }
            BrowserEvent::ActionClicked { tab_id } => self.toggle_if_known(tab_id),
            BrowserEvent::Command { command, tab_id } => {
                if command == TOGGLE_COMMAND {
                    self.toggle_if_known(tab_id);
                } else {
                    tracing::debug!(command = %command, "ignoring unknown command");
                }
            }
            BrowserEvent::PanelOpenFailed { tab_id, error } => {
                tracing::warn!(
                    tab_id = %tab_id,
                    error = ?error,
                    "browser rejected side panel open"
                );
                self.sync.panel_open_failed(tab_id);
            }
        }
    }

    fn toggle_if_known(&mut self, tab: Option<TabId>) {
        match tab {
            Some(tab) => {
                self.sync.toggle(tab);
            }
            None => tracing::debug!("toggle without a tab ignored"),
        }
    }

    fn get_note(&self, url: Option<&str>) -> Response {
        let id = url.and_then(canonicalize);
        let note = id.as_ref().and_then(|id| match self.store.get(id) {
            Ok(note) => note,
            Err(err) => {
                tracing::error!(id = %id, error = %err, "failed to read note");
                None
            }
        });
        Response::note(note, id)
    }

    fn save_note(&mut self, url: Option<&str>, update: NoteUpdate, sender: Sender) -> Response {
        let Some((url, id)) = url.and_then(|url| Some((url, canonicalize(url)?))) else {
            tracing::debug!("save for an unidentifiable URL ignored");
            return Response::saved(None);
        };

        let note = match self.store.upsert(&id, url, update) {
            Ok(note) => note,
            Err(err) => {
                tracing::error!(id = %id, error = %err, "failed to save note");
                return Response::saved(None);
            }
        };
        tracing::info!(id = %id, "note saved");

        if let Some(tab) = sender.tab_id() {
            self.sync.refresh_icon(&self.store, tab, url);
        }
        Response::saved(Some(note))
    }

    fn delete_note(&mut self, url: Option<&str>, sender: Sender) -> Response {
        let Some((url, id)) = url.and_then(|url| Some((url, canonicalize(url)?))) else {
            return Response::ack();
        };

        if let Err(err) = self.store.remove(&id) {
            tracing::error!(id = %id, error = %err, "failed to delete note");
            return Response::ack();
        }
        tracing::info!(id = %id, "note deleted");

        if let Some(tab) = sender.tab_id() {
            self.sync.refresh_icon(&self.store, tab, url);
        }
        Response::ack()
    }

    fn export_notes(&self) -> Response {
        match self.store.export_json() {
            Ok(data) => Response::export(Some(data)),
            Err(err) => {
                tracing::error!(error = %err, "failed to export notes");
                Response::export(None)
            }
        }
    }
}
