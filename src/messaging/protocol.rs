//! Message protocol spoken by the content script and the side panel.
//!
//! Requests are JSON objects carrying an `action` discriminator. Fields are
//! read leniently: a `url` that is not a string counts as absent, and unknown
//! fields are ignored. Responses always carry `success`, plus either the
//! action's payload or an `error` string.

use crate::domain::{CanonicalId, Note, NoteUpdate, TabId};
use crate::store::QuotaReport;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Keyboard command that toggles the side panel.
pub const TOGGLE_COMMAND: &str = "toggle-sidepanel";

/// Error text for requests with an unrecognized `action`.
pub const UNKNOWN_ACTION: &str = "Unknown action";

/// Error text for tab-scoped requests sent from outside a tab.
pub const MISSING_TAB_INFO: &str = "Missing tab info";

/// Error text for panel requests that name no tab.
pub const MISSING_TAB_ID: &str = "Missing tabId";

/// A request that could not be turned into a [`Request`].
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown action")]
    UnknownAction(Option<String>),

    #[error("malformed {action} request: {source}")]
    Malformed {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A parsed request.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    GetNote { url: Option<String> },
    SaveNote { url: Option<String>, note_data: NoteUpdate },
    DeleteNote { url: Option<String> },
    CheckQuota,
    ExportNotes,
    /// The page's URL changed without a full load (single-page apps).
    UrlChanged { url: Option<String> },
    /// The sending tab became active.
    TabActivated { url: Option<String> },
    TogglePanel { tab_id: Option<TabId> },
    /// The panel closed itself; bookkeeping only.
    PanelClosed { tab_id: Option<TabId> },
    ClosePanel { tab_id: Option<TabId> },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestFields {
    #[serde(default, deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(default)]
    note_data: Option<NoteUpdate>,
    #[serde(default, deserialize_with = "lenient_tab_id")]
    tab_id: Option<TabId>,
}

impl Request {
    /// Parses a request body.
    pub fn parse(body: Value) -> Result<Self, ProtocolError> {
        let action = match body.get("action").and_then(Value::as_str) {
            Some(action) => action_name(action)
                .ok_or_else(|| ProtocolError::UnknownAction(Some(action.to_string())))?,
            None => return Err(ProtocolError::UnknownAction(None)),
        };

        let fields: RequestFields = serde_json::from_value(body)
            .map_err(|source| ProtocolError::Malformed { action, source })?;
        let RequestFields {
            url,
            note_data,
            tab_id,
        } = fields;

        Ok(match action {
            "getNote" => Self::GetNote { url },
            "saveNote" => Self::SaveNote {
                url,
                note_data: note_data.unwrap_or_default(),
            },
            "deleteNote" => Self::DeleteNote { url },
            "checkQuota" => Self::CheckQuota,
            "exportNotes" => Self::ExportNotes,
            "urlChanged" => Self::UrlChanged { url },
            "tabActivated" => Self::TabActivated { url },
            "togglePanel" => Self::TogglePanel { tab_id },
            "panelClosed" => Self::PanelClosed { tab_id },
            _ => Self::ClosePanel { tab_id },
        })
    }

    /// Returns the wire name of the action.
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetNote { .. } => "getNote",
            Self::SaveNote { .. } => "saveNote",
            Self::DeleteNote { .. } => "deleteNote",
            Self::CheckQuota => "checkQuota",
            Self::ExportNotes => "exportNotes",
            Self::UrlChanged { .. } => "urlChanged",
            Self::TabActivated { .. } => "tabActivated",
            Self::TogglePanel { .. } => "togglePanel",
            Self::PanelClosed { .. } => "panelClosed",
            Self::ClosePanel { .. } => "closePanel",
        }
    }
}

const ACTIONS: [&str; 10] = [
    "getNote",
    "saveNote",
    "deleteNote",
    "checkQuota",
    "exportNotes",
    "urlChanged",
    "tabActivated",
    "togglePanel",
    "panelClosed",
    "closePanel",
];

fn action_name(action: &str) -> Option<&'static str> {
    ACTIONS.iter().copied().find(|known| *known == action)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_tab_id<'de, D>(deserializer: D) -> Result<Option<TabId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().map(TabId::new))
}

/// Who sent a request. Messages from the side panel carry no tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub tab: Option<SenderTab>,
}

impl Sender {
    /// A sender inside the given tab.
    pub fn tab(id: TabId, active: bool) -> Self {
        Self {
            tab: Some(SenderTab { id, active }),
        }
    }

    /// Returns the sending tab's ID.
    pub fn tab_id(&self) -> Option<TabId> {
        self.tab.map(|tab| tab.id)
    }
}

/// The tab a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SenderTab {
    pub id: TabId,
    #[serde(default)]
    pub active: bool,
}

/// Reply to a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    success: bool,
    #[serde(flatten)]
    body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum ResponseBody {
    Note {
        note: Option<Note>,
        #[serde(rename = "canonicalUrl")]
        canonical_url: Option<CanonicalId>,
    },
    Saved {
        note: Option<Note>,
    },
    Quota {
        quota: QuotaReport,
    },
    Export {
        data: Option<String>,
    },
    Failure {
        error: String,
    },
    Ack {},
}

impl Response {
    fn ok(body: ResponseBody) -> Self {
        Self {
            success: true,
            body,
        }
    }

    /// Reply to `getNote`.
    pub fn note(note: Option<Note>, canonical_url: Option<CanonicalId>) -> Self {
        Self::ok(ResponseBody::Note {
            note,
            canonical_url,
        })
    }

    /// Reply to `saveNote`.
    pub fn saved(note: Option<Note>) -> Self {
        Self::ok(ResponseBody::Saved { note })
    }

    /// Reply to `checkQuota`.
    pub fn quota(quota: QuotaReport) -> Self {
        Self::ok(ResponseBody::Quota { quota })
    }

    /// Reply to `exportNotes`. `None` when storage could not be read.
    pub fn export(data: Option<String>) -> Self {
        Self::ok(ResponseBody::Export { data })
    }

    /// Bare success.
    pub fn ack() -> Self {
        Self::ok(ResponseBody::Ack {})
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            body: ResponseBody::Failure {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the error text of a failed response.
    pub fn error(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Failure { error } => Some(error),
            _ => None,
        }
    }

    /// Returns the note carried by a `getNote` or `saveNote` reply.
    pub fn note_ref(&self) -> Option<&Note> {
        match &self.body {
            ResponseBody::Note { note, .. } | ResponseBody::Saved { note } => note.as_ref(),
            _ => None,
        }
    }

    /// Renders the response as a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to serialize response");
            serde_json::json!({ "success": false, "error": err.to_string() })
        })
    }
}

impl From<ProtocolError> for Response {
    fn from(err: ProtocolError) -> Self {
        Self::failure(err.to_string())
    }
}

/// A browser event forwarded to the core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BrowserEvent {
    TabActivated {
        tab_id: TabId,
        #[serde(default)]
        url: Option<String>,
    },
    TabUpdated {
        tab_id: TabId,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        active: bool,
    },
    TabCreated {
        tab_id: TabId,
    },
    TabRemoved {
        tab_id: TabId,
    },
    /// The extension was installed or updated.
    Installed {
        #[serde(default)]
        tab_ids: Vec<TabId>,
    },
    /// The browser started.
    Startup {
        #[serde(default)]
        tab_ids: Vec<TabId>,
    },
    /// The toolbar icon was clicked.
    ActionClicked {
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    /// A keyboard command fired; `tab_id` is the active tab.
    Command {
        command: String,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    /// The browser rejected a `setPanelOptions` or `openPanel` effect that
    /// enabled or showed the panel for `tab_id`.
    PanelOpenFailed {
        tab_id: TabId,
        #[serde(default)]
        error: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_save_note() {
        let request = Request::parse(json!({
            "action": "saveNote",
            "url": "https://example.com/a",
            "noteData": {"title": "A", "content": "text"}
        }))
        .unwrap();

        assert_eq!(
            request,
            Request::SaveNote {
                url: Some("https://example.com/a".into()),
                note_data: NoteUpdate::content("text").with_title("A"),
            }
        );
    }

    #[test]
    fn save_without_note_data_is_an_empty_update() {
        let request = Request::parse(json!({"action": "saveNote", "url": "https://x.example"}))
            .unwrap();
        assert!(matches!(
            request,
            Request::SaveNote { note_data, .. } if note_data == NoteUpdate::default()
        ));
    }

    #[test]
    fn non_string_url_counts_as_absent() {
        for url in [json!(42), json!(null), json!({"href": "x"})] {
            let request = Request::parse(json!({"action": "getNote", "url": url})).unwrap();
            assert_eq!(request, Request::GetNote { url: None });
        }
    }

    #[test]
    fn tab_id_is_read_from_the_body() {
        let request = Request::parse(json!({"action": "closePanel", "tabId": 9})).unwrap();
        assert_eq!(request, Request::ClosePanel { tab_id: Some(TabId::new(9)) });

        let request = Request::parse(json!({"action": "togglePanel", "tabId": "9"})).unwrap();
        assert_eq!(request, Request::TogglePanel { tab_id: None });
    }

    #[test]
    fn unknown_or_missing_action_is_rejected() {
        let err = Request::parse(json!({"action": "launchRockets"})).unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_ACTION);

        let err = Request::parse(json!({"url": "https://example.com"})).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownAction(None)));
    }

    #[test]
    fn malformed_note_data_is_reported() {
        let err = Request::parse(json!({
            "action": "saveNote",
            "noteData": {"content": 5}
        }))
        .unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { action: "saveNote", .. }));
    }

    #[test]
    fn action_names_round_trip() {
        for name in ACTIONS {
            let request = Request::parse(json!({"action": name, "tabId": 1})).unwrap();
            assert_eq!(request.action(), name);
        }
    }

    #[test]
    fn failure_response_shape() {
        assert_eq!(
            Response::failure(UNKNOWN_ACTION).to_value(),
            json!({"success": false, "error": "Unknown action"})
        );
    }

    #[test]
    fn ack_response_shape() {
        assert_eq!(Response::ack().to_value(), json!({"success": true}));
    }

    #[test]
    fn get_note_response_includes_nulls() {
        assert_eq!(
            Response::note(None, None).to_value(),
            json!({"success": true, "note": null, "canonicalUrl": null})
        );
    }

    #[test]
    fn export_response_carries_string_data() {
        assert_eq!(
            Response::export(Some("{}".into())).to_value(),
            json!({"success": true, "data": "{}"})
        );
        assert_eq!(
            Response::export(None).to_value(),
            json!({"success": true, "data": null})
        );
    }

    #[test]
    fn parses_browser_events() {
        let event: BrowserEvent = serde_json::from_value(json!({
            "event": "tabUpdated",
            "tabId": 3,
            "url": "https://example.com",
            "status": "complete",
            "active": true
        }))
        .unwrap();
        assert_eq!(
            event,
            BrowserEvent::TabUpdated {
                tab_id: TabId::new(3),
                url: Some("https://example.com".into()),
                status: Some("complete".into()),
                active: true,
            }
        );

        let event: BrowserEvent =
            serde_json::from_value(json!({"event": "startup", "tabIds": [1, 2]})).unwrap();
        assert_eq!(
            event,
            BrowserEvent::Startup {
                tab_ids: vec![TabId::new(1), TabId::new(2)]
            }
        );
    }

    #[test]
    fn parses_panel_open_failure() {
        let event: BrowserEvent = serde_json::from_value(json!({
            "event": "panelOpenFailed",
            "tabId": 7,
            "error": "sidePanel.open() may only be called in response to a user gesture"
        }))
        .unwrap();
        assert!(matches!(
            event,
            BrowserEvent::PanelOpenFailed { tab_id, error: Some(_) } if tab_id == TabId::new(7)
        ));

        let event: BrowserEvent =
            serde_json::from_value(json!({"event": "panelOpenFailed", "tabId": 7})).unwrap();
        assert_eq!(
            event,
            BrowserEvent::PanelOpenFailed {
                tab_id: TabId::new(7),
                error: None
            }
        );
    }

    #[test]
    fn sender_deserializes_with_defaults() {
        let sender: Sender = serde_json::from_value(json!({"tab": {"id": 4}})).unwrap();
        assert_eq!(sender, Sender::tab(TabId::new(4), false));

        let sender: Sender = serde_json::from_value(json!({})).unwrap();
        assert_eq!(sender.tab_id(), None);
    }
}
