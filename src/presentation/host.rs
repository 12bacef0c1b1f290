//! Host trait: the browser surfaces the presentation layer drives.

use crate::domain::TabId;
use serde::Serialize;
use thiserror::Error;

/// Document the side panel shows when enabled.
pub const PANEL_DOCUMENT: &str = "sidepanel.html";

/// Text of the "you have a note" page notification.
pub const NOTE_TOAST_TEXT: &str =
    "You have a saved note for this page. Check it in the side panel.";

const DEFAULT_ICON_PATHS: [(u32, &str); 5] = [
    (16, "icons/icon16.png"),
    (32, "icons/icon32.png"),
    (48, "icons/icon48.png"),
    (64, "icons/icon64.png"),
    (128, "icons/icon128.png"),
];

const NOTE_ICON_PATHS: [(u32, &str); 5] = [
    (16, "icons/icon16-dot.png"),
    (32, "icons/icon32-dot.png"),
    (48, "icons/icon48-dot.png"),
    (64, "icons/icon64-dot.png"),
    (128, "icons/icon128-dot.png"),
];

/// Which toolbar icon a tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IconVariant {
    Default,
    HasNote,
}

impl IconVariant {
    pub fn for_note(has_note: bool) -> Self {
        if has_note { Self::HasNote } else { Self::Default }
    }

    /// Icon image paths by pixel size.
    pub fn paths(self) -> [(u32, &'static str); 5] {
        match self {
            Self::Default => DEFAULT_ICON_PATHS,
            Self::HasNote => NOTE_ICON_PATHS,
        }
    }
}

/// Where a side panel setting applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelScope {
    /// The browser-wide default.
    Global,
    Tab(TabId),
}

impl PanelScope {
    pub fn tab_id(self) -> Option<TabId> {
        match self {
            Self::Global => None,
            Self::Tab(tab) => Some(tab),
        }
    }
}

/// Side panel availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOptions {
    Disabled,
    Enabled { path: &'static str },
}

impl PanelOptions {
    /// Enabled and pointed at the note panel document.
    pub fn panel_document() -> Self {
        Self::Enabled {
            path: PANEL_DOCUMENT,
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    pub fn path(self) -> Option<&'static str> {
        match self {
            Self::Disabled => None,
            Self::Enabled { path } => Some(path),
        }
    }
}

/// A browser API call that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct HostError {
    operation: &'static str,
    message: String,
}

impl HostError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }

    /// Returns the name of the failed call.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Result type for browser API calls.
pub type HostResult<T> = Result<T, HostError>;

/// Browser surfaces for toolbar icons, the side panel and page notifications.
///
/// Every call may fail; callers log failures and carry on.
pub trait Host {
    /// Swaps the toolbar icon shown for `tab`.
    fn set_icon(&mut self, tab: TabId, icon: IconVariant) -> HostResult<()>;

    /// Clears the toolbar badge text and background for `tab`.
    fn clear_badge(&mut self, tab: TabId) -> HostResult<()>;

    /// Enables or disables the side panel, for one tab or globally.
    fn set_panel_options(&mut self, scope: PanelScope, options: PanelOptions) -> HostResult<()>;

    /// Controls whether clicking the toolbar icon opens the panel by itself.
    fn set_panel_behavior(&mut self, open_on_action_click: bool) -> HostResult<()>;

    /// Shows the side panel in `tab`.
    fn open_panel(&mut self, tab: TabId) -> HostResult<()>;

    /// Shows a short notification inside the page loaded in `tab`.
    fn show_toast(&mut self, tab: TabId, url: &str, text: &str) -> HostResult<()>;
}
