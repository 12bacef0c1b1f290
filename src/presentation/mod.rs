//! Presentation: toolbar icons, side panel state and page notifications.
//!
//! The browser itself sits behind the [`Host`] trait. [`PresentationSync`]
//! owns per-tab state and reacts to tab events; [`PanelToggle`] is the only
//! path through which a panel becomes open.

mod host;
mod panels;
mod sync;
mod toast;
mod toggle;

#[cfg(test)]
pub(crate) mod testing;

pub use host::{
    Host, HostError, HostResult, IconVariant, NOTE_TOAST_TEXT, PANEL_DOCUMENT, PanelOptions,
    PanelScope,
};
pub use panels::PanelStates;
pub use sync::PresentationSync;
pub use toast::{TOAST_COOLDOWN, ToastLimiter};
pub use toggle::{PanelToggle, PanelTransition};
