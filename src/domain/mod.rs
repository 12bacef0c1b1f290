//! Core types: CanonicalId, Note, NoteUpdate, TabId

mod canonical;
mod note;
mod tab;

pub use canonical::{CanonicalId, TRACKING_PARAMS, canonicalize};
pub use note::{Note, NoteUpdate};
pub use tab::TabId;

pub(crate) use canonical::is_web_url;
