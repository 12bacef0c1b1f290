//! Note record keyed by a page's canonical identity.

use crate::domain::CanonicalId;
use crate::domain::is_web_url;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A free-text note attached to one logical page.
///
/// # Fields
/// - `id`: the page's canonical identity, fixed once the note exists
/// - `title`: display label, derived from the page URL when not supplied
/// - `content`: the note text; whitespace-only content counts as "no note"
/// - `created` / `updated`: write timestamps, `updated >= created`
/// - `aliases`: original URLs that resolved to `id`, never including `id` itself
///
/// # Examples
///
/// ```
/// use pagenote::domain::{Note, NoteUpdate, canonicalize};
/// use chrono::Utc;
///
/// let id = canonicalize("https://example.com/page/?utm_source=x").unwrap();
/// let note = Note::create(
///     id,
///     "https://example.com/page/?utm_source=x",
///     NoteUpdate::content("remember this"),
///     Utc::now(),
/// );
/// assert_eq!(note.title(), "example.com/page/");
/// assert_eq!(note.aliases(), ["https://example.com/page/?utm_source=x"]);
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    id: CanonicalId,
    title: String,
    #[serde(default)]
    content: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    #[serde(default)]
    aliases: Vec<String>,
}

/// Partial note data supplied by a save request.
///
/// Absent fields keep the stored value; a blank title counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoteUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteUpdate {
    /// An update that only sets the content.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    /// Sets the title on this update.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn title_text(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

impl Note {
    /// Creates a note for `id` first seen at `original_url`.
    ///
    /// `created` and `updated` are both set to `now`.
    pub fn create(
        id: CanonicalId,
        original_url: &str,
        update: NoteUpdate,
        now: DateTime<Utc>,
    ) -> Self {
        let title = update
            .title_text()
            .map(str::to_string)
            .unwrap_or_else(|| derive_title(original_url, &id));

        let mut note = Self {
            id,
            title,
            content: update.content.unwrap_or_default(),
            created: now,
            updated: now,
            aliases: Vec::new(),
        };
        note.record_alias(original_url);
        note
    }

    /// Merges an update written from `original_url` into this note.
    ///
    /// Keeps `created` and the existing aliases, appends `original_url` as an
    /// alias when it is new, and advances `updated` (never below `created`).
    pub fn apply(&mut self, original_url: &str, update: NoteUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title_text() {
            self.title = title.to_string();
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        self.updated = now.max(self.created);
        self.record_alias(original_url);
    }

    fn record_alias(&mut self, original_url: &str) {
        if original_url.is_empty() || original_url == self.id.as_str() {
            return;
        }
        if !self.aliases.iter().any(|alias| alias == original_url) {
            self.aliases.push(original_url.to_string());
        }
    }

    /// Returns the note's canonical identity.
    pub fn id(&self) -> &CanonicalId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the note was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the note was last written.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Returns the original URLs known to map to this note.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns true if the note has non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Returns a URL that opens the noted page.
    ///
    /// The identity itself when it is a web URL, otherwise the first web alias
    /// (YouTube identities are reached through their aliases).
    pub fn link(&self) -> Option<&str> {
        if self.id.is_web_url() {
            return Some(self.id.as_str());
        }
        self.aliases
            .iter()
            .map(String::as_str)
            .find(|alias| is_web_url(alias))
    }

    /// Returns true if the query occurs in the title, content, id or aliases.
    ///
    /// Matching is case-insensitive.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&query);
        contains(self.title.as_str())
            || contains(self.content.as_str())
            || contains(self.id.as_str())
            || self.aliases.iter().any(|alias| contains(alias.as_str()))
    }
}

/// Host plus path of the page, or the raw URL when it has no host.
fn derive_title(original_url: &str, id: &CanonicalId) -> String {
    let derived = Url::parse(original_url)
        .ok()
        .and_then(|url| url.host_str().map(|host| format!("{host}{}", url.path())));

    match derived {
        Some(title) => title,
        None if !original_url.trim().is_empty() => original_url.to_string(),
        None => id.to_string(),
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("created", &self.created)
            .field("updated", &self.updated)
            .field("aliases", &self.aliases)
            .finish()
    }
}
