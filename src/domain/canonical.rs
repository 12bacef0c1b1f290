//! URL canonicalization: maps raw page URLs to the identity a note is keyed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Query parameters that only record where a visitor came from.
pub const TRACKING_PARAMS: [&str; 7] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
];

const YOUTUBE_HOSTS: [&str; 2] = ["youtube.com", "www.youtube.com"];
const YOUTUBE_PREFIX: &str = "youtube:";
const INDEX_SUFFIX: &str = "/index.html";

/// The normalized key that names one logical page.
///
/// Two forms exist:
/// - `youtube:<videoId>` for YouTube watch pages
/// - a normalized `https` URL for everything else
///
/// # Examples
///
/// ```
/// use pagenote::domain::canonicalize;
///
/// let id = canonicalize("HTTP://Example.com/docs/index.html?utm_source=feed#intro").unwrap();
/// assert_eq!(id.as_str(), "https://example.com/docs");
///
/// let video = canonicalize("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ").unwrap();
/// assert_eq!(video.as_str(), "youtube:dQw4w9WgXcQ");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalId(String);

impl CanonicalId {
    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the video ID when this identity names a YouTube video.
    pub fn youtube_video_id(&self) -> Option<&str> {
        self.0.strip_prefix(YOUTUBE_PREFIX)
    }

    /// Returns true if the identity is a normalized web URL that can be opened.
    pub fn is_web_url(&self) -> bool {
        is_web_url(&self.0)
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalId(\"{}\")", self.0)
    }
}

impl AsRef<str> for CanonicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns true for `http://` and `https://` strings.
pub(crate) fn is_web_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}

/// Maps a raw URL to its canonical identity.
///
/// Returns `None` when the input is empty or not a well-formed URL. Steps run
/// in a fixed order: parse, YouTube short-circuit, force `https`, lower-case
/// the host, drop tracking parameters, normalize the path, clear the fragment.
///
/// Canonical forms are fixed points: feeding the result back in returns it
/// unchanged.
pub fn canonicalize(raw: &str) -> Option<CanonicalId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut url = Url::parse(raw).ok()?;

    if let Some(video_id) = youtube_video_id(&url) {
        return Some(CanonicalId(format!("{YOUTUBE_PREFIX}{video_id}")));
    }

    force_https(&mut url);
    lowercase_host(&mut url);
    strip_tracking_params(&mut url);
    normalize_path(&mut url);
    url.set_fragment(None);

    Some(CanonicalId(url.into()))
}

/// First non-empty `v` parameter of a YouTube URL.
fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if !YOUTUBE_HOSTS.contains(&host) {
        return None;
    }
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn force_https(url: &mut Url) {
    // file: URLs have no host to carry over; non-special schemes (chrome:,
    // about:, mailto:) reject the change and keep their own scheme.
    if url.scheme() == "https" || url.scheme() == "file" {
        return;
    }
    let _ = url.set_scheme("https");
}

fn lowercase_host(url: &mut Url) {
    let lowered = match url.host_str() {
        Some(host) if host.bytes().any(|b| b.is_ascii_uppercase()) => host.to_ascii_lowercase(),
        _ => return,
    };
    let _ = url.set_host(Some(&lowered));
}

fn strip_tracking_params(url: &mut Url) {
    if url.query().is_none() {
        return;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
}

fn normalize_path(url: &mut Url) {
    if url.cannot_be_a_base() {
        return;
    }

    let original = url.path();
    let mut path = original.to_ascii_lowercase();
    loop {
        if path.ends_with(INDEX_SUFFIX) {
            path.truncate(path.len() - INDEX_SUFFIX.len());
        } else if path.len() > 1 && path.ends_with('/') {
            path.pop();
        } else {
            break;
        }
    }
    if path.is_empty() {
        path.push('/');
    }

    if path != original {
        url.set_path(&path);
    }
}
