//! Rate limiting for the "you have a note" page notification.

use crate::domain::TabId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Repeats for the same URL in the same tab are suppressed for this long.
pub const TOAST_COOLDOWN: Duration = Duration::from_secs(30);

/// Remembers the last notification shown in each tab.
#[derive(Debug)]
pub struct ToastLimiter {
    cooldown: Duration,
    last: HashMap<TabId, (String, Instant)>,
}

impl Default for ToastLimiter {
    fn default() -> Self {
        Self::with_cooldown(TOAST_COOLDOWN)
    }
}

impl ToastLimiter {
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: HashMap::new(),
        }
    }

    /// Returns true if a notification for `url` in `tab` may be shown at `now`.
    pub fn allows(&self, tab: TabId, url: &str, now: Instant) -> bool {
        match self.last.get(&tab) {
            Some((last_url, at)) if last_url == url => {
                now.saturating_duration_since(*at) >= self.cooldown
            }
            _ => true,
        }
    }

    /// Records that a notification for `url` was shown in `tab` at `now`.
    pub fn record(&mut self, tab: TabId, url: &str, now: Instant) {
        self.last.insert(tab, (url.to_string(), now));
    }

    pub fn forget(&mut self, tab: TabId) {
        self.last.remove(&tab);
    }
}
