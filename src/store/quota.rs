//! Storage usage against the fixed local quota.

use super::{KeySpace, StoreResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Local storage budget: 5 MiB.
pub const QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Usage percentage above which storage counts as near its limit.
pub const NEAR_LIMIT_PERCENT: f64 = 90.0;

/// A snapshot of storage usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaReport {
    pub usage_bytes: u64,
    pub quota_bytes: u64,
    pub percentage: f64,
    pub near_limit: bool,
}

impl QuotaReport {
    /// Builds a report for `usage_bytes` out of `quota_bytes`.
    pub fn new(usage_bytes: u64, quota_bytes: u64) -> Self {
        let percentage = if quota_bytes == 0 {
            0.0
        } else {
            usage_bytes as f64 / quota_bytes as f64 * 100.0
        };
        Self {
            usage_bytes,
            quota_bytes,
            percentage,
            near_limit: percentage > NEAR_LIMIT_PERCENT,
        }
    }

    /// The report returned when storage cannot be read.
    pub fn zeroed() -> Self {
        Self {
            usage_bytes: 0,
            quota_bytes: 0,
            percentage: 0.0,
            near_limit: false,
        }
    }
}

/// Measures how much of the quota the whole key space occupies.
///
/// Usage counts every entry, notes or not, serialized as one JSON object.
#[derive(Debug, Clone, Copy)]
pub struct QuotaMonitor {
    quota_bytes: u64,
}

impl Default for QuotaMonitor {
    fn default() -> Self {
        Self {
            quota_bytes: QUOTA_BYTES,
        }
    }
}

impl QuotaMonitor {
    /// Creates a monitor with a custom budget.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self { quota_bytes }
    }

    /// Returns the budget in bytes.
    pub fn quota_bytes(&self) -> u64 {
        self.quota_bytes
    }

    /// Reports current usage. Unreadable storage yields [`QuotaReport::zeroed`].
    pub fn check_usage<K: KeySpace>(&self, keyspace: &K) -> QuotaReport {
        match serialized_size(keyspace) {
            Ok(usage) => QuotaReport::new(usage, self.quota_bytes),
            Err(err) => {
                tracing::error!(error = %err, "failed to measure storage usage");
                QuotaReport::zeroed()
            }
        }
    }
}

/// Byte length of the key space serialized as a single JSON object.
///
/// An empty key space occupies nothing.
pub fn serialized_size<K: KeySpace>(keyspace: &K) -> StoreResult<u64> {
    let entries = keyspace.entries()?;
    if entries.is_empty() {
        return Ok(0);
    }
    let object: Map<String, Value> = entries.into_iter().collect();
    let serialized = serde_json::to_string(&Value::Object(object))?;
    Ok(serialized.len() as u64)
}
